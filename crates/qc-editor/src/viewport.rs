//! Client ↔ canvas coordinate mapping.
//!
//! The canvas is a fixed logical surface that the host may render scaled
//! (fit-to-width, zoomed preview). The host reports where the canvas sits
//! on screen and at what scale on every render; nothing here caches it.

use qc_core::Point;

/// Screen placement of the logical canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    /// Client position of the canvas' top-left corner.
    pub origin: Point,
    /// Rendered pixels per logical pixel.
    pub scale: f64,
}

impl Default for DisplayTransform {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            scale: 1.0,
        }
    }
}

impl DisplayTransform {
    /// A transform with a usable scale. Non-positive or non-finite scales
    /// fall back to 1.
    pub fn new(origin: Point, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            log::warn!("viewport: unusable display scale {scale}, using 1");
            1.0
        };
        Self {
            origin: origin.sanitized(),
            scale,
        }
    }

    /// Client (screen) point → canvas-local logical point.
    pub fn client_to_canvas(&self, client: Point) -> Point {
        let d = client.sub(self.origin);
        Point::new(d.x / self.scale, d.y / self.scale)
    }

    /// Canvas-local logical point → client point.
    pub fn canvas_to_client(&self, canvas: Point) -> Point {
        canvas.scale(self.scale, self.scale).add(self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn maps_through_origin_and_scale() {
        let t = DisplayTransform::new(Point::new(100.0, 50.0), 0.5);
        assert_eq!(t.client_to_canvas(Point::new(300.0, 200.0)), Point::new(400.0, 300.0));
        assert_eq!(t.canvas_to_client(Point::new(400.0, 300.0)), Point::new(300.0, 200.0));
    }

    #[test]
    fn bad_scale_falls_back_to_identity() {
        for scale in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert_eq!(DisplayTransform::new(Point::ZERO, scale).scale, 1.0);
        }
    }
}
