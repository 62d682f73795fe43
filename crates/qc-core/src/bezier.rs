//! Closed cubic Bézier outlines built from anchors and per-anchor handles.
//!
//! Segment *i* runs from anchor *i* to anchor *i + 1* (wrapping to the first
//! anchor), with control points `anchor[i] + right[i]` and
//! `anchor[i + 1] + left[i + 1]`. Handle offsets are relative to their
//! anchor.
//!
//! Bounds are computed by sampling the curve, never from anchors alone: a
//! handle can bulge a segment outside the anchor hull.

use crate::geom::{Point, Rect};
use kurbo::{BezPath, CubicBez, ParamCurve};
use serde::{Deserialize, Serialize};

/// Tangent handles of one anchor, as offsets from the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandlePair {
    pub left: Point,
    pub right: Point,
}

impl HandlePair {
    pub const fn new(left: Point, right: Point) -> Self {
        Self { left, right }
    }

    /// Both offsets are (near) zero: the anchor is a sharp corner.
    pub fn is_zero(&self) -> bool {
        self.left.is_zero(1e-9) && self.right.is_zero(1e-9)
    }

    pub fn get(&self, side: HandleSide) -> Point {
        match side {
            HandleSide::Left => self.left,
            HandleSide::Right => self.right,
        }
    }

    pub fn set(&mut self, side: HandleSide, offset: Point) {
        match side {
            HandleSide::Left => self.left = offset,
            HandleSide::Right => self.right = offset,
        }
    }
}

/// Which of an anchor's two handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    /// Incoming tangent (shapes the segment arriving at the anchor).
    Left,
    /// Outgoing tangent (shapes the segment leaving the anchor).
    Right,
}

/// The cubic segments of a closed outline.
///
/// Empty when the handle count does not match the anchor count or there are
/// fewer than two anchors.
pub fn segments(anchors: &[Point], handles: &[HandlePair]) -> Vec<CubicBez> {
    let n = anchors.len();
    if n < 2 || handles.len() != n {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            let p0 = anchors[i];
            let p3 = anchors[j];
            CubicBez::new(
                p0,
                p0.add(handles[i].right),
                p3.add(handles[j].left),
                p3,
            )
        })
        .collect()
}

/// Build the closed path through all anchors.
pub fn build_path(anchors: &[Point], handles: &[HandlePair]) -> BezPath {
    let segs = segments(anchors, handles);
    let mut path = BezPath::new();
    let Some(first) = segs.first() else {
        if !anchors.is_empty() && handles.len() != anchors.len() {
            log::debug!(
                "bezier: {} handles for {} anchors, empty path",
                handles.len(),
                anchors.len()
            );
        }
        return path;
    };
    path.move_to(first.p0);
    for seg in &segs {
        path.curve_to(seg.p1, seg.p2, seg.p3);
    }
    path.close_path();
    path
}

/// SVG `d` attribute for the outline (empty string for an invalid outline).
pub fn to_svg(anchors: &[Point], handles: &[HandlePair]) -> String {
    build_path(anchors, handles).to_svg()
}

/// Tight bounds of the outline, sampled at `samples_per_segment` steps per
/// cubic (both endpoints included).
pub fn bounding_box(
    anchors: &[Point],
    handles: &[HandlePair],
    samples_per_segment: usize,
) -> Option<Rect> {
    let steps = samples_per_segment.max(1);
    let segs = segments(anchors, handles);
    if segs.is_empty() {
        return None;
    }
    let mut samples = Vec::with_capacity(segs.len() * (steps + 1));
    for seg in &segs {
        if seg.p1 == seg.p0 && seg.p2 == seg.p3 {
            // Straight edge: the endpoints are the extrema.
            samples.push(Point::from(seg.p0));
            samples.push(Point::from(seg.p3));
            continue;
        }
        samples.extend((0..=steps).map(|k| Point::from(seg.eval(k as f64 / steps as f64))));
    }
    Rect::bounding(samples)
}

/// Bounds of the anchors only. Cheaper, but wrong for curved outlines.
pub fn anchor_hull(anchors: &[Point]) -> Option<Rect> {
    Rect::bounding(anchors.iter().copied())
}
