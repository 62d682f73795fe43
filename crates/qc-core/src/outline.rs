//! Parametric shape outlines: anchors plus tangent handles.
//!
//! Anchors are in widget-local coordinates (the widget box is the viewBox).
//! `handles.len() == anchors.len()` is the invariant every operation here
//! preserves; records that break it are regenerated by [`ShapeOutline::sanitized`].

use crate::bezier::{self, HandlePair};
use crate::geom::{Point, Rect, Size};
use kurbo::BezPath;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::f64::consts::{PI, TAU};

/// Anchor/handle geometry of a shape widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeOutline {
    pub anchors: SmallVec<[Point; 8]>,
    pub handles: SmallVec<[HandlePair; 8]>,
    #[serde(default)]
    pub corner_count: usize,
}

impl ShapeOutline {
    /// A regular polygon with `n` corners filling `size` minus `padding`.
    ///
    /// Even corner counts get a flat top edge (so 4 corners make a
    /// rectangle); odd counts point upward.
    pub fn regular(n: usize, size: Size, padding: f64) -> Self {
        let n = n.max(3);
        let anchors: SmallVec<[Point; 8]> = default_anchor_positions(n, size, padding).into();
        let handles = SmallVec::from_elem(HandlePair::default(), n);
        Self {
            anchors,
            handles,
            corner_count: n,
        }
    }

    /// Anchors and handles agree in length and describe a polygon.
    pub fn is_valid(&self) -> bool {
        self.anchors.len() >= 3
            && self.handles.len() == self.anchors.len()
            && self
                .anchors
                .iter()
                .all(|p| p.x.is_finite() && p.y.is_finite())
            && self.handles.iter().all(|h| {
                h.left.x.is_finite()
                    && h.left.y.is_finite()
                    && h.right.x.is_finite()
                    && h.right.y.is_finite()
            })
    }

    /// Return a usable outline: valid records pass through (with
    /// `corner_count` synced to the anchor count), malformed ones are
    /// regenerated for the declared corner count.
    pub fn sanitized(mut self, size: Size, padding: f64) -> Self {
        if self.is_valid() {
            self.corner_count = self.anchors.len();
            return self;
        }
        let n = if self.corner_count >= 3 {
            self.corner_count
        } else {
            self.anchors.len().max(3)
        };
        log::warn!(
            "outline: {} anchors / {} handles is malformed, regenerating {n} corners",
            self.anchors.len(),
            self.handles.len()
        );
        Self::regular(n, size, padding)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Sampled curve bounds.
    pub fn bounds(&self, samples_per_segment: usize) -> Option<Rect> {
        bezier::bounding_box(&self.anchors, &self.handles, samples_per_segment)
    }

    pub fn path(&self) -> BezPath {
        bezier::build_path(&self.anchors, &self.handles)
    }

    pub fn to_svg(&self) -> String {
        bezier::to_svg(&self.anchors, &self.handles)
    }

    /// Move every anchor by the same offset. Handles are relative, so they
    /// follow automatically.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for a in &mut self.anchors {
            *a = a.offset(dx, dy);
        }
    }

    /// Scale anchors and handle offsets independently along each axis.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        if !(sx.is_finite() && sy.is_finite()) {
            return;
        }
        for a in &mut self.anchors {
            *a = a.scale(sx, sy);
        }
        for h in &mut self.handles {
            h.left = h.left.scale(sx, sy);
            h.right = h.right.scale(sx, sy);
        }
    }

    /// Rescale from one box size to another, preserving proportions inside
    /// the box. Degenerate source sizes leave the outline untouched.
    pub fn rescale(&mut self, from: Size, to: Size) {
        if from.width <= 0.0 || from.height <= 0.0 {
            return;
        }
        self.scale(to.width / from.width, to.height / from.height);
    }

    /// Change the corner count without discarding authored geometry:
    /// surviving indices keep their anchors and handles, shrinking drops
    /// from the end, growing appends default-polygon anchors with zero
    /// handles.
    pub fn set_corner_count(&mut self, n: usize, size: Size, padding: f64) {
        let n = n.max(3);
        let current = self.anchors.len();
        if n < current {
            self.anchors.truncate(n);
            self.handles.truncate(n);
        } else if n > current {
            let defaults = default_anchor_positions(n, size, padding);
            self.anchors.extend(defaults.into_iter().skip(current));
            self.handles
                .extend(std::iter::repeat_n(HandlePair::default(), n - current));
        }
        self.corner_count = n;
    }

    /// Give anchor `index` tangent handles pointing at its neighbours, each
    /// `length` long. Only applies when both handles are still zero.
    /// Returns whether handles were synthesized.
    pub fn seed_handles(&mut self, index: usize, length: f64) -> bool {
        let n = self.anchors.len();
        if index >= n || n < 2 || !self.handles[index].is_zero() {
            return false;
        }
        let anchor = self.anchors[index];
        let prev = self.anchors[(index + n - 1) % n];
        let next = self.anchors[(index + 1) % n];
        self.handles[index] = HandlePair::new(
            toward(anchor, prev, length),
            toward(anchor, next, length),
        );
        true
    }

    /// Absolute (widget-local) position of one handle.
    pub fn handle_position(&self, index: usize, side: bezier::HandleSide) -> Option<Point> {
        let anchor = self.anchors.get(index)?;
        let handle = self.handles.get(index)?;
        Some(anchor.add(handle.get(side)))
    }
}

/// Offset of length `length` from `from` toward `to`; zero when the points
/// coincide.
fn toward(from: Point, to: Point, length: f64) -> Point {
    let d = to.sub(from);
    let len = d.length();
    if len <= f64::EPSILON {
        return Point::ZERO;
    }
    d.scale(length / len, length / len)
}

/// Corner positions of the default `n`-gon inside `size` minus `padding`.
pub fn default_anchor_positions(n: usize, size: Size, padding: f64) -> Vec<Point> {
    let n = n.max(3);
    let start = -PI / 2.0 + if n % 2 == 0 { PI / n as f64 } else { 0.0 };
    let unit: Vec<Point> = (0..n)
        .map(|k| {
            let theta = start + TAU * k as f64 / n as f64;
            Point::new(theta.cos(), theta.sin())
        })
        .collect();

    let Some(hull) = Rect::bounding(unit.iter().copied()) else {
        return Vec::new();
    };
    let inner_w = (size.width - 2.0 * padding).max(1.0);
    let inner_h = (size.height - 2.0 * padding).max(1.0);
    let pad_x = ((size.width - inner_w) / 2.0).max(0.0);
    let pad_y = ((size.height - inner_h) / 2.0).max(0.0);

    unit.into_iter()
        .map(|p| {
            Point::new(
                pad_x + (p.x - hull.x) / hull.width * inner_w,
                pad_y + (p.y - hull.y) / hull.height * inner_h,
            )
        })
        .collect()
}
