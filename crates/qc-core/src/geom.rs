//! Geometry primitives shared by every part of the engine.
//!
//! Everything here is pure math on canvas-local logical pixels (origin
//! top-left). The clamping helpers are NaN-safe: a non-finite input never
//! escapes into committed geometry.

use serde::{Deserialize, Serialize};

/// A point or offset in canvas-local (or widget-local) logical pixels.
///
/// Stored records sometimes carry `left`/`top` instead of `x`/`y`; both
/// spellings deserialize into the same fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    #[serde(alias = "left")]
    pub x: f64,
    #[serde(alias = "top")]
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn sub(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn add(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn scale(self, sx: f64, sy: f64) -> Self {
        Self::new(self.x * sx, self.y * sy)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// True when both components are (within `eps`) zero.
    pub fn is_zero(self, eps: f64) -> bool {
        self.x.abs() <= eps && self.y.abs() <= eps
    }

    /// Replace non-finite components with zero.
    pub fn sanitized(self) -> Self {
        Self::new(finite_or(self.x, 0.0), finite_or(self.y, 0.0))
    }

    pub fn distance(self, other: Point) -> f64 {
        self.sub(other).length()
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        kurbo::Point::new(p.x, p.y)
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Width and height in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Replace non-finite or negative components with zero.
    pub fn sanitized(self) -> Self {
        Self::new(
            finite_or(self.width, 0.0).max(0.0),
            finite_or(self.height, 0.0).max(0.0),
        )
    }

    /// Whether both dimensions differ from `other` by at most `eps`.
    pub fn approx_eq(self, other: Size, eps: f64) -> bool {
        (self.width - other.width).abs() <= eps && (self.height - other.height).abs() <= eps
    }
}

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Smallest rectangle covering both corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x0 = a.x.min(b.x);
        let y0 = a.y.min(b.y);
        Self::new(x0, y0, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Tight bounds of a point cloud. `None` for an empty iterator.
    pub fn bounding<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in iter {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Self::new(x0, y0, x1 - x0, y1 - y0))
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Whether `other` lies entirely inside `self` (within `eps`).
    pub fn contains_rect(&self, other: &Rect, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.right() <= self.right() + eps
            && other.bottom() <= self.bottom() + eps
    }

    /// Grow by `pad` on every side.
    pub fn inflate(&self, pad: f64) -> Self {
        Self::new(
            self.x - pad,
            self.y - pad,
            self.width + 2.0 * pad,
            self.height + 2.0 * pad,
        )
    }
}

/// Replace a non-finite value with `fallback`.
pub fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

/// Clamp `v` into `[lo, hi]`.
///
/// Unlike `f64::clamp` this never panics: when `hi < lo` (the item is larger
/// than the range) the lower bound wins, and NaN maps to `lo`.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if !v.is_finite() {
        return lo;
    }
    if hi < lo {
        return lo;
    }
    v.max(lo).min(hi)
}

/// Clamp a top-left position so a rectangle of `size` stays within
/// `[0, bounds.width] × [0, bounds.height]`.
pub fn clamp_position(pos: Point, size: Size, bounds: Size) -> Point {
    Point::new(
        clamp(pos.x, 0.0, bounds.width - size.width),
        clamp(pos.y, 0.0, bounds.height - size.height),
    )
}

/// Resolve one dimension: cap at `max`, then floor at `min`.
/// The minimum wins when the two conflict.
pub fn resolve_dimension(requested: f64, min: f64, max: f64) -> f64 {
    let min = finite_or(min, 0.0).max(0.0);
    let requested = finite_or(requested, min);
    let capped = if max.is_finite() {
        requested.min(max)
    } else {
        requested
    };
    capped.max(min)
}

/// Resolve both dimensions against a minimum and a maximum size.
pub fn resolve_size(requested: Size, min: Size, max: Size) -> Size {
    Size::new(
        resolve_dimension(requested.width, min.width, max.width),
        resolve_dimension(requested.height, min.height, max.height),
    )
}

/// Place a rectangle inside the canvas: size is resolved first (minimum
/// wins over bounds), then the position is clamped so it fits.
pub fn fit_in_bounds(pos: Point, size: Size, min: Size, bounds: Size) -> (Point, Size) {
    let size = resolve_size(size, min, bounds);
    (clamp_position(pos.sanitized(), size, bounds), size)
}
