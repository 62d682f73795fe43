//! Per-widget drag and resize sessions.
//!
//! A `DraggableElement` owns the committed geometry of one widget plus at
//! most one open session. While a session is open, pointer moves only
//! update a candidate; `end()` commits it, `cancel()` throws it away.
//!
//! Rules applied to every candidate:
//! - drag: top-left stays within `[0, W - width] × [0, H - height]`
//! - resize: capped at the canvas edge (or `max_bottom`), then floored at
//!   the minimum size; the minimum wins when the two conflict

use qc_core::geom::{self, Point, Rect, Size};

/// Session state. Origins are captured when the pointer goes down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementState {
    Idle,
    Dragging {
        pointer: Point,
        origin: Point,
        candidate: Point,
    },
    Resizing {
        pointer: Point,
        origin: Size,
        candidate: Size,
    },
}

/// Geometry written back to the widget record when a session ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementCommit {
    Moved(Point),
    /// `position` differs from the pre-resize position only when the size
    /// floor pushed the box past the canvas edge.
    Resized { position: Point, size: Size },
}

#[derive(Debug, Clone)]
pub struct DraggableElement {
    position: Point,
    size: Size,
    min_size: Size,
    bounds: Size,
    max_bottom: Option<f64>,
    state: ElementState,
}

impl DraggableElement {
    /// Wrap committed geometry, promoting it to `min_size` and clamping it
    /// into `bounds`.
    pub fn new(position: Point, size: Size, min_size: Size, bounds: Size) -> Self {
        let min_size = min_size.sanitized();
        let (position, size) = geom::fit_in_bounds(position, size.sanitized(), min_size, bounds);
        Self {
            position,
            size,
            min_size,
            bounds,
            max_bottom: None,
            state: ElementState::Idle,
        }
    }

    /// Lower the bottom edge resizes may reach (e.g. above a footer).
    pub fn with_max_bottom(mut self, max_bottom: Option<f64>) -> Self {
        self.max_bottom = max_bottom.filter(|b| b.is_finite());
        self
    }

    pub fn set_max_bottom(&mut self, max_bottom: Option<f64>) {
        self.max_bottom = max_bottom.filter(|b| b.is_finite());
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    pub fn state(&self) -> ElementState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, ElementState::Idle)
    }

    /// Committed rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// What to render: the candidate while a session is open, the committed
    /// geometry otherwise.
    pub fn display_rect(&self) -> Rect {
        match self.state {
            ElementState::Idle => self.rect(),
            ElementState::Dragging { candidate, .. } => {
                Rect::from_origin_size(candidate, self.size)
            }
            ElementState::Resizing { candidate, .. } => {
                Rect::from_origin_size(self.position, candidate)
            }
        }
    }

    /// Replace committed geometry from outside a session (content growth,
    /// shape refit). Returns the geometry actually applied.
    pub fn set_geometry(&mut self, position: Point, size: Size) -> (Point, Size) {
        let (position, size) = geom::fit_in_bounds(position, size, self.min_size, self.bounds);
        self.position = position;
        self.size = size;
        (position, size)
    }

    /// Update the minimum and promote the committed size to it. Returns
    /// whether the committed geometry changed.
    pub fn set_min_size(&mut self, min_size: Size) -> bool {
        self.min_size = min_size.sanitized();
        let before = (self.position, self.size);
        self.set_geometry(self.position, self.size);
        before != (self.position, self.size)
    }

    // ─── Drag ────────────────────────────────────────────────────────────

    /// Capture the pointer for a move. Refused while another session is open.
    pub fn begin_drag(&mut self, pointer: Point) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = ElementState::Dragging {
            pointer,
            origin: self.position,
            candidate: self.position,
        };
        true
    }

    /// Candidate top-left for the current pointer, clamped into the canvas.
    pub fn drag_to(&mut self, pointer: Point) -> Option<Point> {
        let ElementState::Dragging {
            pointer: start,
            origin,
            ref mut candidate,
        } = self.state
        else {
            return None;
        };
        let delta = pointer.sanitized().sub(start);
        *candidate = geom::clamp_position(origin.add(delta), self.size, self.bounds);
        log::trace!("element: drag candidate {:?}", candidate);
        Some(*candidate)
    }

    // ─── Resize ──────────────────────────────────────────────────────────

    /// Capture the pointer for a bottom-right resize.
    pub fn begin_resize(&mut self, pointer: Point) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = ElementState::Resizing {
            pointer,
            origin: self.size,
            candidate: self.size,
        };
        true
    }

    /// Candidate size for the current pointer.
    pub fn resize_to(&mut self, pointer: Point) -> Option<Size> {
        let bottom = self.max_bottom.unwrap_or(self.bounds.height);
        let ElementState::Resizing {
            pointer: start,
            origin,
            ref mut candidate,
        } = self.state
        else {
            return None;
        };
        let delta = pointer.sanitized().sub(start);
        let max = Size::new(
            self.bounds.width - self.position.x,
            bottom - self.position.y,
        );
        *candidate = geom::resolve_size(
            Size::new(origin.width + delta.x, origin.height + delta.y),
            self.min_size,
            max,
        );
        log::trace!("element: resize candidate {:?}", candidate);
        Some(*candidate)
    }

    // ─── Commit / cancel ─────────────────────────────────────────────────

    /// Close the session and commit its candidate.
    pub fn end(&mut self) -> Option<ElementCommit> {
        let state = std::mem::replace(&mut self.state, ElementState::Idle);
        match state {
            ElementState::Idle => None,
            ElementState::Dragging { candidate, .. } => {
                self.position = candidate;
                log::debug!("element: moved to ({}, {})", candidate.x, candidate.y);
                Some(ElementCommit::Moved(candidate))
            }
            ElementState::Resizing { candidate, .. } => {
                self.size = candidate;
                self.position = geom::clamp_position(self.position, self.size, self.bounds);
                log::debug!(
                    "element: resized to {}×{}",
                    self.size.width,
                    self.size.height
                );
                Some(ElementCommit::Resized {
                    position: self.position,
                    size: self.size,
                })
            }
        }
    }

    /// Abandon the session. Committed geometry is untouched.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = ElementState::Idle;
        was_active
    }
}
