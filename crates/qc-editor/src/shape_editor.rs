//! Anchor and handle editing for shape widgets.
//!
//! The editor never writes into the committed outline while a drag is in
//! progress: drags mutate a draft copy, `end()` hands the draft back for the
//! engine to commit, `cancel()` drops it.
//!
//! ```text
//! Idle ─activate─▶ AnchorActive ─┬─▶ AnchorDragging ─end─▶ AnchorActive
//!                                └─▶ HandleDragging ─end─▶ AnchorActive
//! any ─cancel─▶ Idle
//! ```

use qc_core::geom::{self, Point, Size};
use qc_core::{HandleSide, ShapeConfig, ShapeOutline};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    AnchorActive(usize),
    AnchorDragging(usize),
    HandleDragging(usize, HandleSide),
}

#[derive(Debug, Clone, Default)]
pub struct ShapeAnchorEditor {
    state: EditorState,
    draft: Option<ShapeOutline>,
    /// Pointer minus the dragged point at press time.
    grab: Point,
}

impl ShapeAnchorEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Anchor whose handles are shown, if any.
    pub fn active_anchor(&self) -> Option<usize> {
        match self.state {
            EditorState::Idle => None,
            EditorState::AnchorActive(i)
            | EditorState::AnchorDragging(i)
            | EditorState::HandleDragging(i, _) => Some(i),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self.state,
            EditorState::AnchorDragging(_) | EditorState::HandleDragging(..)
        )
    }

    /// Outline being dragged, for rendering.
    pub fn draft(&self) -> Option<&ShapeOutline> {
        self.draft.as_ref()
    }

    /// Make `index` the active anchor. Zero handles are seeded toward the
    /// neighbouring anchors; returns whether that changed `outline`.
    pub fn activate(&mut self, outline: &mut ShapeOutline, index: usize, handle_length: f64) -> bool {
        if index >= outline.len() || self.is_dragging() {
            return false;
        }
        self.state = EditorState::AnchorActive(index);
        let seeded = outline.seed_handles(index, handle_length);
        if seeded {
            log::debug!("shape_editor: seeded handles for anchor {index}");
        }
        seeded
    }

    pub fn deactivate(&mut self) {
        self.state = EditorState::Idle;
        self.draft = None;
        self.grab = Point::ZERO;
    }

    /// Start dragging anchor `index`, pressed at widget-local `at`. The
    /// anchor keeps its offset from the pointer for the whole drag.
    pub fn begin_anchor_drag(&mut self, outline: &ShapeOutline, index: usize, at: Point) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(anchor) = outline.anchors.get(index) else {
            return false;
        };
        self.grab = at.sanitized().sub(*anchor);
        self.state = EditorState::AnchorDragging(index);
        self.draft = Some(outline.clone());
        true
    }

    /// Start dragging one handle of the active anchor, pressed at `at`.
    pub fn begin_handle_drag(&mut self, outline: &ShapeOutline, side: HandleSide, at: Point) -> bool {
        let EditorState::AnchorActive(index) = self.state else {
            return false;
        };
        let Some(tip) = outline.handle_position(index, side) else {
            return false;
        };
        self.grab = at.sanitized().sub(tip);
        self.state = EditorState::HandleDragging(index, side);
        self.draft = Some(outline.clone());
        true
    }

    /// Follow the pointer at `local` (widget-local coordinates). Anchor
    /// drags leave every handle alone; handle drags store the offset from
    /// the anchor.
    pub fn drag_to(&mut self, local: Point) -> bool {
        let local = local.sanitized().sub(self.grab);
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        match self.state {
            EditorState::AnchorDragging(i) => {
                let Some(anchor) = draft.anchors.get_mut(i) else {
                    return false;
                };
                *anchor = local;
            }
            EditorState::HandleDragging(i, side) => {
                let (Some(anchor), Some(handle)) = (draft.anchors.get(i), draft.handles.get_mut(i))
                else {
                    return false;
                };
                handle.set(side, local.sub(*anchor));
            }
            _ => return false,
        }
        log::trace!("shape_editor: {:?} → ({}, {})", self.state, local.x, local.y);
        true
    }

    /// Finish the drag and hand back the outline to commit. The anchor
    /// stays active.
    pub fn end(&mut self) -> Option<ShapeOutline> {
        let index = match self.state {
            EditorState::AnchorDragging(i) | EditorState::HandleDragging(i, _) => i,
            _ => return None,
        };
        self.state = EditorState::AnchorActive(index);
        self.grab = Point::ZERO;
        self.draft.take()
    }

    /// Discard any draft and return to `Idle`.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.state != EditorState::Idle;
        self.deactivate();
        was_open
    }
}

/// Canvas-local point → widget-local point. The widget box is the outline's
/// viewBox, one unit per logical pixel.
pub fn to_local(canvas: Point, widget_position: Point) -> Point {
    canvas.sub(widget_position)
}

/// Result of a refit that changed the widget box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefitOutcome {
    pub position: Point,
    pub size: Size,
    /// Offset applied to every anchor.
    pub shift: Point,
}

/// Fit the widget box around the sampled outline plus padding.
///
/// When the required size differs from `size` by more than the refit
/// epsilon, the anchors are translated so their bounds start at `padding`
/// and the widget position moves the opposite way. Rendered anchors stay
/// put unless the canvas edge forces a clamp.
pub fn refit(
    outline: &mut ShapeOutline,
    position: Point,
    size: Size,
    config: &ShapeConfig,
    bounds: Size,
) -> Option<RefitOutcome> {
    let b = outline.bounds(config.samples_per_segment)?;
    let pad = config.padding;
    let required = Size::new(b.width + 2.0 * pad, b.height + 2.0 * pad).max(config.min_size);
    if required.approx_eq(size, config.refit_epsilon) {
        return None;
    }

    let shift = Point::new(pad - b.x, pad - b.y);
    outline.translate(shift.x, shift.y);
    let (position, size) = geom::fit_in_bounds(position.sub(shift), required, config.min_size, bounds);
    log::debug!(
        "shape_editor: refit to {}×{} at ({}, {})",
        size.width,
        size.height,
        position.x,
        position.y
    );
    Some(RefitOutcome {
        position,
        size,
        shift,
    })
}
