//! Canvas engine: owns the widgets and routes input to them.
//!
//! Architecture:
//! ```text
//!   InputEvent ──▶ CanvasEngine::handle ──▶ hit_test ──▶ Slot
//!                        │                                 ├─ DraggableElement
//!                        │                                 └─ ShapeAnchorEditor
//!                        └──▶ Vec<CanvasEvent> (commits only)
//! ```
//!
//! Each widget lives in a slot next to its drag/resize element and, for
//! shapes, its anchor editor. At most one session (drag, resize, anchor or
//! handle drag) is open per engine. Commits update the widget record and
//! produce events; candidates only ever live inside the element or editor.

use crate::cancel::{CancelSource, CancelToken};
use crate::element::{DraggableElement, ElementCommit};
use crate::events::CanvasEvent;
use crate::hit::{self, HitPart, HitTarget};
use crate::input::InputEvent;
use crate::scheduler::RefitScheduler;
use crate::shape_editor::{self, ShapeAnchorEditor};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::surface::{CanvasSurface, DropItem};
use crate::viewport::DisplayTransform;
use crate::zorder::ZOrder;
use qc_core::geom::{Point, Rect, Size};
use qc_core::{
    CanvasError, EngineConfig, HeuristicMeasurer, ShapeOutline, TextFitEngine, TextMeasurer,
    Widget, WidgetContent, WidgetId,
};

struct Slot {
    widget: Widget,
    element: DraggableElement,
    editor: Option<ShapeAnchorEditor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionKind {
    Element,
    Shape,
}

struct Session {
    id: WidgetId,
    kind: SessionKind,
    token: CancelToken,
}

pub struct CanvasEngine<M = HeuristicMeasurer> {
    config: EngineConfig,
    fit: TextFitEngine<M>,
    slots: Vec<Slot>,
    zorder: ZOrder,
    selection: Option<WidgetId>,
    session: Option<Session>,
    display: DisplayTransform,
    scheduler: RefitScheduler,
    cancel: CancelSource,
    now_ms: f64,
}

impl CanvasEngine<HeuristicMeasurer> {
    /// Engine with default configuration and heuristic text measurement.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default(), HeuristicMeasurer)
    }
}

impl<M: TextMeasurer> CanvasEngine<M> {
    pub fn new(config: EngineConfig, measurer: M) -> Self {
        let fit = TextFitEngine::new(measurer, config.fit.clone());
        let scheduler = RefitScheduler::new(config.shape.refit_debounce_ms);
        Self {
            config,
            fit,
            slots: Vec::new(),
            zorder: ZOrder::default(),
            selection: None,
            session: None,
            display: DisplayTransform::default(),
            scheduler,
            cancel: CancelSource::new(),
            now_ms: 0.0,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn display(&self) -> DisplayTransform {
        self.display
    }

    /// Handle for the host's window-level release listeners.
    pub fn cancel_source(&self) -> CancelSource {
        self.cancel.clone()
    }

    pub fn selection(&self) -> Option<WidgetId> {
        self.selection
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a drag, resize or anchor session is open.
    pub fn is_interacting(&self) -> bool {
        self.session.is_some()
    }

    pub fn has_pending_refit(&self, id: WidgetId) -> bool {
        self.scheduler.is_pending(id)
    }

    /// Earliest refit deadline, for hosts that arm a timer.
    pub fn next_deadline(&self) -> Option<f64> {
        self.scheduler.next_deadline()
    }

    pub fn widget(&self, id: WidgetId) -> Result<&Widget, CanvasError> {
        self.slot(id).map(|s| &s.widget)
    }

    /// Committed widgets in insertion order.
    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.slots.iter().map(|s| &s.widget)
    }

    /// Committed widgets back-to-front.
    pub fn paint_order(&self) -> Vec<&Widget> {
        let mut order: Vec<(usize, &Widget)> = self.widgets().enumerate().collect();
        order.sort_by_key(|(i, w)| (w.z_index, *i));
        order.into_iter().map(|(_, w)| w).collect()
    }

    /// Records to persist.
    pub fn snapshot(&self) -> Vec<Widget> {
        self.widgets().cloned().collect()
    }

    /// Rectangle to render: the drag/resize candidate while a session is
    /// open on this widget.
    pub fn display_rect(&self, id: WidgetId) -> Result<Rect, CanvasError> {
        self.slot(id).map(|s| s.element.display_rect())
    }

    /// Outline to render: the draft during an anchor/handle drag.
    pub fn display_outline(&self, id: WidgetId) -> Result<Option<&ShapeOutline>, CanvasError> {
        let slot = self.slot(id)?;
        let draft = slot.editor.as_ref().and_then(ShapeAnchorEditor::draft);
        Ok(draft.or_else(|| slot.widget.shape().map(|s| &s.outline)))
    }

    /// SVG path of the rendered outline (empty for non-shapes).
    pub fn shape_svg(&self, id: WidgetId) -> Result<String, CanvasError> {
        Ok(self
            .display_outline(id)?
            .map(ShapeOutline::to_svg)
            .unwrap_or_default())
    }

    /// Anchor whose handles are shown on `id`.
    pub fn active_anchor(&self, id: WidgetId) -> Option<usize> {
        self.slot(id)
            .ok()?
            .editor
            .as_ref()
            .and_then(ShapeAnchorEditor::active_anchor)
    }

    // ─── Setup ───────────────────────────────────────────────────────────

    /// Replace every widget. Records are sanitized, promoted to their
    /// minimums and clamped into the canvas; duplicate ids keep the first.
    pub fn load(&mut self, widgets: Vec<Widget>) {
        self.slots.clear();
        self.session = None;
        self.selection = None;
        self.scheduler.clear();
        let mut max_z = 0;
        for widget in widgets {
            if widget.id.is_blank() {
                log::warn!("engine: skipping widget without id");
                continue;
            }
            if self.slots.iter().any(|s| s.widget.id == widget.id) {
                log::warn!("engine: duplicate widget id {}, keeping the first", widget.id);
                continue;
            }
            max_z = max_z.max(widget.z_index);
            let slot = self.make_slot(widget);
            self.slots.push(slot);
        }
        self.zorder = ZOrder::from_max(max_z);
        log::debug!("engine: loaded {} widgets", self.slots.len());
    }

    /// Report where the canvas sits on screen. Call on every render.
    pub fn set_display(&mut self, origin: Point, scale: f64) {
        self.display = DisplayTransform::new(origin, scale);
    }

    /// Limit how far down `id` may be resized.
    pub fn set_max_bottom(&mut self, id: WidgetId, max_bottom: Option<f64>) -> Result<(), CanvasError> {
        self.slot_mut(id)?.element.set_max_bottom(max_bottom);
        Ok(())
    }

    fn make_slot(&self, mut widget: Widget) -> Slot {
        widget.position = widget.position.sanitized();
        let raw_size = widget.size.sanitized();
        let min = min_size(&self.fit, &self.config, &widget, raw_size.width);
        let element = DraggableElement::new(widget.position, raw_size, min, self.config.canvas.bounds());
        widget.position = element.position();
        widget.size = element.size();

        let size = widget.size;
        let padding = self.config.shape.padding;
        if let Some(shape) = widget.shape_mut() {
            if shape.outline.is_valid() {
                shape.outline.rescale(raw_size, size);
            }
            shape.outline = shape.outline.clone().sanitized(size, padding);
            if !shape.stroke_width.is_finite() {
                shape.stroke_width = 0.0;
            }
        }

        let mut slot = Slot {
            editor: widget.shape().map(|_| ShapeAnchorEditor::new()),
            widget,
            element,
        };
        settle_text(&self.fit, &self.config, &mut slot);
        slot
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route one input event. Returns the commits it produced.
    pub fn handle(&mut self, event: InputEvent) -> Vec<CanvasEvent> {
        if self.session.as_ref().is_some_and(|s| s.token.is_cancelled()) {
            log::debug!("engine: session cancelled by host");
            self.abort_session();
        }

        match event {
            InputEvent::PointerDown { x, y, interactive } => {
                self.pointer_down(Point::new(x, y), interactive)
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer_move(Point::new(x, y));
                Vec::new()
            }
            InputEvent::PointerUp { x, y } => {
                self.pointer_move(Point::new(x, y));
                self.pointer_up()
            }
            InputEvent::PointerCancel => {
                self.cancel_interaction();
                Vec::new()
            }
            InputEvent::Key { key, modifiers } => match ShortcutMap::resolve(&key, modifiers) {
                Some(ShortcutAction::CancelInteraction) => {
                    if !self.cancel_interaction() {
                        self.deselect();
                    }
                    Vec::new()
                }
                Some(ShortcutAction::DeleteSelected) => match self.selection {
                    Some(id) if self.session.is_none() => self.delete(id).unwrap_or_default(),
                    _ => Vec::new(),
                },
                Some(ShortcutAction::BringToFront) => match self.selection {
                    Some(id) => self.raise(id).into_iter().collect(),
                    None => Vec::new(),
                },
                None => Vec::new(),
            },
        }
    }

    fn pointer_down(&mut self, client: Point, interactive: bool) -> Vec<CanvasEvent> {
        if self.session.is_some() {
            return Vec::new();
        }
        let p = self.display.client_to_canvas(client);
        let Some(hit) = self.hit_test(p) else {
            self.deselect();
            return Vec::new();
        };

        let mut events: Vec<CanvasEvent> = self.raise(hit.id).into_iter().collect();
        self.select(hit.id);
        if interactive {
            return events;
        }

        match hit.part {
            HitPart::DeleteButton => {
                events.extend(self.delete(hit.id).unwrap_or_default());
            }
            HitPart::ResizeHandle => {
                self.open_element_session(hit.id, p, true);
            }
            HitPart::Body => {
                let Ok(slot) = self.slot_mut(hit.id) else {
                    return events;
                };
                // Clicking the body of a shape with an active anchor only
                // leaves anchor mode; the next press drags.
                if let Some(editor) = slot.editor.as_mut()
                    && editor.active_anchor().is_some()
                {
                    editor.deactivate();
                    return events;
                }
                self.open_element_session(hit.id, p, false);
            }
            HitPart::Anchor(index) => {
                let handle_length = self.config.shape.handle_length;
                let token = self.cancel.token();
                let Ok(slot) = self.slot_mut(hit.id) else {
                    return events;
                };
                let local = shape_editor::to_local(p, slot.widget.position);
                let (Some(editor), Some(shape)) = (slot.editor.as_mut(), slot.widget.shape_mut()) else {
                    return events;
                };
                let seeded = editor.activate(&mut shape.outline, index, handle_length);
                editor.begin_anchor_drag(&shape.outline, index, local);
                if seeded {
                    events.extend(CanvasEvent::shape_changed(&slot.widget));
                    self.scheduler.request(hit.id, self.now_ms);
                }
                self.session = Some(Session {
                    id: hit.id,
                    kind: SessionKind::Shape,
                    token,
                });
            }
            HitPart::Handle(_, side) => {
                let token = self.cancel.token();
                let Ok(slot) = self.slot_mut(hit.id) else {
                    return events;
                };
                let local = shape_editor::to_local(p, slot.widget.position);
                let (Some(editor), Some(shape)) = (slot.editor.as_mut(), slot.widget.shape()) else {
                    return events;
                };
                if editor.begin_handle_drag(&shape.outline, side, local) {
                    self.session = Some(Session {
                        id: hit.id,
                        kind: SessionKind::Shape,
                        token,
                    });
                }
            }
        }
        events
    }

    fn open_element_session(&mut self, id: WidgetId, p: Point, resize: bool) {
        let token = self.cancel.token();
        let Ok(slot) = self.slot_mut(id) else {
            return;
        };
        let opened = if resize {
            slot.element.begin_resize(p)
        } else {
            slot.element.begin_drag(p)
        };
        if opened {
            self.session = Some(Session {
                id,
                kind: SessionKind::Element,
                token,
            });
        }
    }

    fn pointer_move(&mut self, client: Point) {
        let Some((id, kind)) = self.session.as_ref().map(|s| (s.id, s.kind)) else {
            return;
        };
        let p = self.display.client_to_canvas(client);
        let Ok(slot) = self.slot_mut(id) else {
            return;
        };
        match kind {
            SessionKind::Element => {
                if slot.element.drag_to(p).is_none() {
                    slot.element.resize_to(p);
                }
            }
            SessionKind::Shape => {
                let local = shape_editor::to_local(p, slot.widget.position);
                if let Some(editor) = slot.editor.as_mut() {
                    editor.drag_to(local);
                }
            }
        }
    }

    fn pointer_up(&mut self) -> Vec<CanvasEvent> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };
        match session.kind {
            SessionKind::Element => self.commit_element(session.id),
            SessionKind::Shape => self.commit_shape_edit(session.id),
        }
    }

    fn commit_element(&mut self, id: WidgetId) -> Vec<CanvasEvent> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        let slot = &mut self.slots[idx];
        let Some(commit) = slot.element.end() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        match commit {
            ElementCommit::Moved(position) => {
                if position != slot.widget.position {
                    slot.widget.position = position;
                    events.push(CanvasEvent::moved(&slot.widget));
                }
            }
            ElementCommit::Resized { position, size } => {
                let (old_position, old_size) = (slot.widget.position, slot.widget.size);
                slot.widget.position = position;
                slot.widget.size = size;
                settle_text(&self.fit, &self.config, slot);
                let new_size = slot.widget.size;
                if let Some(shape) = slot.widget.shape_mut() {
                    shape.outline.rescale(old_size, new_size);
                }

                if slot.widget.position != old_position {
                    events.push(CanvasEvent::moved(&slot.widget));
                }
                events.push(CanvasEvent::resized(&slot.widget));
                events.extend(CanvasEvent::shape_changed(&slot.widget));
            }
        }
        events
    }

    fn commit_shape_edit(&mut self, id: WidgetId) -> Vec<CanvasEvent> {
        let Ok(slot) = self.slot_mut(id) else {
            return Vec::new();
        };
        let Some(draft) = slot.editor.as_mut().and_then(ShapeAnchorEditor::end) else {
            return Vec::new();
        };
        let Some(shape) = slot.widget.shape_mut() else {
            return Vec::new();
        };
        // A click that only activated the anchor commits nothing.
        if shape.outline == draft {
            return Vec::new();
        }
        shape.outline = draft;
        let events: Vec<CanvasEvent> = CanvasEvent::shape_changed(&slot.widget).into_iter().collect();
        self.scheduler.request(id, self.now_ms);
        events
    }

    // ─── Cancellation ────────────────────────────────────────────────────

    /// Abandon the open session, keeping the last committed geometry.
    /// Returns whether a session was open.
    pub fn cancel_interaction(&mut self) -> bool {
        let open = self.session.is_some();
        self.abort_session();
        // An active anchor is also an open edit for Escape purposes.
        let mut deactivated = false;
        for slot in &mut self.slots {
            if let Some(editor) = slot.editor.as_mut() {
                deactivated |= editor.cancel();
            }
        }
        open || deactivated
    }

    fn abort_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let Ok(slot) = self.slot_mut(session.id) else {
            return;
        };
        match session.kind {
            SessionKind::Element => {
                slot.element.cancel();
            }
            SessionKind::Shape => {
                if let Some(editor) = slot.editor.as_mut() {
                    editor.cancel();
                }
            }
        }
        log::debug!("engine: session on {} abandoned", session.id);
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Place a new widget or relocate an existing one. Returns no events
    /// when the drop is rejected (widget cap reached, unknown widget).
    pub fn drop_widget(&mut self, client: Point, item: DropItem) -> Vec<CanvasEvent> {
        let surface = CanvasSurface::new(&self.config.canvas);
        let Some(position) = surface.resolve_drop(client, &self.display, &item, self.slots.len()) else {
            return Vec::new();
        };
        let size = surface.item_size(&item);

        if let Some(id) = item.existing {
            let Ok(slot) = self.slot_mut(id) else {
                log::debug!("engine: relocation of unknown widget {id} ignored");
                return Vec::new();
            };
            let (position, _) = slot.element.set_geometry(position, slot.widget.size);
            if position == slot.widget.position {
                return Vec::new();
            }
            slot.widget.position = position;
            return vec![CanvasEvent::moved(&slot.widget)];
        }

        let id = WidgetId::with_prefix(&item.widget_type);
        let content = item.content.unwrap_or_default();
        let mut widget = Widget::new(id, item.widget_type, position, size).with_content(content);
        widget.z_index = self.zorder.bump();
        let slot = self.make_slot(widget);
        log::debug!(
            "engine: created {} at ({}, {})",
            slot.widget.id,
            slot.widget.position.x,
            slot.widget.position.y
        );
        let event = CanvasEvent::Created {
            widget: slot.widget.clone(),
        };
        self.slots.push(slot);
        vec![event]
    }

    /// Replace the text of a text widget. Input is capped, the box grows to
    /// the new minimums, and the font is refitted.
    pub fn set_text(&mut self, id: WidgetId, text: &str) -> Result<Vec<CanvasEvent>, CanvasError> {
        let idx = self.index_of(id).ok_or(CanvasError::UnknownWidget(id))?;
        let text = self.fit.truncate_input(text).to_string();
        let slot = &mut self.slots[idx];
        let before = (slot.widget.position, slot.widget.size);
        let Some(style) = slot.widget.text_style_mut() else {
            log::debug!("engine: set_text on non-text widget {id} ignored");
            return Ok(Vec::new());
        };
        style.text = text;
        let font_before = style.applied_font_size;
        settle_text(&self.fit, &self.config, slot);

        let mut events = Vec::new();
        if slot.widget.position != before.0 {
            events.push(CanvasEvent::moved(&slot.widget));
        }
        let font_after = slot.widget.text_style().and_then(|s| s.applied_font_size);
        if slot.widget.size != before.1 || font_after != font_before {
            events.push(CanvasEvent::resized(&slot.widget));
        }
        Ok(events)
    }

    /// Change a shape's corner count (clamped), keeping authored anchors.
    pub fn set_corner_count(&mut self, id: WidgetId, n: usize) -> Result<Vec<CanvasEvent>, CanvasError> {
        let idx = self.index_of(id).ok_or(CanvasError::UnknownWidget(id))?;
        let n = self.config.shape.clamp_corners(n);
        let padding = self.config.shape.padding;
        if self.session.as_ref().is_some_and(|s| s.id == id) {
            self.abort_session();
        }
        let slot = &mut self.slots[idx];
        let size = slot.widget.size;
        let Some(shape) = slot.widget.shape_mut() else {
            log::debug!("engine: set_corner_count on non-shape widget {id} ignored");
            return Ok(Vec::new());
        };
        if shape.outline.len() == n {
            return Ok(Vec::new());
        }
        shape.outline.set_corner_count(n, size, padding);
        if let Some(editor) = slot.editor.as_mut() {
            editor.deactivate();
        }
        let events: Vec<CanvasEvent> = CanvasEvent::shape_changed(&slot.widget).into_iter().collect();
        self.scheduler.request(id, self.now_ms);
        Ok(events)
    }

    /// Remove a widget and everything attached to it.
    pub fn delete(&mut self, id: WidgetId) -> Result<Vec<CanvasEvent>, CanvasError> {
        let idx = self.index_of(id).ok_or(CanvasError::UnknownWidget(id))?;
        if self.session.as_ref().is_some_and(|s| s.id == id) {
            self.session = None;
        }
        self.slots.remove(idx);
        self.scheduler.cancel(id);
        if self.selection == Some(id) {
            self.selection = None;
        }
        log::debug!("engine: deleted {id}");
        Ok(vec![CanvasEvent::Deleted { id }])
    }

    /// Advance the host clock without running refits. Hosts that arm a
    /// timer at `next_deadline` call this before input so that refit
    /// requests are stamped with the time of the edit. Never goes back.
    pub fn set_clock(&mut self, now_ms: f64) {
        if now_ms.is_finite() {
            self.now_ms = self.now_ms.max(now_ms);
        }
    }

    /// Advance the host clock and run every refit that came due.
    pub fn tick(&mut self, now_ms: f64) -> Vec<CanvasEvent> {
        self.set_clock(now_ms);
        let mut events = Vec::new();
        for id in self.scheduler.due(self.now_ms) {
            events.extend(self.refit_now(id));
        }
        events
    }

    /// Refit a shape's box to its outline immediately.
    pub fn refit_now(&mut self, id: WidgetId) -> Vec<CanvasEvent> {
        // A refit must not move the ground under an open anchor drag.
        if self.session.as_ref().is_some_and(|s| s.id == id) {
            self.scheduler.request(id, self.now_ms);
            return Vec::new();
        }
        let bounds = self.config.canvas.bounds();
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        let slot = &mut self.slots[idx];
        let (position, size) = (slot.widget.position, slot.widget.size);
        let Some(shape) = slot.widget.shape_mut() else {
            return Vec::new();
        };
        let Some(outcome) =
            shape_editor::refit(&mut shape.outline, position, size, &self.config.shape, bounds)
        else {
            return Vec::new();
        };
        let (position, size) = slot.element.set_geometry(outcome.position, outcome.size);
        slot.widget.position = position;
        slot.widget.size = size;

        if position != outcome.position || size != outcome.size {
            log::debug!("engine: refit of {id} clamped at canvas edge");
        }
        let mut events = vec![CanvasEvent::moved(&slot.widget), CanvasEvent::resized(&slot.widget)];
        events.extend(CanvasEvent::shape_changed(&slot.widget));
        events
    }

    // ─── Helpers ─────────────────────────────────────────────────────────

    fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.slots.iter().position(|s| s.widget.id == id)
    }

    fn slot(&self, id: WidgetId) -> Result<&Slot, CanvasError> {
        self.slots
            .iter()
            .find(|s| s.widget.id == id)
            .ok_or(CanvasError::UnknownWidget(id))
    }

    fn slot_mut(&mut self, id: WidgetId) -> Result<&mut Slot, CanvasError> {
        self.slots
            .iter_mut()
            .find(|s| s.widget.id == id)
            .ok_or(CanvasError::UnknownWidget(id))
    }

    fn hit_test(&self, p: Point) -> Option<hit::Hit> {
        let targets: Vec<HitTarget<'_>> = self
            .slots
            .iter()
            .map(|s| HitTarget {
                widget: &s.widget,
                rect: s.element.display_rect(),
                editing: s.editor.is_some() && self.selection == Some(s.widget.id),
                active_anchor: s.editor.as_ref().and_then(ShapeAnchorEditor::active_anchor),
            })
            .collect();
        hit::hit_test(&targets, p, &self.config.canvas, &self.config.shape)
    }

    /// Bump `id` to the top of the stack.
    fn raise(&mut self, id: WidgetId) -> Option<CanvasEvent> {
        let z = self.zorder.bump();
        let slot = self.slot_mut(id).ok()?;
        slot.widget.z_index = z;
        Some(CanvasEvent::ZOrderChanged { id, z_index: z })
    }

    fn select(&mut self, id: WidgetId) {
        if self.selection == Some(id) {
            return;
        }
        self.deselect();
        self.selection = Some(id);
    }

    fn deselect(&mut self) {
        if let Some(prev) = self.selection.take()
            && let Ok(slot) = self.slot_mut(prev)
            && let Some(editor) = slot.editor.as_mut()
        {
            editor.deactivate();
        }
    }
}

/// Minimum box for a widget laid out `width` wide.
fn min_size<M: TextMeasurer>(
    fit: &TextFitEngine<M>,
    config: &EngineConfig,
    widget: &Widget,
    width: f64,
) -> Size {
    match &widget.content {
        WidgetContent::Text(style) => fit.min_size(style, width),
        WidgetContent::Shape(_) => config.shape.min_size,
        WidgetContent::Plain { .. } => config.canvas.min_widget_size,
    }
}

/// Bring a text widget in line with its content: promote the box to the
/// minimums at its current width, refit the font, and grow the height when
/// even the floor font overflows. No-op for other widgets.
fn settle_text<M: TextMeasurer>(fit: &TextFitEngine<M>, config: &EngineConfig, slot: &mut Slot) {
    if slot.widget.text_style().is_none() {
        return;
    }
    let min = min_size(fit, config, &slot.widget, slot.widget.size.width);
    slot.element.set_min_size(min);
    slot.widget.position = slot.element.position();
    slot.widget.size = slot.element.size();

    let size = slot.widget.size;
    let Some(style) = slot.widget.text_style_mut() else {
        return;
    };
    let result = fit.fit(size, style);
    style.applied_font_size = (result.font_size != style.base_font_size).then_some(result.font_size);
    if result.required_height > size.height {
        let (position, size) = slot
            .element
            .set_geometry(slot.widget.position, Size::new(size.width, result.required_height));
        slot.widget.position = position;
        slot.widget.size = size;
    }
}
