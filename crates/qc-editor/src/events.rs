//! Outbound notifications.
//!
//! Every committed change produces a `CanvasEvent`. Candidate geometry
//! during a drag never does. Hosts either consume the returned batches
//! directly or implement `CanvasHost` and let `dispatch` route them.

use qc_core::{HandlePair, Point, ShapeData, Widget, WidgetId};
use serde::Serialize;
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum CanvasEvent {
    Moved {
        id: WidgetId,
        #[serde(rename = "type")]
        widget_type: String,
        x: f64,
        y: f64,
    },
    #[serde(rename_all = "camelCase")]
    Resized {
        id: WidgetId,
        width: f64,
        height: f64,
        /// Fitted font size, for text widgets.
        #[serde(skip_serializing_if = "Option::is_none")]
        font_size: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    ShapeChanged {
        id: WidgetId,
        anchors: SmallVec<[Point; 8]>,
        handles: SmallVec<[HandlePair; 8]>,
        width: f64,
        height: f64,
        fill: String,
        stroke: String,
        stroke_width: f64,
    },
    Deleted {
        id: WidgetId,
    },
    Created {
        widget: Widget,
    },
    #[serde(rename_all = "camelCase")]
    ZOrderChanged {
        id: WidgetId,
        z_index: i64,
    },
}

impl CanvasEvent {
    pub fn moved(widget: &Widget) -> Self {
        Self::Moved {
            id: widget.id,
            widget_type: widget.widget_type.clone(),
            x: widget.position.x,
            y: widget.position.y,
        }
    }

    pub fn resized(widget: &Widget) -> Self {
        Self::Resized {
            id: widget.id,
            width: widget.size.width,
            height: widget.size.height,
            font_size: widget.text_style().and_then(|s| s.applied_font_size),
        }
    }

    /// `None` for widgets without an outline.
    pub fn shape_changed(widget: &Widget) -> Option<Self> {
        let ShapeData {
            outline,
            fill,
            stroke,
            stroke_width,
        } = widget.shape()?;
        Some(Self::ShapeChanged {
            id: widget.id,
            anchors: outline.anchors.clone(),
            handles: outline.handles.clone(),
            width: widget.size.width,
            height: widget.size.height,
            fill: fill.clone(),
            stroke: stroke.clone(),
            stroke_width: *stroke_width,
        })
    }

    /// The widget this event is about.
    pub fn id(&self) -> WidgetId {
        match self {
            Self::Moved { id, .. }
            | Self::Resized { id, .. }
            | Self::ShapeChanged { id, .. }
            | Self::Deleted { id }
            | Self::ZOrderChanged { id, .. } => *id,
            Self::Created { widget } => widget.id,
        }
    }
}

/// Receiver for engine notifications. Only `emit` is required; the typed
/// hooks forward to it unless overridden.
pub trait CanvasHost {
    fn emit(&mut self, event: CanvasEvent);

    fn on_move(&mut self, event: CanvasEvent) {
        self.emit(event);
    }

    fn on_resize(&mut self, event: CanvasEvent) {
        self.emit(event);
    }

    fn on_shape_data_change(&mut self, event: CanvasEvent) {
        self.emit(event);
    }

    fn on_delete(&mut self, event: CanvasEvent) {
        self.emit(event);
    }

    fn on_create(&mut self, event: CanvasEvent) {
        self.emit(event);
    }

    fn on_z_order_change(&mut self, event: CanvasEvent) {
        self.emit(event);
    }
}

impl CanvasHost for Vec<CanvasEvent> {
    fn emit(&mut self, event: CanvasEvent) {
        self.push(event);
    }
}

/// Route a batch to the matching hooks, in order.
pub fn dispatch<H: CanvasHost + ?Sized>(host: &mut H, events: impl IntoIterator<Item = CanvasEvent>) {
    for event in events {
        match event {
            CanvasEvent::Moved { .. } => host.on_move(event),
            CanvasEvent::Resized { .. } => host.on_resize(event),
            CanvasEvent::ShapeChanged { .. } => host.on_shape_data_change(event),
            CanvasEvent::Deleted { .. } => host.on_delete(event),
            CanvasEvent::Created { .. } => host.on_create(event),
            CanvasEvent::ZOrderChanged { .. } => host.on_z_order_change(event),
        }
    }
}
