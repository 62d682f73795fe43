//! WASM bridge for QC: exposes the canvas engine to the authoring tool.
//!
//! Compiled via `wasm-pack build --target web`. Everything crossing the
//! boundary is JSON: widget records in, `CanvasEvent` batches out.

mod console;
mod measure;

pub use measure::CanvasMeasurer;

use qc_core::{CanvasError, EngineConfig, Point, Widget, WidgetId};
use qc_editor::{CanvasEngine, CanvasEvent, DropItem, InputEvent, Modifiers};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// The WASM-facing canvas controller.
///
/// Every mutating call returns the JSON array of events it produced
/// (possibly `[]`); the host persists records from those events.
#[wasm_bindgen]
pub struct QuizCanvas {
    engine: CanvasEngine<CanvasMeasurer>,
}

#[wasm_bindgen]
impl QuizCanvas {
    /// Create a controller. `config_json` is a partial `EngineConfig`
    /// override; pass `""` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<QuizCanvas, JsValue> {
        console::init(log::LevelFilter::Warn);
        let config = parse_config(config_json).map_err(to_js)?;
        Ok(Self::with_measurer(config, CanvasMeasurer::offscreen()))
    }

    /// Measure text on the host's own `<canvas>` instead of an offscreen one.
    /// Open interactions and pending refits are dropped.
    pub fn attach_canvas(&mut self, canvas: &HtmlCanvasElement) {
        let config = self.engine.config().clone();
        let widgets = self.engine.snapshot();
        self.engine = CanvasEngine::new(config, CanvasMeasurer::from_canvas(canvas));
        self.engine.load(widgets);
    }

    /// Console verbosity: `error`, `warn`, `info`, `debug` or `trace`.
    pub fn set_log_level(&self, level: &str) {
        console::init(console::parse_level(level));
    }

    /// Replace every widget with the records in `widgets_json` (an array).
    /// Returns the number of widgets kept.
    pub fn load(&mut self, widgets_json: &str) -> Result<usize, JsValue> {
        self.load_json(widgets_json).map_err(to_js)
    }

    /// Report where the canvas sits on screen (bounding rect origin and
    /// logical→rendered scale).
    pub fn set_display(&mut self, left: f64, top: f64, scale: f64) {
        self.engine.set_display(Point::new(left, top), scale);
    }

    pub fn set_max_bottom(&mut self, id: &str, max_bottom: Option<f64>) -> Result<(), JsValue> {
        self.engine
            .set_max_bottom(WidgetId::intern(id), max_bottom)
            .map_err(to_js)
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// `interactive` marks presses on inputs inside the widget body; they
    /// select and raise but never start a drag.
    pub fn pointer_down(&mut self, x: f64, y: f64, interactive: bool) -> String {
        self.handle(InputEvent::PointerDown { x, y, interactive })
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> String {
        self.handle(InputEvent::pointer_move(x, y))
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> String {
        self.handle(InputEvent::pointer_up(x, y))
    }

    pub fn pointer_cancel(&mut self) -> String {
        self.handle(InputEvent::PointerCancel)
    }

    pub fn key(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> String {
        self.handle(InputEvent::Key {
            key: key.to_string(),
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        })
    }

    /// Route one `InputEvent` given as JSON (`{"kind": "pointerDown", ...}`).
    pub fn input(&mut self, event_json: &str) -> Result<String, JsValue> {
        let event: InputEvent = serde_json::from_str(event_json)
            .map_err(CanvasError::from)
            .map_err(to_js)?;
        Ok(self.handle(event))
    }

    /// Abandon the open interaction. Wire to window-level release and
    /// `touchcancel` listeners.
    pub fn cancel_interaction(&mut self) -> bool {
        self.engine.cancel_interaction()
    }

    pub fn is_interacting(&self) -> bool {
        self.engine.is_interacting()
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Drop a palette item or an existing widget at a client point.
    /// `item_json` is a `DropItem`. `[]` means the drop was rejected.
    pub fn drop_widget(&mut self, x: f64, y: f64, item_json: &str) -> Result<String, JsValue> {
        self.drop_json(x, y, item_json).map_err(to_js)
    }

    pub fn set_text(&mut self, id: &str, text: &str) -> Result<String, JsValue> {
        self.engine
            .set_text(WidgetId::intern(id), text)
            .map(|events| events_json(&events))
            .map_err(to_js)
    }

    pub fn set_corner_count(&mut self, id: &str, corners: u32) -> Result<String, JsValue> {
        self.stamp();
        self.engine
            .set_corner_count(WidgetId::intern(id), corners as usize)
            .map(|events| events_json(&events))
            .map_err(to_js)
    }

    pub fn delete(&mut self, id: &str) -> Result<String, JsValue> {
        self.engine
            .delete(WidgetId::intern(id))
            .map(|events| events_json(&events))
            .map_err(to_js)
    }

    /// Advance the engine clock (`performance.now()`) without running
    /// refits. Input and commands stamp the clock themselves when the page
    /// exposes `performance`.
    pub fn set_clock(&mut self, now_ms: f64) {
        self.engine.set_clock(now_ms);
    }

    /// Run refits that came due by `now_ms` (`performance.now()`).
    pub fn tick(&mut self, now_ms: f64) -> String {
        events_json(&self.engine.tick(now_ms))
    }

    /// When to call `tick` next, if anything is pending.
    pub fn next_deadline(&self) -> Option<f64> {
        self.engine.next_deadline()
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// All records, for persistence.
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.engine.snapshot()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn widget(&self, id: &str) -> Result<String, JsValue> {
        self.widget_json(WidgetId::intern(id)).map_err(to_js)
    }

    /// Widget ids back-to-front.
    pub fn paint_order(&self) -> js_sys::Array {
        self.engine
            .paint_order()
            .into_iter()
            .map(|w| JsValue::from_str(w.id.as_str()))
            .collect()
    }

    pub fn selection(&self) -> Option<String> {
        self.engine.selection().map(|id| id.as_str().to_string())
    }

    /// Rectangle to render, including an in-progress drag or resize.
    pub fn display_rect(&self, id: &str) -> Result<String, JsValue> {
        let rect = self.engine.display_rect(WidgetId::intern(id)).map_err(to_js)?;
        Ok(serde_json::json!({
            "x": rect.x,
            "y": rect.y,
            "width": rect.width,
            "height": rect.height,
        })
        .to_string())
    }

    /// SVG `d` attribute for a shape, including an in-progress anchor drag.
    pub fn shape_svg(&self, id: &str) -> Result<String, JsValue> {
        self.engine.shape_svg(WidgetId::intern(id)).map_err(to_js)
    }

    pub fn active_anchor(&self, id: &str) -> Option<u32> {
        self.engine
            .active_anchor(WidgetId::intern(id))
            .map(|i| i as u32)
    }
}

impl QuizCanvas {
    fn with_measurer(config: EngineConfig, measurer: CanvasMeasurer) -> Self {
        Self {
            engine: CanvasEngine::new(config, measurer),
        }
    }

    fn handle(&mut self, event: InputEvent) -> String {
        self.stamp();
        events_json(&self.engine.handle(event))
    }

    /// Refit requests are due one debounce window after the edit, so the
    /// clock has to be current before anything edits a shape.
    fn stamp(&mut self) {
        if let Some(now) = host_now() {
            self.engine.set_clock(now);
        }
    }

    fn load_json(&mut self, json: &str) -> Result<usize, CanvasError> {
        let widgets: Vec<Widget> = serde_json::from_str(json)?;
        self.engine.load(widgets);
        Ok(self.engine.len())
    }

    fn drop_json(&mut self, x: f64, y: f64, item_json: &str) -> Result<String, CanvasError> {
        let item: DropItem = serde_json::from_str(item_json)?;
        Ok(events_json(&self.engine.drop_widget(Point::new(x, y), item)))
    }

    fn widget_json(&self, id: WidgetId) -> Result<String, CanvasError> {
        Ok(serde_json::to_string(self.engine.widget(id)?)?)
    }
}

#[cfg(target_arch = "wasm32")]
fn host_now() -> Option<f64> {
    web_sys::window()?.performance().map(|p| p.now())
}

#[cfg(not(target_arch = "wasm32"))]
fn host_now() -> Option<f64> {
    None
}

fn parse_config(json: &str) -> Result<EngineConfig, CanvasError> {
    if json.trim().is_empty() {
        return Ok(EngineConfig::default());
    }
    EngineConfig::from_json(json)
}

fn events_json(events: &[CanvasEvent]) -> String {
    serde_json::to_string(events).unwrap_or_else(|_| "[]".to_string())
}

fn to_js(err: CanvasError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ─── Standalone validation (no canvas needed) ────────────────────────────

/// Validate one stored widget record. Returns JSON: `{"ok":true}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_widget(json: &str) -> String {
    match Widget::from_json(json) {
        Ok(_) => r#"{"ok":true}"#.to_string(),
        Err(e) => serde_json::json!({"ok": false, "error": e.to_string()}).to_string(),
    }
}
