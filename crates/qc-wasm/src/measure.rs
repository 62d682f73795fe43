//! Text measurement through a browser 2D context.

use qc_core::{FontSpec, TextMeasurer};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, OffscreenCanvasRenderingContext2d};

enum Context {
    Onscreen(CanvasRenderingContext2d),
    Offscreen(OffscreenCanvasRenderingContext2d),
}

/// `TextMeasurer` backed by `measureText`. Without a context every
/// measurement is `None` and the fit engine falls back to nominal sizes.
#[derive(Default)]
pub struct CanvasMeasurer {
    ctx: Option<Context>,
}

impl CanvasMeasurer {
    /// Measure on a detached 1×1 offscreen canvas.
    pub fn offscreen() -> Self {
        let ctx = offscreen_context();
        if ctx.is_none() {
            log::warn!("measure: no 2d context, text fitting uses nominal sizes");
        }
        Self { ctx }
    }

    /// Measure on the context of an existing `<canvas>`.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Self {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
            .map(Context::Onscreen);
        Self { ctx }
    }

    pub fn is_available(&self) -> bool {
        self.ctx.is_some()
    }
}

#[cfg(target_arch = "wasm32")]
fn offscreen_context() -> Option<Context> {
    let canvas = web_sys::OffscreenCanvas::new(1, 1).ok()?;
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|obj| obj.dyn_into::<OffscreenCanvasRenderingContext2d>().ok())
        .map(Context::Offscreen)
}

#[cfg(not(target_arch = "wasm32"))]
fn offscreen_context() -> Option<Context> {
    None
}

impl TextMeasurer for CanvasMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> Option<f64> {
        let css = font.css();
        let width = match self.ctx.as_ref()? {
            Context::Onscreen(ctx) => {
                ctx.set_font(&css);
                ctx.measure_text(text).ok()?.width()
            }
            Context::Offscreen(ctx) => {
                ctx.set_font(&css);
                ctx.measure_text(text).ok()?.width()
            }
        };
        width.is_finite().then_some(width)
    }
}
