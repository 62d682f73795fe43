//! Engine configuration.
//!
//! Every tuned constant of the layout engine lives here as a documented
//! default. The host can override any subset by passing JSON; missing keys
//! keep their defaults.

use crate::error::CanvasError;
use crate::geom::Size;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── Canvas ──────────────────────────────────────────────────────────────

/// The fixed logical surface and its widget rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Logical width. Default: **800**.
    pub width: f64,
    /// Logical height. Default: **600**.
    pub height: f64,
    /// Maximum number of widgets a canvas accepts from drops. Default: **30**.
    pub max_widgets: usize,
    /// Size for widget types without an entry in `type_sizes`. Default: **128×56**.
    pub default_widget_size: Size,
    /// Declared default size per widget type.
    pub type_sizes: HashMap<String, Size>,
    /// Floor for widgets that carry neither text nor a shape. Default: **24×24**.
    pub min_widget_size: Size,
    /// Side of the square bottom-right resize handle, in logical px. Default: **12**.
    pub resize_handle_size: f64,
    /// Side of the square top-right delete button, in logical px. Default: **16**.
    pub delete_button_size: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let type_sizes = [
            ("true_false", Size::new(220.0, 96.0)),
            ("multiple_choice", Size::new(260.0, 180.0)),
            ("slider", Size::new(240.0, 64.0)),
            ("text", Size::new(160.0, 56.0)),
            ("shape", Size::new(120.0, 120.0)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            width: 800.0,
            height: 600.0,
            max_widgets: 30,
            default_widget_size: Size::new(128.0, 56.0),
            type_sizes,
            min_widget_size: Size::new(24.0, 24.0),
            resize_handle_size: 12.0,
            delete_button_size: 16.0,
        }
    }
}

impl CanvasConfig {
    /// Logical canvas bounds.
    pub fn bounds(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Declared default size for a widget type.
    pub fn default_size_for(&self, widget_type: &str) -> Size {
        self.type_sizes
            .get(widget_type)
            .copied()
            .unwrap_or(self.default_widget_size)
    }
}

// ─── Text fitting ────────────────────────────────────────────────────────

/// Font-fit search and text minimum-size rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FitConfig {
    /// Smallest font the downward search may pick. Default: **8**.
    pub min_font_size: f64,
    /// Largest font the upward search may pick. Default: **72**.
    pub max_font_size: f64,
    /// Search resolution; results are quantized down to this step. Default: **0.5**.
    pub font_step: f64,
    /// Line box height as a multiple of the font size. Default: **1.2**.
    pub line_height: f64,
    /// Inner padding on each side of the text box. Default: **4**.
    pub padding: f64,
    /// Width floor used when content is empty or cannot be measured. Default: **40**.
    pub nominal_min_width: f64,
    /// Height floor used when content cannot be measured. Default: **24**.
    pub nominal_min_height: f64,
    /// Hard cap on typed characters. Default: **500**.
    pub max_chars: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            min_font_size: 8.0,
            max_font_size: 72.0,
            font_step: 0.5,
            line_height: 1.2,
            padding: 4.0,
            nominal_min_width: 40.0,
            nominal_min_height: 24.0,
            max_chars: 500,
        }
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// Shape outline editing and refit rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeConfig {
    /// Space kept between the outline bounds and the widget box. Default: **15**.
    pub padding: f64,
    /// Length of auto-seeded tangent handles. Default: **30**.
    pub handle_length: f64,
    /// Curve samples per cubic segment for bounds. Default: **50**.
    pub samples_per_segment: usize,
    /// Size change below which a refit is skipped. Default: **0.5**.
    pub refit_epsilon: f64,
    /// Debounce window for coalescing refits, in ms. Default: **120**.
    pub refit_debounce_ms: f64,
    /// Fewest corners an outline may have. Default: **3**.
    pub min_corners: usize,
    /// Most corners an outline may have. Default: **12**.
    pub max_corners: usize,
    /// Smallest box a shape widget may be resized to. Default: **40×40**.
    pub min_size: Size,
    /// Pointer slop for anchors and handles, in logical px. Default: **8**.
    pub hit_radius: f64,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            padding: 15.0,
            handle_length: 30.0,
            samples_per_segment: 50,
            refit_epsilon: 0.5,
            refit_debounce_ms: 120.0,
            min_corners: 3,
            max_corners: 12,
            min_size: Size::new(40.0, 40.0),
            hit_radius: 8.0,
        }
    }
}

impl ShapeConfig {
    /// Clamp a requested corner count into the allowed range.
    pub fn clamp_corners(&self, n: usize) -> usize {
        let lo = self.min_corners.max(3);
        n.clamp(lo, self.max_corners.max(lo))
    }
}

// ─── Aggregate ───────────────────────────────────────────────────────────

/// Everything the engine needs, supplied once per canvas instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub canvas: CanvasConfig,
    pub fit: FitConfig,
    pub shape: ShapeConfig,
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON override. Empty input yields defaults.
    ///
    /// # Errors
    /// Returns [`CanvasError::InvalidRecord`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}
