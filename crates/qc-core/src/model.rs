//! Widget records as the document model hands them to the engine.
//!
//! The geometry core reads and writes only `position`, `size` and
//! `z_index`; `widget_type` is an opaque discriminator that selects a
//! renderer on the host side. `content` tells the engine which auto-fit
//! rules apply: text widgets fit their font, shape widgets refit their
//! outline, everything else is a plain box.

use crate::error::CanvasError;
use crate::geom::{Point, Rect, Size};
use crate::id::WidgetId;
use crate::outline::ShapeOutline;
use serde::{Deserialize, Serialize};

// ─── Text ────────────────────────────────────────────────────────────────

/// Font description handed to a `TextMeasurer`.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    /// CSS `font` shorthand, e.g. `italic bold 16px Arial`.
    pub fn css(&self) -> String {
        let mut out = String::new();
        if self.italic {
            out.push_str("italic ");
        }
        if self.bold {
            out.push_str("bold ");
        }
        out.push_str(&format!("{}px {}", self.size, self.family));
        out
    }
}

fn default_font_family() -> String {
    "Arial".into()
}

fn default_base_font_size() -> f64 {
    16.0
}

/// Style and content of a text-bearing widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitStyle {
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_base_font_size")]
    pub base_font_size: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strike: bool,
    #[serde(default)]
    pub text: String,
    /// Result of the last fit. Only persisted when a resize changed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_font_size: Option<f64>,
}

impl Default for FitStyle {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            base_font_size: default_base_font_size(),
            bold: false,
            italic: false,
            underline: false,
            strike: false,
            text: String::new(),
            applied_font_size: None,
        }
    }
}

impl FitStyle {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Font spec at an arbitrary size, keeping family and weight/slant.
    pub fn font(&self, size: f64) -> FontSpec {
        FontSpec {
            family: self.font_family.clone(),
            size,
            bold: self.bold,
            italic: self.italic,
        }
    }

    pub fn base_font(&self) -> FontSpec {
        self.font(self.base_font_size)
    }

    /// The size currently rendered: the fitted size if any, else the base.
    pub fn effective_font_size(&self) -> f64 {
        self.applied_font_size.unwrap_or(self.base_font_size)
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

fn default_fill() -> String {
    "#FFFFFF".into()
}

fn default_stroke() -> String {
    "#1F1A17".into()
}

fn default_stroke_width() -> f64 {
    2.0
}

/// Outline plus the visual props that ride along in shape commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeData {
    #[serde(flatten)]
    pub outline: ShapeOutline,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_stroke")]
    pub stroke: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

impl ShapeData {
    pub fn new(outline: ShapeOutline) -> Self {
        Self {
            outline,
            fill: default_fill(),
            stroke: default_stroke(),
            stroke_width: default_stroke_width(),
        }
    }
}

// ─── Widgets ─────────────────────────────────────────────────────────────

/// What the widget carries, as far as geometry is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WidgetContent {
    /// Box with no derived minimums. `props` is opaque to the engine.
    Plain {
        #[serde(default)]
        props: serde_json::Value,
    },
    /// Text whose font is fitted to the box.
    Text(FitStyle),
    /// Vector outline refitted to its curve bounds.
    Shape(ShapeData),
}

impl Default for WidgetContent {
    fn default() -> Self {
        Self::Plain {
            props: serde_json::Value::Null,
        }
    }
}

/// One widget on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub widget_type: String,
    pub position: Point,
    pub size: Size,
    #[serde(default)]
    pub z_index: i64,
    #[serde(default)]
    pub content: WidgetContent,
}

impl Widget {
    pub fn new(id: WidgetId, widget_type: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            id,
            widget_type: widget_type.into(),
            position,
            size,
            z_index: 0,
            content: WidgetContent::default(),
        }
    }

    pub fn with_content(mut self, content: WidgetContent) -> Self {
        self.content = content;
        self
    }

    /// Decode a stored record.
    ///
    /// # Errors
    /// [`CanvasError::InvalidRecord`] for malformed JSON, [`CanvasError::MissingId`]
    /// when the id is blank.
    pub fn from_json(json: &str) -> Result<Self, CanvasError> {
        let widget: Widget = serde_json::from_str(json)?;
        if widget.id.is_blank() {
            return Err(CanvasError::MissingId);
        }
        Ok(widget)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn text_style(&self) -> Option<&FitStyle> {
        match &self.content {
            WidgetContent::Text(style) => Some(style),
            _ => None,
        }
    }

    pub fn text_style_mut(&mut self) -> Option<&mut FitStyle> {
        match &mut self.content {
            WidgetContent::Text(style) => Some(style),
            _ => None,
        }
    }

    pub fn shape(&self) -> Option<&ShapeData> {
        match &self.content {
            WidgetContent::Shape(data) => Some(data),
            _ => None,
        }
    }

    pub fn shape_mut(&mut self) -> Option<&mut ShapeData> {
        match &mut self.content {
            WidgetContent::Shape(data) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_css_shorthand() {
        let style = FitStyle {
            bold: true,
            italic: true,
            ..FitStyle::default()
        };
        assert_eq!(style.base_font().css(), "italic bold 16px Arial");
        assert_eq!(FitStyle::default().font(9.5).css(), "9.5px Arial");
    }

    #[test]
    fn record_accepts_left_top_position() {
        let json = r#"{
            "id": "q1",
            "type": "true_false",
            "position": {"left": 10, "top": 20},
            "size": {"width": 200, "height": 80}
        }"#;
        let Ok(w) = Widget::from_json(json) else {
            panic!("record should decode");
        };
        assert_eq!(w.position, Point::new(10.0, 20.0));
        assert_eq!(w.z_index, 0);
        assert_eq!(w.content, WidgetContent::default());
    }

    #[test]
    fn blank_id_is_rejected() {
        let json = r#"{"id": "", "type": "x", "position": {"x": 0, "y": 0}, "size": {"width": 1, "height": 1}}"#;
        assert!(matches!(Widget::from_json(json), Err(CanvasError::MissingId)));
        assert!(matches!(
            Widget::from_json("{}"),
            Err(CanvasError::InvalidRecord(_))
        ));
    }

    #[test]
    fn geometry_round_trips_exactly() {
        let w = Widget::new(
            WidgetId::intern("rt"),
            "slider",
            Point::new(12.345, 67.891),
            Size::new(240.5, 64.25),
        );
        let json = serde_json::to_string(&w).unwrap();
        let Ok(back) = Widget::from_json(&json) else {
            panic!("round trip");
        };
        assert_eq!(back, w);
        assert!(json.contains(r#""type":"slider""#));
        assert!(json.contains(r#""zIndex":0"#));
    }

    #[test]
    fn shape_content_decodes_flat_outline() {
        let json = r##"{
            "id": "s1", "type": "shape",
            "position": {"x": 0, "y": 0}, "size": {"width": 100, "height": 100},
            "content": {
                "kind": "shape",
                "anchors": [{"x": 0, "y": 0}, {"x": 10, "y": 0}, {"x": 5, "y": 9}],
                "handles": [
                    {"left": {"x": 0, "y": 0}, "right": {"x": 0, "y": 0}},
                    {"left": {"x": 0, "y": 0}, "right": {"x": 0, "y": 0}},
                    {"left": {"x": 0, "y": 0}, "right": {"x": 0, "y": 0}}
                ],
                "cornerCount": 3,
                "fill": "#FF0000"
            }
        }"##;
        let Ok(w) = Widget::from_json(json) else {
            panic!("shape record should decode");
        };
        let Some(shape) = w.shape() else {
            panic!("expected shape content");
        };
        assert_eq!(shape.outline.len(), 3);
        assert_eq!(shape.fill, "#FF0000");
        assert_eq!(shape.stroke_width, 2.0);
    }

    #[test]
    fn text_content_defaults() {
        let json = r#"{
            "id": "t1", "type": "text",
            "position": {"x": 0, "y": 0}, "size": {"width": 100, "height": 40},
            "content": {"kind": "text", "text": "Hello"}
        }"#;
        let Ok(w) = Widget::from_json(json) else {
            panic!("text record should decode");
        };
        let Some(style) = w.text_style() else {
            panic!("expected text content");
        };
        assert_eq!(style.text, "Hello");
        assert_eq!(style.base_font_size, 16.0);
        assert_eq!(style.effective_font_size(), 16.0);
    }
}
