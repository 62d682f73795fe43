//! Drop resolution on the canvas surface.
//!
//! Toolbox drags and canvas-to-canvas relocations both end here: the client
//! drop point is mapped through the current display transform, the item is
//! centred under the cursor, and the result is clamped so the item fits.

use crate::viewport::DisplayTransform;
use qc_core::geom::{self, Point, Size};
use qc_core::{CanvasConfig, WidgetContent, WidgetId};
use serde::Deserialize;

/// Payload of a drop.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropItem {
    /// Set when an existing widget is being relocated.
    #[serde(default)]
    pub existing: Option<WidgetId>,
    #[serde(rename = "type")]
    pub widget_type: String,
    /// Declared size; falls back to the type's default.
    #[serde(default)]
    pub size: Option<Size>,
    /// Content for a new widget. Plain when absent.
    #[serde(default)]
    pub content: Option<WidgetContent>,
}

impl DropItem {
    pub fn new(widget_type: impl Into<String>) -> Self {
        Self {
            widget_type: widget_type.into(),
            ..Self::default()
        }
    }

    pub fn relocate(id: WidgetId, widget_type: impl Into<String>, size: Size) -> Self {
        Self {
            existing: Some(id),
            widget_type: widget_type.into(),
            size: Some(size),
            content: None,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_content(mut self, content: WidgetContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn is_new(&self) -> bool {
        self.existing.is_none()
    }
}

/// Drop target bound to one canvas configuration.
pub struct CanvasSurface<'a> {
    config: &'a CanvasConfig,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(config: &'a CanvasConfig) -> Self {
        Self { config }
    }

    /// Size the item will occupy: declared, else the type default.
    pub fn item_size(&self, item: &DropItem) -> Size {
        item.size
            .map(Size::sanitized)
            .filter(|s| s.width > 0.0 && s.height > 0.0)
            .unwrap_or_else(|| self.config.default_size_for(&item.widget_type))
    }

    /// Top-left for a drop at `client`, or `None` when a new widget would
    /// exceed the widget cap. `display` is read fresh on every call.
    pub fn resolve_drop(
        &self,
        client: Point,
        display: &DisplayTransform,
        item: &DropItem,
        current_count: usize,
    ) -> Option<Point> {
        if item.is_new() && current_count >= self.config.max_widgets {
            log::debug!(
                "surface: drop of {} rejected, {current_count} widgets already placed",
                item.widget_type
            );
            return None;
        }
        let at = display.client_to_canvas(client);
        let size = self.item_size(item);
        let centred = at.offset(-size.width / 2.0, -size.height / 2.0);
        Some(geom::clamp_position(centred, size, self.config.bounds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn centres_default_sized_item_under_cursor() {
        let config = CanvasConfig::default();
        let surface = CanvasSurface::new(&config);
        let pos = surface.resolve_drop(
            Point::new(400.0, 300.0),
            &DisplayTransform::default(),
            &DropItem::new("matching"),
            0,
        );
        assert_eq!(pos, Some(Point::new(336.0, 272.0)));
    }

    #[test]
    fn corner_drop_clamps_to_origin() {
        let config = CanvasConfig::default();
        let surface = CanvasSurface::new(&config);
        let pos = surface.resolve_drop(
            Point::new(10.0, 10.0),
            &DisplayTransform::default(),
            &DropItem::new("matching"),
            0,
        );
        assert_eq!(pos, Some(Point::ZERO));
    }

    #[test]
    fn same_canvas_point_at_any_scale() {
        let config = CanvasConfig::default();
        let surface = CanvasSurface::new(&config);
        let item = DropItem::new("slider");
        let canvas_point = Point::new(400.0, 300.0);
        let expected = surface.resolve_drop(canvas_point, &DisplayTransform::default(), &item, 0);
        for scale in [0.5, 0.75, 1.5, 2.0] {
            let display = DisplayTransform::new(Point::new(40.0, 90.0), scale);
            let client = display.canvas_to_client(canvas_point);
            assert_eq!(surface.resolve_drop(client, &display, &item, 0), expected);
        }
    }

    #[test]
    fn cap_applies_to_new_widgets_only() {
        let config = CanvasConfig::default();
        let surface = CanvasSurface::new(&config);
        let display = DisplayTransform::default();
        let at = Point::new(200.0, 200.0);
        assert_eq!(surface.resolve_drop(at, &display, &DropItem::new("text"), 30), None);
        let relocate = DropItem::relocate(WidgetId::intern("w1"), "text", Size::new(100.0, 40.0));
        assert_eq!(
            surface.resolve_drop(at, &display, &relocate, 30),
            Some(Point::new(150.0, 180.0))
        );
    }

    #[test]
    fn declared_size_overrides_type_default() {
        let config = CanvasConfig::default();
        let surface = CanvasSurface::new(&config);
        let item = DropItem::new("slider").with_size(Size::new(10.0, 10.0));
        assert_eq!(surface.item_size(&item), Size::new(10.0, 10.0));
        assert_eq!(surface.item_size(&DropItem::new("slider")), Size::new(240.0, 64.0));
    }
}
