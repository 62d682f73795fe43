//! Hit testing: canvas point → widget and part.
//!
//! Widgets are checked front-to-back (highest `zIndex` first, later slots
//! winning ties, matching paint order). The selected shape's anchors and
//! handles are checked before any body so they stay grabbable where they
//! overlap a neighbour or stick out of their own box.

use qc_core::geom::{Point, Rect};
use qc_core::{CanvasConfig, HandleSide, ShapeConfig, Widget, WidgetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// Bottom-right resize grip.
    ResizeHandle,
    /// Top-right delete button.
    DeleteButton,
    Anchor(usize),
    Handle(usize, HandleSide),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: WidgetId,
    pub part: HitPart,
}

/// One widget as the hit tester sees it.
#[derive(Debug, Clone, Copy)]
pub struct HitTarget<'a> {
    pub widget: &'a Widget,
    pub rect: Rect,
    /// Anchors are only grabbable on the selected shape.
    pub editing: bool,
    /// Handles are only grabbable on the active anchor.
    pub active_anchor: Option<usize>,
}

/// Find the topmost part at `p`. `None` means the background.
pub fn hit_test(
    targets: &[HitTarget<'_>],
    p: Point,
    canvas: &CanvasConfig,
    shape: &ShapeConfig,
) -> Option<Hit> {
    if let Some(hit) = targets
        .iter()
        .filter(|t| t.editing)
        .find_map(|t| hit_shape_parts(t, p, shape.hit_radius))
    {
        return Some(hit);
    }

    let top = targets
        .iter()
        .enumerate()
        .filter(|(_, t)| t.rect.contains(p))
        .max_by_key(|(i, t)| (t.widget.z_index, *i))
        .map(|(_, t)| t)?;

    Some(Hit {
        id: top.widget.id,
        part: chrome_part(top, p, canvas, shape),
    })
}

fn hit_shape_parts(target: &HitTarget<'_>, p: Point, radius: f64) -> Option<Hit> {
    let outline = &target.widget.shape()?.outline;
    let origin = target.rect.origin();
    let hit = |part| Some(Hit {
        id: target.widget.id,
        part,
    });

    if let Some(i) = target.active_anchor {
        for side in [HandleSide::Left, HandleSide::Right] {
            if let Some(h) = outline.handle_position(i, side)
                && !outline.handles[i].get(side).is_zero(1e-9)
                && origin.add(h).distance(p) <= radius
            {
                return hit(HitPart::Handle(i, side));
            }
        }
    }

    let nearest = outline
        .anchors
        .iter()
        .enumerate()
        .map(|(i, a)| (i, origin.add(*a).distance(p)))
        .filter(|(_, d)| *d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))?;
    hit(HitPart::Anchor(nearest.0))
}

fn chrome_part(target: &HitTarget<'_>, p: Point, canvas: &CanvasConfig, shape: &ShapeConfig) -> HitPart {
    let rect = target.rect;
    let del = canvas.delete_button_size;
    // A shape anchor can sit under the delete button; a press that lands
    // near one never deletes.
    if p.x >= rect.right() - del
        && p.y <= rect.y + del
        && !near_anchor(target, p, 2.0 * shape.hit_radius)
    {
        return HitPart::DeleteButton;
    }
    let grip = canvas.resize_handle_size;
    if p.x >= rect.right() - grip && p.y >= rect.bottom() - grip {
        return HitPart::ResizeHandle;
    }
    HitPart::Body
}

fn near_anchor(target: &HitTarget<'_>, p: Point, radius: f64) -> bool {
    let origin = target.rect.origin();
    target.widget.shape().is_some_and(|s| {
        s.outline
            .anchors
            .iter()
            .any(|a| origin.add(*a).distance(p) <= radius)
    })
}
