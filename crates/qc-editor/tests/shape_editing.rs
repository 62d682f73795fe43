//! Integration tests: anchor/handle editing, debounced refit and corner
//! count changes on shape widgets.

use pretty_assertions::assert_eq;
use qc_core::geom::{Point, Size};
use qc_core::{HandleSide, ShapeData, ShapeOutline, Widget, WidgetContent, WidgetId};
use qc_editor::{CanvasEngine, CanvasEvent, CanvasHost, InputEvent, dispatch};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A 4-corner shape. Its anchors sit at (105, 15), (105, 105), (15, 105)
/// and (15, 15) in widget-local space.
fn square_shape(id: &str, x: f64, y: f64) -> Widget {
    let size = Size::new(120.0, 120.0);
    Widget::new(WidgetId::intern(id), "shape", Point::new(x, y), size).with_content(
        WidgetContent::Shape(ShapeData::new(ShapeOutline::regular(4, size, 15.0))),
    )
}

fn engine(widgets: Vec<Widget>) -> CanvasEngine {
    init_logging();
    let mut engine = CanvasEngine::with_defaults();
    engine.load(widgets);
    engine
}

fn outline(e: &CanvasEngine, id: WidgetId) -> ShapeOutline {
    e.widget(id).unwrap().shape().unwrap().outline.clone()
}

fn close(a: Point, b: Point) -> bool {
    a.distance(b) < 1e-6
}

/// Select the shape with a plain click on its body.
fn select(e: &mut CanvasEngine, at: Point) {
    e.handle(InputEvent::pointer_down(at.x, at.y));
    e.handle(InputEvent::pointer_up(at.x, at.y));
}

#[test]
fn anchor_drag_then_refit_keeps_rendered_anchor_still() {
    let id = WidgetId::intern("refit_a");
    let mut e = engine(vec![square_shape("refit_a", 200.0, 200.0)]);
    select(&mut e, Point::new(260.0, 260.0));

    // grab anchor 0 at canvas (305, 215)
    let down = e.handle(InputEvent::pointer_down(305.0, 215.0));
    assert!(matches!(down.as_slice(), [
        CanvasEvent::ZOrderChanged { .. },
        CanvasEvent::ShapeChanged { .. },
    ]));
    assert_eq!(e.active_anchor(id), Some(0));

    e.handle(InputEvent::pointer_move(345.0, 175.0));
    // draft renders, record does not change yet
    let draft = e.display_outline(id).unwrap().cloned().unwrap();
    assert!(close(draft.anchors[0], Point::new(145.0, -25.0)));
    assert!(close(outline(&e, id).anchors[0], Point::new(105.0, 15.0)));

    let up = e.handle(InputEvent::pointer_up(345.0, 175.0));
    assert!(matches!(up.as_slice(), [CanvasEvent::ShapeChanged { .. }]));
    assert!(e.has_pending_refit(id));

    // debounced: nothing before the window closes
    assert!(e.tick(119.0).is_empty());
    let refit = e.tick(120.0);
    assert_eq!(refit.len(), 3);
    assert!(!e.has_pending_refit(id));

    let w = e.widget(id).unwrap();
    assert!(w.size.approx_eq(Size::new(160.0, 160.0), 1e-6), "{:?}", w.size);
    assert!(close(w.position, Point::new(200.0, 160.0)), "{:?}", w.position);
    let rendered = w.position.add(w.shape().unwrap().outline.anchors[0]);
    assert!(close(rendered, Point::new(345.0, 175.0)), "{rendered:?}");

    // a second tick has nothing left to do
    assert!(e.tick(500.0).is_empty());
}

#[test]
fn clicking_an_anchor_without_moving_keeps_it_in_place() {
    let id = WidgetId::intern("click_anchor_a");
    let mut e = engine(vec![square_shape("click_anchor_a", 200.0, 200.0)]);
    select(&mut e, Point::new(260.0, 260.0));
    let before = outline(&e, id);

    // 6.4 px off anchor 0 at canvas (305, 215)
    e.handle(InputEvent::pointer_down(310.0, 211.0));
    assert_eq!(e.active_anchor(id), Some(0));
    let seeded = outline(&e, id);
    assert_eq!(seeded.anchors, before.anchors);

    let up = e.handle(InputEvent::pointer_up(310.0, 211.0));
    assert!(up.is_empty(), "{up:?}");
    assert_eq!(outline(&e, id), seeded);
    assert_eq!(e.active_anchor(id), Some(0));

    // a later drag from the same off-centre grab moves by the pointer delta
    e.handle(InputEvent::pointer_down(310.0, 211.0));
    e.handle(InputEvent::pointer_move(330.0, 221.0));
    let up = e.handle(InputEvent::pointer_up(330.0, 221.0));
    let [CanvasEvent::ShapeChanged { anchors, .. }] = up.as_slice() else {
        panic!("expected shape commit, got {up:?}");
    };
    assert!(close(anchors[0], Point::new(125.0, 25.0)));
}

#[test]
fn edit_after_idle_gap_waits_a_full_debounce() {
    let id = WidgetId::intern("idle_a");
    let mut e = engine(vec![square_shape("idle_a", 200.0, 200.0)]);
    select(&mut e, Point::new(260.0, 260.0));

    // no ticks for ten seconds, then the host stamps the edit
    e.set_clock(10_000.0);
    e.handle(InputEvent::pointer_down(305.0, 215.0));
    e.handle(InputEvent::pointer_move(345.0, 175.0));
    e.handle(InputEvent::pointer_up(345.0, 175.0));
    assert_eq!(e.next_deadline(), Some(10_120.0));

    // the clock never runs backwards
    e.set_clock(5.0);
    assert_eq!(e.next_deadline(), Some(10_120.0));

    assert!(e.tick(10_001.0).is_empty());
    assert!(e.has_pending_refit(id));
    assert_eq!(e.tick(10_120.0).len(), 3);
    assert!(!e.has_pending_refit(id));
}

#[test]
fn rapid_edits_coalesce_into_one_refit() {
    let id = WidgetId::intern("coalesce_a");
    let mut e = engine(vec![square_shape("coalesce_a", 200.0, 200.0)]);
    select(&mut e, Point::new(260.0, 260.0));

    e.handle(InputEvent::pointer_down(305.0, 215.0));
    e.handle(InputEvent::pointer_up(340.0, 215.0));
    e.tick(60.0);
    e.handle(InputEvent::pointer_down(340.0, 215.0));
    e.handle(InputEvent::pointer_up(360.0, 215.0));

    // first request (due 120) was replaced by one due at 180
    assert!(e.tick(150.0).is_empty());
    let events = e.tick(180.0);
    assert_eq!(
        events.iter().filter(|ev| matches!(ev, CanvasEvent::Resized { .. })).count(),
        1
    );
    assert!(e.widget(id).unwrap().size.width > 120.0);
}

#[test]
fn handle_drag_edits_one_side_only() {
    let id = WidgetId::intern("handle_a");
    let mut e = engine(vec![square_shape("handle_a", 200.0, 200.0)]);
    select(&mut e, Point::new(260.0, 260.0));

    // activate anchor 3 at canvas (215, 215); handles get seeded
    e.handle(InputEvent::pointer_down(215.0, 215.0));
    e.handle(InputEvent::pointer_up(215.0, 215.0));
    let seeded = outline(&e, id);
    assert!(close(seeded.handles[3].right, Point::new(30.0, 0.0)));
    assert!(close(seeded.handles[3].left, Point::new(0.0, 30.0)));

    // right handle tip at canvas (245, 215)
    e.handle(InputEvent::pointer_down(245.0, 215.0));
    assert!(e.is_interacting());
    e.handle(InputEvent::pointer_move(255.0, 195.0));
    let up = e.handle(InputEvent::pointer_up(255.0, 195.0));
    let [CanvasEvent::ShapeChanged { handles, anchors, .. }] = up.as_slice() else {
        panic!("expected shape commit, got {up:?}");
    };
    assert!(close(handles[3].right, Point::new(40.0, -20.0)));
    assert!(close(handles[3].left, Point::new(0.0, 30.0)));
    assert!(close(anchors[3], Point::new(15.0, 15.0)));
    assert_eq!(e.active_anchor(id), Some(3));
}

#[test]
fn active_anchor_blocks_whole_widget_drag() {
    let id = WidgetId::intern("block_a");
    let mut e = engine(vec![square_shape("block_a", 200.0, 200.0)]);
    select(&mut e, Point::new(260.0, 260.0));
    e.handle(InputEvent::pointer_down(305.0, 215.0));
    e.handle(InputEvent::pointer_up(305.0, 215.0));
    assert_eq!(e.active_anchor(id), Some(0));

    // body press leaves anchor mode without starting a drag
    e.handle(InputEvent::pointer_down(260.0, 260.0));
    assert!(!e.is_interacting());
    assert_eq!(e.active_anchor(id), None);
    e.handle(InputEvent::pointer_up(400.0, 400.0));
    assert_eq!(e.widget(id).unwrap().position, Point::new(200.0, 200.0));

    // next press drags
    e.handle(InputEvent::pointer_down(260.0, 260.0));
    e.handle(InputEvent::pointer_move(280.0, 260.0));
    e.handle(InputEvent::pointer_up(280.0, 260.0));
    assert_eq!(e.widget(id).unwrap().position, Point::new(220.0, 200.0));
}

#[test]
fn escape_discards_anchor_draft() {
    let id = WidgetId::intern("escape_shape_a");
    let mut e = engine(vec![square_shape("escape_shape_a", 200.0, 200.0)]);
    select(&mut e, Point::new(260.0, 260.0));
    e.handle(InputEvent::pointer_down(305.0, 215.0));
    let committed = outline(&e, id);
    e.handle(InputEvent::pointer_move(500.0, 500.0));

    assert!(e.handle(InputEvent::key("Escape")).is_empty());
    assert_eq!(e.active_anchor(id), None);
    assert_eq!(e.display_outline(id).unwrap(), Some(&committed));
    assert!(e.handle(InputEvent::pointer_up(500.0, 500.0)).is_empty());
    assert_eq!(outline(&e, id), committed);
}

#[test]
fn manual_resize_scales_anchors_and_handles() {
    let id = WidgetId::intern("scale_a");
    let mut shape = square_shape("scale_a", 100.0, 100.0);
    if let Some(data) = shape.shape_mut() {
        data.outline.handles[0].right = Point::new(10.0, 10.0);
    }
    let mut e = engine(vec![shape]);

    // bottom-right grip
    e.handle(InputEvent::pointer_down(215.0, 215.0));
    e.handle(InputEvent::pointer_move(335.0, 275.0));
    let events = e.handle(InputEvent::pointer_up(335.0, 275.0));
    assert!(matches!(
        events.as_slice(),
        [CanvasEvent::Resized { .. }, CanvasEvent::ShapeChanged { .. }]
    ));

    let o = outline(&e, id);
    assert_eq!(e.widget(id).unwrap().size, Size::new(240.0, 180.0));
    assert!(close(o.anchors[0], Point::new(210.0, 22.5)));
    assert!(close(o.handles[0].right, Point::new(20.0, 15.0)));
}

#[test]
fn corner_count_changes_keep_authored_anchors() {
    let id = WidgetId::intern("corners_a");
    let mut shape = square_shape("corners_a", 100.0, 100.0);
    if let Some(data) = shape.shape_mut() {
        data.outline.anchors[1] = Point::new(90.0, 95.0);
    }
    let mut e = engine(vec![shape]);

    let events = e.set_corner_count(id, 6).unwrap();
    let [CanvasEvent::ShapeChanged { anchors, handles, .. }] = events.as_slice() else {
        panic!("expected shape commit, got {events:?}");
    };
    assert_eq!(anchors.len(), 6);
    assert_eq!(handles.len(), 6);
    assert_eq!(anchors[1], Point::new(90.0, 95.0));
    assert!(e.has_pending_refit(id));

    e.set_corner_count(id, 50).unwrap();
    assert_eq!(outline(&e, id).len(), 12);
    e.set_corner_count(id, 0).unwrap();
    assert_eq!(outline(&e, id).len(), 3);
    assert_eq!(outline(&e, id).corner_count, 3);

    // unchanged count is a no-op
    assert!(e.set_corner_count(id, 3).unwrap().is_empty());
}

#[test]
fn deleting_a_shape_drops_its_pending_refit() {
    let id = WidgetId::intern("delete_shape_a");
    let mut e = engine(vec![square_shape("delete_shape_a", 200.0, 200.0)]);
    e.set_corner_count(id, 5).unwrap();
    assert!(e.has_pending_refit(id));
    assert_eq!(e.delete(id).unwrap(), vec![CanvasEvent::Deleted { id }]);
    assert!(!e.has_pending_refit(id));
    assert!(e.tick(10_000.0).is_empty());
    assert!(e.delete(id).is_err());
}

#[test]
fn malformed_outline_is_regenerated_on_load() {
    let id = WidgetId::intern("malformed_a");
    let mut shape = square_shape("malformed_a", 0.0, 0.0);
    if let Some(data) = shape.shape_mut() {
        data.outline.handles.truncate(2);
        data.outline.corner_count = 5;
    }
    let e = engine(vec![shape]);
    let o = outline(&e, id);
    assert!(o.is_valid());
    assert_eq!(o.len(), 5);
    assert!(e.shape_svg(id).unwrap().starts_with('M'));
}

#[test]
fn shape_handles_are_only_grabbable_on_the_active_anchor() {
    let id = WidgetId::intern("grab_a");
    let mut e = engine(vec![square_shape("grab_a", 200.0, 200.0)]);
    select(&mut e, Point::new(260.0, 260.0));
    e.handle(InputEvent::pointer_down(215.0, 215.0));
    e.handle(InputEvent::pointer_up(215.0, 215.0));
    let o = outline(&e, id);
    let Some(tip) = o.handle_position(3, HandleSide::Left) else {
        panic!("anchor 3 has a left handle");
    };
    let tip = Point::new(200.0, 200.0).add(tip);
    e.handle(InputEvent::pointer_down(tip.x, tip.y));
    assert!(e.is_interacting());
    e.handle(InputEvent::pointer_up(tip.x, tip.y));
}

#[derive(Default)]
struct RecordingHost {
    shapes: usize,
    other: Vec<CanvasEvent>,
}

impl CanvasHost for RecordingHost {
    fn emit(&mut self, event: CanvasEvent) {
        self.other.push(event);
    }

    fn on_shape_data_change(&mut self, _event: CanvasEvent) {
        self.shapes += 1;
    }
}

#[test]
fn host_receives_refit_batch() {
    let id = WidgetId::intern("host_a");
    // outline drawn for a 120×120 box inside a 200×200 widget
    let outline = ShapeOutline::regular(4, Size::new(120.0, 120.0), 15.0);
    let shape = Widget::new(id, "shape", Point::new(200.0, 200.0), Size::new(200.0, 200.0))
        .with_content(WidgetContent::Shape(ShapeData::new(outline)));
    let mut e = engine(vec![shape]);
    e.set_corner_count(id, 3).unwrap();
    let mut host = RecordingHost::default();
    dispatch(&mut host, e.tick(1_000.0));
    // moved + resized go through emit, the outline through its own hook
    assert_eq!(host.shapes, 1);
    assert_eq!(host.other.len(), 2);
    assert!(e.widget(id).unwrap().size.approx_eq(Size::new(120.0, 120.0), 1e-6));
}
