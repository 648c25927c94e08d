use super::*;
use crate::layout::view::ViewTree;

fn tree() -> ViewTree {
    ViewTree::new(Rect::new(0.0, 0.0, 400.0, 600.0))
}

#[test]
fn upper_half_anchor_is_top_anchored_below_the_view() {
    let layout = place_overlay(Point::new(200.0, 10.0), 600.0, 4.0, 20.0, 16.0);
    assert_eq!(
        layout,
        OverlayLayout {
            edge: OverlayEdge::Top,
            margin: 40.0,
        }
    );
}

#[test]
fn lower_half_anchor_is_bottom_anchored_above_the_view() {
    let layout = place_overlay(Point::new(200.0, 550.0), 600.0, 540.0, 20.0, 16.0);
    assert_eq!(
        layout,
        OverlayLayout {
            edge: OverlayEdge::Bottom,
            margin: 76.0,
        }
    );
}

#[test]
fn midline_belongs_to_the_bottom_half() {
    let layout = place_overlay(Point::new(0.0, 300.0), 600.0, 0.0, 0.0, 0.0);
    assert_eq!(layout.edge, OverlayEdge::Bottom);
}

#[test]
fn offset_sums_each_ancestor_once() {
    let mut t = tree();
    let root = t.root();
    let a = t.insert(root, Rect::new(3.0, 10.0, 300.0, 500.0));
    let b = t.insert(a, Rect::new(1.0, 20.0, 200.0, 400.0));
    let c = t.insert(b, Rect::new(2.0, 5.0, 50.0, 25.0));
    assert_eq!(accumulated_top_offset(&t, c, root), 35.0);
    assert_eq!(accumulated_offset(&t, c, root), Vec2::new(6.0, 35.0));
    assert_eq!(accumulated_top_offset(&t, a, root), 10.0);
}

#[test]
fn offset_walk_stops_at_intermediate_root() {
    let mut t = tree();
    let a = t.insert(t.root(), Rect::new(0.0, 100.0, 10.0, 110.0));
    let b = t.insert(a, Rect::new(0.0, 7.0, 10.0, 17.0));
    assert_eq!(accumulated_top_offset(&t, b, a), 7.0);
}

#[test]
fn offset_walk_handles_deep_chains() {
    let mut t = tree();
    let mut v = t.root();
    for _ in 0..2_000 {
        v = t.insert(v, Rect::new(0.0, 1.0, 1.0, 2.0));
    }
    assert_eq!(accumulated_top_offset(&t, v, t.root()), 2_000.0);
}

#[test]
fn root_has_zero_offset() {
    let t = tree();
    assert_eq!(accumulated_offset(&t, t.root(), t.root()), Vec2::ZERO);
}

#[test]
#[should_panic(expected = "is not a descendant")]
fn detached_view_is_a_precondition_violation() {
    let mut t = tree();
    let orphan = t.insert_detached(Rect::new(0.0, 0.0, 1.0, 1.0));
    accumulated_top_offset(&t, orphan, t.root());
}

#[test]
fn view_center_uses_root_coordinates() {
    let mut t = tree();
    let a = t.insert(t.root(), Rect::new(10.0, 20.0, 110.0, 220.0));
    let b = t.insert(a, Rect::new(5.0, 5.0, 45.0, 25.0));
    assert_eq!(view_center(&t, b, t.root()), Point::new(35.0, 35.0));
}

#[test]
fn resolve_spans_full_width() {
    let parent = Rect::new(0.0, 0.0, 400.0, 600.0);
    let top = OverlayLayout {
        edge: OverlayEdge::Top,
        margin: 40.0,
    };
    assert_eq!(top.resolve(parent, 50.0), Rect::new(0.0, 40.0, 400.0, 90.0));
    let bottom = OverlayLayout {
        edge: OverlayEdge::Bottom,
        margin: 76.0,
    };
    assert_eq!(
        bottom.resolve(parent, 50.0),
        Rect::new(0.0, 474.0, 400.0, 524.0)
    );
}
