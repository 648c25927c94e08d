use crate::{
    foundation::core::{Point, Rect, Vec2},
    layout::view::{ViewHierarchy, ViewId},
};

/// Which surface edge the auxiliary overlay hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayEdge {
    Top,
    Bottom,
}

/// Layout constraints for an auxiliary overlay: full parent width, intrinsic height,
/// anchored to one vertical edge with a margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayLayout {
    pub edge: OverlayEdge,
    pub margin: f64,
}

impl OverlayLayout {
    /// Resolve the overlay frame inside `parent` for content of the given height.
    pub fn resolve(&self, parent: Rect, content_height: f64) -> Rect {
        match self.edge {
            OverlayEdge::Top => {
                let y0 = parent.y0 + self.margin;
                Rect::new(parent.x0, y0, parent.x1, y0 + content_height)
            }
            OverlayEdge::Bottom => {
                let y1 = parent.y1 - self.margin;
                Rect::new(parent.x0, y1 - content_height, parent.x1, y1)
            }
        }
    }
}

/// Place the overlay above or below the anchor.
///
/// Anchors in the upper half get a top-anchored overlay below the anchor view; anchors in the
/// lower half get a bottom-anchored overlay above it.
pub fn place_overlay(
    anchor: Point,
    surface_height: f64,
    anchor_offset: f64,
    anchor_view_height: f64,
    margin: f64,
) -> OverlayLayout {
    if anchor.y < surface_height / 2.0 {
        OverlayLayout {
            edge: OverlayEdge::Top,
            margin: anchor_offset + margin + anchor_view_height,
        }
    } else {
        OverlayLayout {
            edge: OverlayEdge::Bottom,
            margin: surface_height - anchor_offset + margin,
        }
    }
}

/// Sum of local origins from `view` up to (excluding) `root`.
///
/// # Panics
///
/// Panics when the walk reaches a view without a parent before reaching `root`: the view is
/// not part of the root's tree, which is a caller error.
pub fn accumulated_offset(views: &dyn ViewHierarchy, view: ViewId, root: ViewId) -> Vec2 {
    if view == root {
        return Vec2::ZERO;
    }
    let mut sum = Vec2::ZERO;
    let mut current = view;
    loop {
        let frame = views.frame(current);
        sum += Vec2::new(frame.x0, frame.y0);
        match views.parent(current) {
            Some(parent) if parent == root => return sum,
            Some(parent) => current = parent,
            None => panic!("{view:?} is not a descendant of {root:?}"),
        }
    }
}

/// Vertical component of [`accumulated_offset`].
pub fn accumulated_top_offset(views: &dyn ViewHierarchy, view: ViewId, root: ViewId) -> f64 {
    accumulated_offset(views, view, root).y
}

/// Centre of `view` in `root` coordinates.
pub fn view_center(views: &dyn ViewHierarchy, view: ViewId, root: ViewId) -> Point {
    let origin = accumulated_offset(views, view, root);
    let frame = views.frame(view);
    Point::new(
        origin.x + frame.width() / 2.0,
        origin.y + frame.height() / 2.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
