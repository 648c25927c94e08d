use std::fmt;

use crate::{
    draw::{
        effect::{Effect, EmptyEffect},
        shape::{Circle, Shape},
    },
    foundation::core::Point,
    layout::{
        placement::view_center,
        view::{ViewHierarchy, ViewId},
    },
};

/// Per-target lifecycle hooks, called by the [`Spotlight`](crate::Spotlight) sequencer.
pub trait TargetListener {
    fn on_started(&self) {}

    fn on_ended(&self) {}
}

/// One highlight request: where to cut out, how it animates, and what to show next to it.
pub struct Target {
    anchor: Point,
    shape: Box<dyn Shape>,
    effect: Box<dyn Effect>,
    overlay: Option<ViewId>,
    anchor_view: Option<ViewId>,
    listener: Option<Box<dyn TargetListener>>,
}

impl Target {
    pub fn builder() -> TargetBuilder {
        TargetBuilder::default()
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn shape(&self) -> &dyn Shape {
        self.shape.as_ref()
    }

    pub fn effect(&self) -> &dyn Effect {
        self.effect.as_ref()
    }

    /// Auxiliary overlay attached to the surface while this target is current.
    pub fn overlay(&self) -> Option<ViewId> {
        self.overlay
    }

    /// View the anchor originates from, used for overlay placement.
    pub fn anchor_view(&self) -> Option<ViewId> {
        self.anchor_view
    }

    pub fn listener(&self) -> Option<&dyn TargetListener> {
        self.listener.as_deref()
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("anchor", &self.anchor)
            .field("shape_duration", &self.shape.duration())
            .field("effect_duration", &self.effect.duration())
            .field("overlay", &self.overlay)
            .field("anchor_view", &self.anchor_view)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Target`]. Defaults: anchor at the origin, a 100px [`Circle`], no effect,
/// no overlay.
pub struct TargetBuilder {
    anchor: Point,
    shape: Box<dyn Shape>,
    effect: Box<dyn Effect>,
    overlay: Option<ViewId>,
    anchor_view: Option<ViewId>,
    listener: Option<Box<dyn TargetListener>>,
}

impl Default for TargetBuilder {
    fn default() -> Self {
        Self {
            anchor: Point::ZERO,
            shape: Box::new(Circle::new(100.0)),
            effect: Box::new(EmptyEffect),
            overlay: None,
            anchor_view: None,
            listener: None,
        }
    }
}

impl TargetBuilder {
    pub fn anchor(mut self, anchor: Point) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn anchor_xy(self, x: f64, y: f64) -> Self {
        self.anchor(Point::new(x, y))
    }

    /// Record the view the anchor belongs to without moving the anchor.
    pub fn anchor_view(mut self, view: ViewId) -> Self {
        self.anchor_view = Some(view);
        self
    }

    /// Anchor at the centre of `view`, expressed in `root` coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `view` is not a descendant of `root`.
    pub fn anchor_on_view(self, views: &dyn ViewHierarchy, view: ViewId, root: ViewId) -> Self {
        let center = view_center(views, view, root);
        self.anchor(center).anchor_view(view)
    }

    pub fn shape(mut self, shape: impl Shape + 'static) -> Self {
        self.shape = Box::new(shape);
        self
    }

    pub fn effect(mut self, effect: impl Effect + 'static) -> Self {
        self.effect = Box::new(effect);
        self
    }

    pub fn overlay(mut self, overlay: ViewId) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn listener(mut self, listener: impl TargetListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn build(self) -> Target {
        Target {
            anchor: self.anchor,
            shape: self.shape,
            effect: self.effect,
            overlay: self.overlay,
            anchor_view: self.anchor_view,
            listener: self.listener,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/target.rs"]
mod tests;
