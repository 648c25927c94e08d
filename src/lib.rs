//! Spotlight is an overlay engine for guided tours: it dims the screen, cuts an animated hole
//! around a highlighted spot, and decorates it with a repeating effect.
//!
//! The engine is single-threaded and host-driven:
//!
//! - Wrap the host's view system in a [`SurfaceHost`]
//! - Drive an [`OverlaySurface`] directly, or walk a list of [`Target`]s with [`Spotlight`]
//! - Feed frame time through `on_frame` and paint with `draw` onto any [`Canvas`]
//!
//! [`CpuRenderer`] rasterizes a surface into RGBA frames, and [`Scene`]/[`ScenePlayer`] replay a
//! scripted session headlessly.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod draw;
pub(crate) mod layout;
pub(crate) mod paint;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod sequence;
pub(crate) mod surface;

pub use crate::foundation::core::{BezPath, Point, Rect, Rgba8, SurfaceSize, Vec2, millis};
pub use crate::foundation::error::{SpotlightError, SpotlightResult};

pub use crate::animation::animator::{
    AnimationEvent, AnimationListener, AnimatorState, Repeat, RepeatCount, RepeatMode,
    ValueAnimator,
};
pub use crate::animation::ease::Ease;
pub use crate::config::{FadeSpec, SpotlightConfig, SurfaceConfig};
pub use crate::draw::canvas::{Canvas, DrawCall, DrawKind, RecordingCanvas};
pub use crate::draw::effect::{Effect, EmptyEffect, FlickerEffect, RippleEffect};
pub use crate::draw::shape::{Circle, RoundedRectangle, Shape};
pub use crate::layout::placement::{
    OverlayEdge, OverlayLayout, accumulated_offset, accumulated_top_offset, place_overlay,
    view_center,
};
pub use crate::layout::view::{ViewHierarchy, ViewId, ViewTree};
pub use crate::paint::{Paint, PaintBlend, PaintSet};
pub use crate::render::cpu::{CpuCanvas, CpuRenderer, render_frame};
pub use crate::render::frame::FrameRGBA;
pub use crate::scene::{EffectSpec, MAX_FRAMES, Scene, ScenePlayer, ShapeSpec, TargetSpec};
pub use crate::sequence::{Spotlight, SpotlightListener, SpotlightState};
pub use crate::surface::host::{HeadlessHost, SurfaceHost};
pub use crate::surface::overlay::{OverlaySurface, SurfacePhase};
pub use crate::surface::target::{Target, TargetBuilder, TargetListener};
