use std::time::Duration;

use kurbo::Shape as _;

use crate::{
    animation::{animator::RepeatMode, ease::Ease},
    draw::canvas::Canvas,
    foundation::core::{Point, Rgba8},
    paint::Paint,
};

const PATH_TOLERANCE: f64 = 0.1;

/// Repeating decoration drawn around the anchor underneath the cut-out.
///
/// The effect animator always repeats forever; `repeat_mode` picks restart or ping-pong.
pub trait Effect {
    fn duration(&self) -> Duration;

    fn ease(&self) -> Ease;

    fn repeat_mode(&self) -> RepeatMode;

    fn draw(&self, canvas: &mut dyn Canvas, anchor: Point, progress: f64, paint: &Paint);
}

/// Expanding circle that fades out as it grows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleEffect {
    /// Radius at progress 0.
    pub offset: f64,
    /// Radius at progress 1.
    pub radius: f64,
    pub color: Rgba8,
    pub duration: Duration,
    pub ease: Ease,
    pub repeat_mode: RepeatMode,
}

impl RippleEffect {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

    pub fn new(offset: f64, radius: f64, color: Rgba8) -> Self {
        Self {
            offset,
            radius,
            color,
            duration: Self::DEFAULT_DURATION,
            ease: Ease::OutQuad,
            repeat_mode: RepeatMode::Restart,
        }
    }

    pub fn with_timing(mut self, duration: Duration, ease: Ease) -> Self {
        self.duration = duration;
        self.ease = ease;
        self
    }
}

impl Effect for RippleEffect {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn ease(&self) -> Ease {
        self.ease
    }

    fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    fn draw(&self, canvas: &mut dyn Canvas, anchor: Point, progress: f64, paint: &Paint) {
        let r = self.offset + (self.radius - self.offset) * progress;
        if r <= 0.0 {
            return;
        }
        let paint = paint.with_color(self.color.scale_alpha(1.0 - progress));
        let path = kurbo::Circle::new(anchor, r).to_path(PATH_TOLERANCE);
        canvas.fill_path(&path, &paint);
    }
}

/// Fixed-size circle whose opacity pulses with progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlickerEffect {
    pub radius: f64,
    pub color: Rgba8,
    pub duration: Duration,
    pub ease: Ease,
    pub repeat_mode: RepeatMode,
}

impl FlickerEffect {
    pub fn new(radius: f64, color: Rgba8) -> Self {
        Self {
            radius,
            color,
            duration: RippleEffect::DEFAULT_DURATION,
            ease: Ease::Linear,
            repeat_mode: RepeatMode::Reverse,
        }
    }

    pub fn with_timing(mut self, duration: Duration, ease: Ease) -> Self {
        self.duration = duration;
        self.ease = ease;
        self
    }
}

impl Effect for FlickerEffect {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn ease(&self) -> Ease {
        self.ease
    }

    fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    fn draw(&self, canvas: &mut dyn Canvas, anchor: Point, progress: f64, paint: &Paint) {
        if self.radius <= 0.0 {
            return;
        }
        let paint = paint.with_color(self.color.scale_alpha(progress));
        let path = kurbo::Circle::new(anchor, self.radius).to_path(PATH_TOLERANCE);
        canvas.fill_path(&path, &paint);
    }
}

/// No decoration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmptyEffect;

impl Effect for EmptyEffect {
    fn duration(&self) -> Duration {
        Duration::ZERO
    }

    fn ease(&self) -> Ease {
        Ease::Linear
    }

    fn repeat_mode(&self) -> RepeatMode {
        RepeatMode::Restart
    }

    fn draw(&self, _canvas: &mut dyn Canvas, _anchor: Point, _progress: f64, _paint: &Paint) {}
}

#[cfg(test)]
#[path = "../../tests/unit/draw/effect.rs"]
mod tests;
