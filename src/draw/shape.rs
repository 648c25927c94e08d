use std::time::Duration;

use kurbo::Shape as _;

use crate::{
    animation::ease::Ease,
    draw::canvas::Canvas,
    foundation::core::Point,
    paint::Paint,
};

const PATH_TOLERANCE: f64 = 0.1;

/// Cut-out geometry revealing the anchor region.
///
/// `draw` is called with the shape animator's current value; implementations must treat
/// `progress == 0.0` as fully closed and `progress == 1.0` as fully open.
pub trait Shape {
    fn duration(&self) -> Duration;

    fn ease(&self) -> Ease;

    fn draw(&self, canvas: &mut dyn Canvas, anchor: Point, progress: f64, paint: &Paint);
}

/// Circle whose radius grows with progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub radius: f64,
    pub duration: Duration,
    pub ease: Ease,
}

impl Circle {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            duration: Self::DEFAULT_DURATION,
            ease: Ease::OutQuart,
        }
    }

    pub fn with_timing(mut self, duration: Duration, ease: Ease) -> Self {
        self.duration = duration;
        self.ease = ease;
        self
    }
}

impl Shape for Circle {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn ease(&self) -> Ease {
        self.ease
    }

    fn draw(&self, canvas: &mut dyn Canvas, anchor: Point, progress: f64, paint: &Paint) {
        let r = self.radius * progress;
        if r <= 0.0 {
            return;
        }
        let path = kurbo::Circle::new(anchor, r).to_path(PATH_TOLERANCE);
        canvas.fill_path(&path, paint);
    }
}

/// Rounded rectangle centred on the anchor; width and height grow with progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRectangle {
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub duration: Duration,
    pub ease: Ease,
}

impl RoundedRectangle {
    pub fn new(width: f64, height: f64, corner_radius: f64) -> Self {
        Self {
            width,
            height,
            corner_radius,
            duration: Circle::DEFAULT_DURATION,
            ease: Ease::OutQuart,
        }
    }

    pub fn with_timing(mut self, duration: Duration, ease: Ease) -> Self {
        self.duration = duration;
        self.ease = ease;
        self
    }
}

impl Shape for RoundedRectangle {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn ease(&self) -> Ease {
        self.ease
    }

    fn draw(&self, canvas: &mut dyn Canvas, anchor: Point, progress: f64, paint: &Paint) {
        let half_w = self.width * 0.5 * progress;
        let half_h = self.height * 0.5 * progress;
        if half_w <= 0.0 || half_h <= 0.0 {
            return;
        }
        let rect = kurbo::Rect::new(
            anchor.x - half_w,
            anchor.y - half_h,
            anchor.x + half_w,
            anchor.y + half_h,
        );
        let radius = self.corner_radius.clamp(0.0, half_w.min(half_h));
        let path = kurbo::RoundedRect::from_rect(rect, radius).to_path(PATH_TOLERANCE);
        canvas.fill_path(&path, paint);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/shape.rs"]
mod tests;
