use std::{io::Read, time::Duration};

use crate::{
    animation::ease::Ease,
    config::SpotlightConfig,
    draw::{
        effect::{EmptyEffect, FlickerEffect, RippleEffect},
        shape::{Circle, RoundedRectangle},
    },
    foundation::core::{Rgba8, SurfaceSize, millis},
    foundation::error::{SpotlightError, SpotlightResult},
    render::{cpu::CpuRenderer, frame::FrameRGBA},
    sequence::Spotlight,
    surface::{host::HeadlessHost, overlay::OverlaySurface, target::Target},
};

/// Upper bound on frames produced by [`ScenePlayer::play`].
pub const MAX_FRAMES: u64 = 100_000;

/// A scripted spotlight session: surface size, engine config, and the targets to walk.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub config: SpotlightConfig,
    pub targets: Vec<TargetSpec>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TargetSpec {
    /// Anchor in surface pixels, `[x, y]`.
    pub anchor: [f64; 2],
    pub shape: ShapeSpec,
    #[serde(default)]
    pub effect: EffectSpec,
    /// How long the target stays on screen before the player moves on.
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
}

fn default_hold_ms() -> u64 {
    1000
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    Circle {
        radius: f64,
        #[serde(default)]
        duration_ms: Option<u64>,
        #[serde(default)]
        ease: Option<Ease>,
    },
    RoundedRectangle {
        width: f64,
        height: f64,
        #[serde(default)]
        corner_radius: f64,
        #[serde(default)]
        duration_ms: Option<u64>,
        #[serde(default)]
        ease: Option<Ease>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectSpec {
    #[default]
    Empty,
    Ripple {
        offset: f64,
        radius: f64,
        color: Rgba8,
        #[serde(default)]
        duration_ms: Option<u64>,
        #[serde(default)]
        ease: Option<Ease>,
    },
    Flicker {
        radius: f64,
        color: Rgba8,
        #[serde(default)]
        duration_ms: Option<u64>,
        #[serde(default)]
        ease: Option<Ease>,
    },
}

impl Scene {
    pub fn from_json_str(s: &str) -> SpotlightResult<Self> {
        let scene: Self = serde_json::from_str(s)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn from_reader(r: impl Read) -> SpotlightResult<Self> {
        let scene: Self = serde_json::from_reader(r)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn size(&self) -> SpotlightResult<SurfaceSize> {
        SurfaceSize::new(self.width, self.height)
    }

    pub fn validate(&self) -> SpotlightResult<()> {
        self.size()?;
        self.config.validate()?;
        if self.targets.is_empty() {
            return Err(SpotlightError::validation("scene has no targets"));
        }
        for (i, t) in self.targets.iter().enumerate() {
            t.validate()
                .map_err(|e| SpotlightError::validation(format!("targets[{i}]: {e}")))?;
        }
        Ok(())
    }

    /// Build engine targets from the scene description.
    pub fn to_targets(&self) -> Vec<Target> {
        self.targets.iter().map(TargetSpec::to_target).collect()
    }
}

impl TargetSpec {
    fn validate(&self) -> SpotlightResult<()> {
        let [x, y] = self.anchor;
        if !x.is_finite() || !y.is_finite() {
            return Err(SpotlightError::validation("anchor must be finite"));
        }
        match self.shape {
            ShapeSpec::Circle { radius, .. } => positive("circle radius", radius)?,
            ShapeSpec::RoundedRectangle {
                width,
                height,
                corner_radius,
                ..
            } => {
                positive("rectangle width", width)?;
                positive("rectangle height", height)?;
                non_negative("corner_radius", corner_radius)?;
            }
        }
        match self.effect {
            EffectSpec::Empty => {}
            EffectSpec::Ripple { offset, radius, .. } => {
                non_negative("ripple offset", offset)?;
                positive("ripple radius", radius)?;
            }
            EffectSpec::Flicker { radius, .. } => positive("flicker radius", radius)?,
        }
        Ok(())
    }

    pub fn to_target(&self) -> Target {
        let [x, y] = self.anchor;
        let builder = Target::builder().anchor_xy(x, y);
        let builder = match self.shape {
            ShapeSpec::Circle {
                radius,
                duration_ms,
                ease,
            } => {
                let shape = Circle::new(radius);
                builder.shape(shape.with_timing(
                    duration_ms.map_or(shape.duration, millis),
                    ease.unwrap_or(shape.ease),
                ))
            }
            ShapeSpec::RoundedRectangle {
                width,
                height,
                corner_radius,
                duration_ms,
                ease,
            } => {
                let shape = RoundedRectangle::new(width, height, corner_radius);
                builder.shape(shape.with_timing(
                    duration_ms.map_or(shape.duration, millis),
                    ease.unwrap_or(shape.ease),
                ))
            }
        };
        let builder = match self.effect {
            EffectSpec::Empty => builder.effect(EmptyEffect),
            EffectSpec::Ripple {
                offset,
                radius,
                color,
                duration_ms,
                ease,
            } => {
                let effect = RippleEffect::new(offset, radius, color);
                builder.effect(effect.with_timing(
                    duration_ms.map_or(effect.duration, millis),
                    ease.unwrap_or(effect.ease),
                ))
            }
            EffectSpec::Flicker {
                radius,
                color,
                duration_ms,
                ease,
            } => {
                let effect = FlickerEffect::new(radius, color);
                builder.effect(effect.with_timing(
                    duration_ms.map_or(effect.duration, millis),
                    ease.unwrap_or(effect.ease),
                ))
            }
        };
        builder.build()
    }
}

fn positive(name: &str, v: f64) -> SpotlightResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(SpotlightError::validation(format!(
            "{name} must be finite and > 0, got {v}"
        )))
    }
}

fn non_negative(name: &str, v: f64) -> SpotlightResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(SpotlightError::validation(format!(
            "{name} must be finite and >= 0, got {v}"
        )))
    }
}

/// Drives a [`Scene`] on a [`HeadlessHost`], advancing through targets after their hold time.
pub struct ScenePlayer {
    spotlight: Spotlight<HeadlessHost>,
    renderer: CpuRenderer,
    holds: Vec<Duration>,
    held: Duration,
    elapsed: Duration,
}

impl ScenePlayer {
    /// Validate `scene` and start its session at time zero.
    pub fn new(scene: &Scene) -> SpotlightResult<Self> {
        scene.validate()?;
        let size = scene.size()?;
        let mut spotlight =
            Spotlight::new(HeadlessHost::new(size), scene.config, scene.to_targets())?;
        spotlight.start();
        Ok(Self {
            spotlight,
            renderer: CpuRenderer::new(size)?,
            holds: scene.targets.iter().map(|t| millis(t.hold_ms)).collect(),
            held: Duration::ZERO,
            elapsed: Duration::ZERO,
        })
    }

    pub fn spotlight(&self) -> &Spotlight<HeadlessHost> {
        &self.spotlight
    }

    pub fn surface(&self) -> &OverlaySurface<HeadlessHost> {
        self.spotlight.surface()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.spotlight.is_finished()
    }

    /// Advance the session clock by one frame.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
        self.spotlight.on_frame(dt);
        match self.spotlight.current_index() {
            Some(index) => {
                self.held += dt;
                if self.held >= self.holds[index] {
                    self.held = Duration::ZERO;
                    self.spotlight.next();
                }
            }
            None => self.held = Duration::ZERO,
        }
    }

    /// Step frame by frame at `fps` until the clock reaches `at`.
    pub fn seek(&mut self, at: Duration, fps: u32) -> SpotlightResult<()> {
        let dt = frame_duration(fps)?;
        let mut steps = 0u64;
        while self.elapsed + dt <= at {
            if steps >= MAX_FRAMES {
                return Err(SpotlightError::validation(format!(
                    "seek to {at:?} exceeds {MAX_FRAMES} frames"
                )));
            }
            self.advance(dt);
            steps += 1;
        }
        Ok(())
    }

    /// Rasterize the current state.
    pub fn render(&mut self) -> SpotlightResult<FrameRGBA> {
        self.renderer.render(self.spotlight.surface())
    }

    /// Render every frame at `fps` until the session finishes, handing each to `sink`.
    /// Returns the number of frames produced.
    #[tracing::instrument(skip(self, sink))]
    pub fn play(
        &mut self,
        fps: u32,
        mut sink: impl FnMut(u64, &FrameRGBA) -> SpotlightResult<()>,
    ) -> SpotlightResult<u64> {
        let dt = frame_duration(fps)?;
        let mut index = 0u64;
        loop {
            let frame = self.render()?;
            sink(index, &frame)?;
            index += 1;
            if self.is_finished() {
                break;
            }
            if index >= MAX_FRAMES {
                return Err(SpotlightError::validation(format!(
                    "scene did not finish within {MAX_FRAMES} frames"
                )));
            }
            self.advance(dt);
        }
        tracing::info!(frames = index, "scene played");
        Ok(index)
    }
}

fn frame_duration(fps: u32) -> SpotlightResult<Duration> {
    if fps == 0 {
        return Err(SpotlightError::validation("fps must be > 0"));
    }
    Ok(Duration::from_secs_f64(1.0 / f64::from(fps)))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mod.rs"]
mod tests;
