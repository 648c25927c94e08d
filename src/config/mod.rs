use std::{io::Read, time::Duration};

use crate::{
    animation::ease::Ease,
    foundation::core::Rgba8,
    foundation::error::{SpotlightError, SpotlightResult},
};

/// Theme values the overlay surface reads but never interprets.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Color of the dim layer.
    pub background: Rgba8,
    /// Gap between the anchor view and the auxiliary overlay, in pixels.
    pub overlay_margin: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            background: Rgba8::from_argb(0x6000_0000),
            overlay_margin: 16.0,
        }
    }
}

/// Duration and curve of an engine-level opacity fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FadeSpec {
    pub duration_ms: u64,
    pub ease: Ease,
}

impl Default for FadeSpec {
    fn default() -> Self {
        Self {
            duration_ms: 1000,
            ease: Ease::OutQuart,
        }
    }
}

impl FadeSpec {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpotlightConfig {
    pub surface: SurfaceConfig,
    /// Fade-in used when the engine starts.
    pub start: FadeSpec,
    /// Fade-out used when the engine finishes.
    pub finish: FadeSpec,
}

impl SpotlightConfig {
    pub fn from_json_str(s: &str) -> SpotlightResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_reader(r: impl Read) -> SpotlightResult<Self> {
        let cfg: Self = serde_json::from_reader(r)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> SpotlightResult<()> {
        let margin = self.surface.overlay_margin;
        if !margin.is_finite() || margin < 0.0 {
            return Err(SpotlightError::validation(format!(
                "overlay_margin must be finite and >= 0, got {margin}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
