use crate::foundation::core::Rgba8;

/// Blend operation applied when a [`Paint`] is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintBlend {
    /// Regular source-over compositing.
    SourceOver,
    /// Clears covered pixels to transparent, punching a hole through earlier draws.
    Clear,
    /// Additive compositing.
    Plus,
}

/// A drawing configuration: color plus blend operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paint {
    pub color: Rgba8,
    pub blend: PaintBlend,
}

impl Paint {
    pub fn new(color: Rgba8, blend: PaintBlend) -> Self {
        Self { color, blend }
    }

    /// Same blend, different color. Draw implementations use this to tint the shared paint
    /// without mutating it.
    pub fn with_color(self, color: Rgba8) -> Self {
        Self { color, ..self }
    }
}

/// The three paints used by the overlay surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintSet {
    /// Full-bleed dim layer.
    pub background: Paint,
    /// Subtractive mask used by shapes.
    pub shape: Paint,
    /// Additive paint used by effects.
    pub effect: Paint,
}

impl PaintSet {
    pub fn new(background: Rgba8) -> Self {
        Self {
            background: Paint::new(background, PaintBlend::SourceOver),
            shape: Paint::new(Rgba8::WHITE, PaintBlend::Clear),
            effect: Paint::new(Rgba8::WHITE, PaintBlend::Plus),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/mod.rs"]
mod tests;
