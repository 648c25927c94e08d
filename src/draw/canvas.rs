use kurbo::Shape as _;

use crate::{
    foundation::core::{BezPath, Rect, Rgba8, SurfaceSize},
    paint::{Paint, PaintBlend},
};

/// Drawing target handed to shapes and effects.
///
/// Coordinates are surface pixels with the origin at the top-left corner.
pub trait Canvas {
    fn size(&self) -> SurfaceSize;

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn fill_path(&mut self, path: &BezPath, paint: &Paint);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawKind {
    Rect,
    Path,
}

/// One recorded draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub kind: DrawKind,
    pub blend: PaintBlend,
    pub color: Rgba8,
    pub bounds: Rect,
}

/// A [`Canvas`] that records draw calls instead of rasterizing them.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    size: SurfaceSize,
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn blends(&self) -> Vec<PaintBlend> {
        self.calls.iter().map(|c| c.blend).collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.calls.push(DrawCall {
            kind: DrawKind::Rect,
            blend: paint.blend,
            color: paint.color,
            bounds: rect,
        });
    }

    fn fill_path(&mut self, path: &BezPath, paint: &Paint) {
        self.calls.push(DrawCall {
            kind: DrawKind::Path,
            blend: paint.blend,
            color: paint.color,
            bounds: path.bounding_box(),
        });
    }
}
