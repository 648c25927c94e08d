use vello_cpu::peniko::{BlendMode, Compose, Mix};

use crate::{
    draw::canvas::Canvas,
    foundation::core::{BezPath, Point, Rect, Rgba8, SurfaceSize},
    foundation::error::{SpotlightError, SpotlightResult},
    paint::{Paint, PaintBlend},
    render::frame::FrameRGBA,
    surface::{host::SurfaceHost, overlay::OverlaySurface},
};

/// [`Canvas`] backed by a `vello_cpu` render context.
pub struct CpuCanvas<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
    size: SurfaceSize,
}

impl<'a> CpuCanvas<'a> {
    pub fn new(ctx: &'a mut vello_cpu::RenderContext, size: SurfaceSize) -> Self {
        Self { ctx, size }
    }

    fn fill_with(&mut self, paint: &Paint, fill: impl FnOnce(&mut vello_cpu::RenderContext)) {
        self.ctx.set_paint(color_to_cpu(paint.color));
        match blend_to_cpu(paint.blend) {
            Some(mode) => {
                self.ctx.push_blend_layer(mode);
                fill(&mut *self.ctx);
                self.ctx.pop_layer();
            }
            None => fill(&mut *self.ctx),
        }
    }
}

impl Canvas for CpuCanvas<'_> {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let rect = rect_to_cpu(rect);
        self.fill_with(paint, |ctx| ctx.fill_rect(&rect));
    }

    fn fill_path(&mut self, path: &BezPath, paint: &Paint) {
        let path = bezpath_to_cpu(path);
        self.fill_with(paint, |ctx| ctx.fill_path(&path));
    }
}

/// Rasterizes an [`OverlaySurface`] into premultiplied RGBA8 frames.
///
/// The render context and pixmap are reused across frames of the same size.
pub struct CpuRenderer {
    size: SurfaceSize,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuRenderer {
    pub fn new(size: SurfaceSize) -> SpotlightResult<Self> {
        let width: u16 = size
            .width
            .try_into()
            .map_err(|_| SpotlightError::render("surface width exceeds u16"))?;
        let height: u16 = size
            .height
            .try_into()
            .map_err(|_| SpotlightError::render("surface height exceeds u16"))?;
        Ok(Self {
            size,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Draw `surface` at its current opacity.
    #[tracing::instrument(skip_all, fields(alpha = surface.alpha()))]
    pub fn render<H: SurfaceHost>(
        &mut self,
        surface: &OverlaySurface<H>,
    ) -> SpotlightResult<FrameRGBA> {
        let host_size = surface.host().size();
        if host_size != self.size {
            return Err(SpotlightError::render(format!(
                "surface is {}x{}, renderer is {}x{}",
                host_size.width, host_size.height, self.size.width, self.size.height
            )));
        }

        let alpha = surface.alpha().clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return Ok(FrameRGBA::transparent(self.size.width, self.size.height));
        }

        self.ctx.reset();
        clear_pixmap(&mut self.pixmap);
        if alpha < 1.0 {
            self.ctx.push_opacity_layer(alpha as f32);
        }
        surface.draw(&mut CpuCanvas::new(&mut self.ctx, self.size));
        if alpha < 1.0 {
            self.ctx.pop_layer();
        }
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);

        Ok(FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

/// One-shot rendering with a fresh [`CpuRenderer`] sized to the surface's host.
pub fn render_frame<H: SurfaceHost>(surface: &OverlaySurface<H>) -> SpotlightResult<FrameRGBA> {
    CpuRenderer::new(surface.host().size())?.render(surface)
}

/// Source-over needs no layer. The other modes composite a layer holding just the fill, so
/// only covered pixels are affected.
fn blend_to_cpu(blend: PaintBlend) -> Option<BlendMode> {
    match blend {
        PaintBlend::SourceOver => None,
        PaintBlend::Clear => Some(BlendMode::new(Mix::Normal, Compose::DestOut)),
        PaintBlend::Plus => Some(BlendMode::new(Mix::Normal, Compose::Plus)),
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
