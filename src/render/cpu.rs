use vello_cpu::kurbo::Shape as _;

use crate::{
    foundation::{
        core::{Canvas, Point},
        error::{DotwalkError, DotwalkResult},
    },
    grid::dot::Dot,
    render::frame::{FrameRGBA, RenderSettings},
    session::AnimationSession,
};

/// Circle flattening tolerance in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// CPU rasterizer for the dot grid.
///
/// Every `draw` recomputes the whole frame from the session; nothing carries over between
/// frames except the reused pixmap allocation.
pub struct CpuRenderer {
    settings: RenderSettings,
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuRenderer {
    /// Renderer with no surface yet; the pixmap is allocated on the first `draw`.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            surface: None,
        }
    }

    /// Drawing options.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Rasterize every dot of `session` into a premultiplied frame the size of its canvas.
    #[tracing::instrument(skip_all, fields(generation = session.generation().0, dots = session.len()))]
    pub fn draw(&mut self, session: &AnimationSession) -> DotwalkResult<FrameRGBA> {
        let canvas = session.canvas();
        let line_width = self.settings.line_width;
        let clear = self.settings.clear_rgba;
        let surface = self.ensure_surface(canvas)?;

        clear_pixmap(&mut surface.pixmap, [0, 0, 0, 0]);

        let mut ctx = vello_cpu::RenderContext::new(surface.width, surface.height);
        if let Some([r, g, b, a]) = clear {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(surface.width),
                f64::from(surface.height),
            ));
        }

        for dot in session.dots() {
            draw_dot(&mut ctx, dot, line_width);
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut surface.pixmap);

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn ensure_surface(&mut self, canvas: Canvas) -> DotwalkResult<&mut CpuSurface> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| DotwalkError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| DotwalkError::render("surface height exceeds u16"))?;

        let stale = self
            .surface
            .as_ref()
            .is_none_or(|s| s.width != width || s.height != height);
        if stale {
            self.surface = Some(CpuSurface {
                width,
                height,
                pixmap: vello_cpu::Pixmap::new(width, height),
            });
        }
        self.surface
            .as_mut()
            .ok_or_else(|| DotwalkError::render("surface missing after allocation"))
    }
}

/// Trail line, then the scaled circle, both inside one opacity layer.
fn draw_dot(ctx: &mut vello_cpu::RenderContext, dot: &Dot, line_width: f64) {
    let opacity = dot.opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }

    let c = dot.color;
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));

    let layered = opacity < 1.0;
    if layered {
        ctx.push_opacity_layer(opacity as f32);
    }

    if dot.trail.from != dot.position && line_width > 0.0 {
        let mut line = vello_cpu::kurbo::BezPath::new();
        line.move_to(point_to_cpu(dot.trail.from));
        line.line_to(point_to_cpu(dot.position));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(line_width));
        ctx.stroke_path(&line);
    }

    let radius = dot.size / 2.0 * dot.scale.clamp(0.0, 1.0);
    if radius > 0.0 {
        let circle = vello_cpu::kurbo::Circle::new(point_to_cpu(dot.center()), radius);
        ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
    }

    if layered {
        ctx.pop_layer();
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
