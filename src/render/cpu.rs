use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::core::{Affine, Canvas, Rect, Rgba8};
use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::render::frame::FrameRGBA;
use crate::render::outline::Outline;
use crate::render::surface::{ImageId, Surface, TextStyle};
use crate::render::text::{LabelFont, TextBrushRgba8, TextLayoutEngine};

#[derive(Clone)]
struct ImagePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct LayoutKey {
    text: String,
    size_bits: u32,
    color: Rgba8,
}

/// CPU drawing surface powered by `vello_cpu`.
///
/// One render context and one target pixmap are kept for the lifetime of the surface and reused
/// for every frame.
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    target: vello_cpu::Pixmap,
    images: Vec<ImagePaint>,
    text: Option<TextLayoutEngine>,
    layouts: HashMap<LayoutKey, Arc<parley::Layout<TextBrushRgba8>>>,
    warned_no_font: bool,
}

impl CpuSurface {
    /// Create a surface without a label font; text draws are skipped.
    pub fn new(canvas: Canvas) -> Self {
        let (w, h) = (canvas.width_u16(), canvas.height_u16());
        Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            target: vello_cpu::Pixmap::new(w, h),
            images: Vec::new(),
            text: None,
            layouts: HashMap::new(),
            warned_no_font: false,
        }
    }

    /// Create a surface that draws text with `font`.
    pub fn with_font(canvas: Canvas, font: Option<&LabelFont>) -> FlagreelResult<Self> {
        let mut surface = Self::new(canvas);
        surface.text = font.map(TextLayoutEngine::new).transpose()?;
        Ok(surface)
    }

    fn layout_for(
        &mut self,
        text: &str,
        style: &TextStyle,
    ) -> FlagreelResult<Option<Arc<parley::Layout<TextBrushRgba8>>>> {
        let Some(engine) = self.text.as_mut() else {
            return Ok(None);
        };
        let key = LayoutKey {
            text: text.to_owned(),
            size_bits: style.size_px.to_bits(),
            color: style.color,
        };
        if let Some(layout) = self.layouts.get(&key) {
            return Ok(Some(layout.clone()));
        }
        let layout = Arc::new(engine.layout_line(text, style.size_px, style.color.into())?);
        self.layouts.insert(key, layout.clone());
        Ok(Some(layout))
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, color: Rgba8) {
        self.ctx.reset();
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        if color.a == 0 {
            return;
        }
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        ));
    }

    fn fill(&mut self, outline: &Outline, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(&outline.to_bez_path()));
    }

    fn stroke(&mut self, outline: &Outline, color: Rgba8, width: f64) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(&outline.to_bez_path()));
    }

    fn register_image(&mut self, image: &FrameRGBA) -> FlagreelResult<ImageId> {
        let paint = if image.premultiplied {
            rgba_premul_to_image(&image.data, image.width, image.height)?
        } else {
            let mut tmp = image.data.clone();
            crate::foundation::math::premultiply_rgba8_in_place(&mut tmp);
            rgba_premul_to_image(&tmp, image.width, image.height)?
        };
        self.images.push(ImagePaint {
            paint,
            w: image.width,
            h: image.height,
        });
        Ok(ImageId(self.images.len() - 1))
    }

    fn draw_image(&mut self, id: ImageId, dst: Rect) -> FlagreelResult<()> {
        let img = self
            .images
            .get(id.0)
            .cloned()
            .ok_or_else(|| FlagreelError::render(format!("unknown image id {}", id.0)))?;
        let (w, h) = (f64::from(img.w), f64::from(img.h));
        let tr = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / w, dst.height() / h);
        self.ctx.set_transform(affine_to_cpu(tr));
        self.ctx.set_paint(img.paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        left: f64,
        center_y: f64,
        style: &TextStyle,
    ) -> FlagreelResult<()> {
        let Some(layout) = self.layout_for(text, style)? else {
            if !self.warned_no_font {
                tracing::warn!("no label font available, skipping text");
                self.warned_no_font = true;
            }
            return Ok(());
        };
        let Some(engine) = self.text.as_ref() else {
            return Ok(());
        };

        let top = center_y - f64::from(layout.height()) / 2.0;
        self.ctx.set_transform(affine_to_cpu(Affine::translate((left, top))));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(engine.font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn read_pixels(&mut self) -> FlagreelResult<FrameRGBA> {
        self.target.data_as_u8_slice_mut().fill(0);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.target);
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.target.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> FlagreelResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FlagreelError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FlagreelError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(FlagreelError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> FlagreelResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
