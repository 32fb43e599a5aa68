use crate::foundation::core::{Canvas, Point, Rgba8, Vec2};
use crate::foundation::error::FlagreelResult;
use crate::glyph::plan::{Extent, GlyphPlan, LayoutMode};
use crate::render::cpu::CpuSurface;
use crate::render::frame::FrameRGBA;
use crate::render::outline::Outline;
use crate::render::surface::Surface;
use crate::vector::svg::{SvgDocument, SvgPaint};

/// Raster rendering of a glyph: a square premultiplied RGBA8 frame.
pub type GlyphImage = FrameRGBA;

/// One primitive drawing step of a glyph, in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// Fill an outline.
    Fill {
        /// Shape to fill.
        outline: Outline,
        /// Fill color.
        color: Rgba8,
    },
    /// Stroke an outline.
    Stroke {
        /// Shape to stroke.
        outline: Outline,
        /// Stroke color.
        color: Rgba8,
        /// Line width in pixels.
        width: f64,
    },
}

/// Lower a plan into ordered paint operations for a square canvas of `size` pixels.
///
/// The plan's `max_extent` is mapped onto half the canvas size. Every segment is filled and then
/// its boundaries are stroked, so a later segment never blends into the previous one's edge. The
/// center dot comes last.
pub fn paint_ops(plan: &GlyphPlan, size: f64) -> Vec<PaintOp> {
    let scale = (size / 2.0) / plan.max_extent;
    let offset = Vec2::new(size / 2.0, size / 2.0);
    let center = Point::ORIGIN;
    let stroke_width = plan.outline_width * scale;

    let mut ops = Vec::with_capacity(plan.segments.len() * 3 + 1);
    let mut push_segment = |body: Outline, boundaries: Vec<Outline>, color: Rgba8| {
        ops.push(PaintOp::Fill {
            outline: body.scaled(scale, offset),
            color,
        });
        for b in boundaries {
            ops.push(PaintOp::Stroke {
                outline: b.scaled(scale, offset),
                color: plan.outline_color,
                width: stroke_width,
            });
        }
    };

    for seg in &plan.segments {
        let color = seg.color.to_rgba8();
        match (plan.mode, seg.extent) {
            (LayoutMode::Rings, Extent::Radial { outer, inner }) => {
                let outer = Outline::Circle {
                    center,
                    radius: outer,
                };
                let mut boundaries = vec![outer.clone()];
                if inner > 0.0 {
                    boundaries.push(Outline::Circle {
                        center,
                        radius: inner,
                    });
                }
                push_segment(outer, boundaries, color);
            }
            (LayoutMode::Hexagons, Extent::Radial { outer, inner }) => {
                let outer = Outline::hexagon(center, outer);
                let mut boundaries = vec![outer.clone()];
                if inner > 0.0 {
                    boundaries.push(Outline::hexagon(center, inner));
                }
                push_segment(outer, boundaries, color);
            }
            (_, Extent::Angular { start, sweep }) => {
                // A single full-turn sector is a plain disc, so no radial seam is stroked.
                let body = if plan.segments.len() == 1 {
                    Outline::Circle {
                        center,
                        radius: plan.max_extent,
                    }
                } else {
                    Outline::wedge(center, plan.max_extent, start, sweep)
                };
                push_segment(body.clone(), vec![body], color);
            }
            (_, Extent::Radial { outer, .. }) => {
                let body = Outline::Circle {
                    center,
                    radius: outer,
                };
                push_segment(body.clone(), vec![body], color);
            }
        }
    }

    ops.push(PaintOp::Fill {
        outline: Outline::Circle {
            center,
            radius: plan.center_dot.radius,
        }
        .scaled(scale, offset),
        color: plan.center_dot.color,
    });
    ops
}

/// Draw a plan onto an existing surface, which is cleared to transparent first.
pub fn paint(plan: &GlyphPlan, surface: &mut dyn Surface) {
    let canvas = surface.canvas();
    let size = f64::from(canvas.width.min(canvas.height));
    surface.clear(Rgba8::TRANSPARENT);
    for op in paint_ops(plan, size) {
        match op {
            PaintOp::Fill { outline, color } => surface.fill(&outline, color),
            PaintOp::Stroke {
                outline,
                color,
                width,
            } => surface.stroke(&outline, color, width),
        }
    }
}

/// Rasterize a plan into a `size` x `size` image.
#[tracing::instrument(skip(plan), fields(code = %plan.code))]
pub fn render(plan: &GlyphPlan, size: u32) -> FlagreelResult<GlyphImage> {
    let canvas = Canvas::square(size)?;
    let mut surface = CpuSurface::new(canvas);
    paint(plan, &mut surface);
    surface.read_pixels()
}

/// Serialize a plan as an SVG document with a `size` x `size` view box.
pub fn render_svg(plan: &GlyphPlan, size: u32) -> FlagreelResult<String> {
    let canvas = Canvas::square(size)?;
    let mut doc = SvgDocument::new(canvas);
    for op in paint_ops(plan, f64::from(size)) {
        match op {
            PaintOp::Fill { outline, color } => doc.outline(&outline, SvgPaint::fill(color)),
            PaintOp::Stroke {
                outline,
                color,
                width,
            } => doc.outline(&outline, SvgPaint::stroke(color, width)),
        };
    }
    Ok(doc.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/render.rs"]
mod tests;
