use super::*;
use crate::glyph::plan::{CENTER_DOT_RADIUS, generate_glyph_plan};
use crate::render::recording::{DrawCall, RecordingSurface};
use crate::vector::svg::rasterize_svg;

fn close(a: [u8; 4], b: [u8; 4], tol: u8) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= tol)
}

/// Pixel probes in the middle of each segment, away from every stroked edge.
fn probes(plan: &GlyphPlan, size: u32) -> Vec<((u32, u32), [u8; 4])> {
    let c = f64::from(size) / 2.0;
    let scale = c / plan.max_extent;
    let at = |r: f64, angle: f64| -> (u32, u32) {
        (
            (c + r * scale * angle.cos()).floor() as u32,
            (c + r * scale * angle.sin()).floor() as u32,
        )
    };
    let mut out = Vec::new();
    for seg in &plan.segments {
        let rgba = seg.color.to_rgba8();
        let expected = [rgba.r, rgba.g, rgba.b, 255];
        match seg.extent {
            Extent::Radial { outer, inner } => {
                let inner = inner.max(CENTER_DOT_RADIUS);
                let r = (outer + inner) / 2.0;
                for k in 0..6 {
                    out.push((at(r, std::f64::consts::FRAC_PI_3 * f64::from(k)), expected));
                }
            }
            Extent::Angular { start, sweep } => {
                out.push((at(plan.max_extent * 0.6, start + sweep / 2.0), expected));
            }
        }
    }
    out.push(((size / 2, size / 2), [0, 0, 0, 255]));
    out
}

#[test]
fn segments_are_filled_before_their_outline_is_stroked() {
    let plan = generate_glyph_plan("de-DE", LayoutMode::Rings, 128.0).unwrap();
    let mut surface = RecordingSurface::new(Canvas::square(256).unwrap());
    paint(&plan, &mut surface);
    let calls = surface.calls();

    assert_eq!(calls[0], DrawCall::Clear(Rgba8::TRANSPARENT));
    let body = &calls[1..];
    // 4 segments: fill + outer stroke + inner stroke, except the innermost disc.
    assert_eq!(body.len(), 3 + 3 + 3 + 2 + 1);
    let mut i = 0;
    for seg in &plan.segments {
        assert!(matches!(body[i], DrawCall::Fill { color, .. } if color == seg.color.to_rgba8()));
        assert!(matches!(body[i + 1], DrawCall::Stroke { width, .. } if width == 2.0));
        i += if seg.radii().unwrap().1 > 0.0 { 3 } else { 2 };
    }
    assert!(matches!(
        &body[i],
        DrawCall::Fill { outline: Outline::Circle { radius, .. }, color } if *radius == 10.0 && *color == Rgba8::BLACK
    ));
}

#[test]
fn paint_ops_scale_plan_units_to_canvas() {
    let plan = generate_glyph_plan("x", LayoutMode::Rings, 128.0).unwrap();
    let ops = paint_ops(&plan, 64.0);
    let PaintOp::Fill { outline, .. } = &ops[0] else {
        panic!("expected fill first");
    };
    assert_eq!(
        outline,
        &Outline::Circle {
            center: Point::new(32.0, 32.0),
            radius: 32.0
        }
    );
    let PaintOp::Stroke { width, .. } = &ops[1] else {
        panic!("expected stroke second");
    };
    assert_eq!(*width, 0.5);
}

#[test]
fn single_sector_has_no_seam() {
    let plan = generate_glyph_plan("q", LayoutMode::Sectors, 128.0).unwrap();
    let ops = paint_ops(&plan, 256.0);
    assert_eq!(ops.len(), 3);
    for op in &ops {
        let (PaintOp::Fill { outline, .. } | PaintOp::Stroke { outline, .. }) = op;
        assert!(matches!(outline, Outline::Circle { .. }));
    }
}

#[test]
fn case_variants_render_pixel_identical() {
    for mode in [LayoutMode::Rings, LayoutMode::Hexagons, LayoutMode::Sectors] {
        let a = render(&generate_glyph_plan("fr-FR", mode, 128.0).unwrap(), 128).unwrap();
        let b = render(&generate_glyph_plan("fr_fr", mode, 128.0).unwrap(), 128).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn raster_probes_hit_segment_colors() {
    for mode in [LayoutMode::Rings, LayoutMode::Hexagons, LayoutMode::Sectors] {
        let plan = generate_glyph_plan("en-US", mode, 128.0).unwrap();
        let img = render(&plan, 256).unwrap();
        assert_eq!((img.width, img.height), (256, 256));
        for ((x, y), expected) in probes(&plan, 256) {
            let got = img.pixel(x, y).unwrap();
            assert!(close(got, expected, 1), "{mode:?} at ({x},{y}): {got:?} vs {expected:?}");
        }
    }
}

#[test]
fn vector_and_raster_depict_the_same_glyph() {
    for mode in [LayoutMode::Rings, LayoutMode::Hexagons, LayoutMode::Sectors] {
        let plan = generate_glyph_plan("pt-BR", mode, 128.0).unwrap();
        let raster = render(&plan, 256).unwrap();
        let svg = render_svg(&plan, 256).unwrap();
        let vector = rasterize_svg(&svg, Canvas::square(256).unwrap()).unwrap();
        for ((x, y), _) in probes(&plan, 256) {
            let a = raster.pixel(x, y).unwrap();
            let b = vector.pixel(x, y).unwrap();
            assert!(close(a, b, 2), "{mode:?} at ({x},{y}): {a:?} vs {b:?}");
        }
    }
}

#[test]
fn center_dot_renders_identically_for_every_code() {
    let a = render(&generate_glyph_plan("en-US", LayoutMode::Rings, 128.0).unwrap(), 256).unwrap();
    let b = render(&generate_glyph_plan("zh-TW", LayoutMode::Rings, 128.0).unwrap(), 256).unwrap();
    // Interior of the dot (radius 10 around 128,128), away from its anti-aliased rim.
    for y in 122..134 {
        for x in 122..134 {
            assert_eq!(a.pixel(x, y), Some([0, 0, 0, 255]));
            assert_eq!(a.pixel(x, y), b.pixel(x, y));
        }
    }
}

#[test]
fn corners_stay_transparent() {
    let plan = generate_glyph_plan("it-IT", LayoutMode::Rings, 128.0).unwrap();
    let img = render(&plan, 256).unwrap();
    assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(img.pixel(255, 255), Some([0, 0, 0, 0]));
}

#[test]
fn svg_lists_circles_for_rings() {
    let plan = generate_glyph_plan("de", LayoutMode::Rings, 128.0).unwrap();
    let svg = render_svg(&plan, 256).unwrap();
    // 2 fills, 2 outer strokes, 1 inner stroke, center dot.
    assert_eq!(svg.matches("<circle").count(), 6);
    assert!(svg.contains(r#"stroke-width="2""#));
}

#[test]
fn zero_size_is_rejected() {
    let plan = generate_glyph_plan("de", LayoutMode::Rings, 128.0).unwrap();
    assert!(render(&plan, 0).is_err());
    assert!(render_svg(&plan, 0).is_err());
}
