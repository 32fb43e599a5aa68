use std::fmt::Write as _;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::render::frame::FrameRGBA;
use crate::render::outline::Outline;

/// Fill and stroke attributes of one SVG element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SvgPaint {
    /// Fill color, `None` for `fill="none"`.
    pub fill: Option<Rgba8>,
    /// Stroke color and width.
    pub stroke: Option<(Rgba8, f64)>,
}

impl SvgPaint {
    /// Filled, no stroke.
    pub fn fill(color: Rgba8) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Stroked, no fill.
    pub fn stroke(color: Rgba8, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some((color, width)),
        }
    }
}

/// Minimal SVG document builder.
#[derive(Clone, Debug)]
pub struct SvgDocument {
    canvas: Canvas,
    body: String,
}

impl SvgDocument {
    /// Start a document with a `0 0 width height` view box.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            body: String::new(),
        }
    }

    /// Append a circle element.
    pub fn circle(&mut self, center: Point, radius: f64, paint: SvgPaint) -> &mut Self {
        let _ = write!(
            self.body,
            r#"    <circle cx="{}" cy="{}" r="{}"{}/>"#,
            num(center.x),
            num(center.y),
            num(radius),
            paint_attrs(paint)
        );
        self.body.push('\n');
        self
    }

    /// Append a polygon element.
    pub fn polygon(&mut self, points: &[Point], paint: SvgPaint) -> &mut Self {
        let pts = points
            .iter()
            .map(|p| format!("{},{}", num(p.x), num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            self.body,
            r#"    <polygon points="{pts}"{}/>"#,
            paint_attrs(paint)
        );
        self.body.push('\n');
        self
    }

    /// Append a path element.
    pub fn path(&mut self, path: &kurbo::BezPath, paint: SvgPaint) -> &mut Self {
        let _ = write!(
            self.body,
            r#"    <path d="{}"{}/>"#,
            path.to_svg(),
            paint_attrs(paint)
        );
        self.body.push('\n');
        self
    }

    /// Append whichever element matches `outline`.
    pub fn outline(&mut self, outline: &Outline, paint: SvgPaint) -> &mut Self {
        match outline {
            Outline::Circle { center, radius } => self.circle(*center, *radius, paint),
            Outline::Polygon(points) => self.polygon(points, paint),
            Outline::Path(path) => self.path(path, paint),
        }
    }

    /// Serialize to SVG text.
    pub fn finish(&self) -> String {
        let (w, h) = (self.canvas.width, self.canvas.height);
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        out.push_str("  <g>\n");
        out.push_str(&self.body);
        out.push_str("  </g>\n</svg>\n");
        out
    }
}

fn paint_attrs(paint: SvgPaint) -> String {
    let mut out = String::new();
    match paint.fill {
        Some(c) => {
            let _ = write!(out, r#" fill="{}""#, c.to_hex_rgb());
            if c.a != 255 {
                let _ = write!(out, r#" fill-opacity="{}""#, num(f64::from(c.a) / 255.0));
            }
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some((c, width)) = paint.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            c.to_hex_rgb(),
            num(width)
        );
    }
    out
}

fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

/// Rasterize SVG text with `resvg` into a premultiplied frame of `canvas` size.
pub fn rasterize_svg(svg: &str, canvas: Canvas) -> FlagreelResult<FrameRGBA> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;

    let size = tree.size();
    if !(size.width() > 0.0 && size.height() > 0.0) {
        return Err(FlagreelError::render("svg has invalid width/height"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| FlagreelError::render("failed to allocate svg pixmap"))?;
    let sx = (canvas.width as f32) / size.width();
    let sy = (canvas.height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());
    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data: pixmap.data().to_vec(),
        premultiplied: true,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/vector/svg.rs"]
mod tests;
