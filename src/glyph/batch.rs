use crate::foundation::core::Canvas;
use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::glyph::plan::{GlyphGenerator, GlyphPlan, LayoutMode};
use crate::glyph::render::{GlyphImage, paint, render_svg};
use crate::render::cpu::CpuSurface;
use crate::render::surface::Surface;
use rayon::prelude::*;

/// Options for [`generate_batch`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlyphBatchOpts {
    /// Layout mode shared by every glyph.
    pub mode: LayoutMode,
    /// Square output size in pixels.
    pub size: u32,
    /// Plan extent; `None` maps the glyph onto half the output size.
    pub max_extent: Option<f64>,
    /// Also produce the SVG document of every glyph.
    pub svg: bool,
    /// Render on a rayon pool.
    pub parallel: bool,
    /// Override rayon worker threads (parallel mode only).
    pub threads: Option<usize>,
}

impl Default for GlyphBatchOpts {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Rings,
            size: 256,
            max_extent: None,
            svg: true,
            parallel: true,
            threads: None,
        }
    }
}

impl GlyphBatchOpts {
    /// Extent passed to the planner.
    pub fn effective_max_extent(&self) -> f64 {
        self.max_extent.unwrap_or(f64::from(self.size) / 2.0)
    }
}

/// A successfully generated glyph.
#[derive(Clone, Debug)]
pub struct RenderedGlyph {
    /// Code exactly as provided.
    pub code: String,
    /// The plan both outputs were rendered from.
    pub plan: GlyphPlan,
    /// Raster output.
    pub image: GlyphImage,
    /// Vector output, when requested.
    pub svg: Option<String>,
}

/// A code that could not be turned into a glyph.
#[derive(Debug)]
pub struct GlyphFailure {
    /// Code exactly as provided.
    pub code: String,
    /// What went wrong.
    pub error: FlagreelError,
}

/// Outcome of [`generate_batch`]: glyphs and failures, each in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Generated glyphs.
    pub glyphs: Vec<RenderedGlyph>,
    /// Codes that failed, with their errors.
    pub failures: Vec<GlyphFailure>,
}

/// Generate glyphs for every code.
///
/// Per-code failures are logged and collected; they never abort the batch. Only invalid options
/// (zero size, bad extent, zero threads) fail the whole call.
#[tracing::instrument(skip(generator, codes), fields(codes = codes.len()))]
pub fn generate_batch(
    generator: &GlyphGenerator,
    codes: &[String],
    opts: &GlyphBatchOpts,
) -> FlagreelResult<BatchReport> {
    let canvas = Canvas::square(opts.size)?;
    let max_extent = opts.effective_max_extent();
    // Surface-independent validation of the extent, so it is reported once instead of per code.
    if !max_extent.is_finite() || max_extent <= generator.center_dot_radius() {
        return Err(FlagreelError::validation(format!(
            "max_extent must be finite and larger than the center hole, got {max_extent}"
        )));
    }

    let results: Vec<FlagreelResult<RenderedGlyph>> = if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            codes
                .par_iter()
                .map_init(
                    || CpuSurface::new(canvas),
                    |surface, code| render_one(generator, surface, code, max_extent, opts),
                )
                .collect()
        })
    } else {
        let mut surface = CpuSurface::new(canvas);
        codes
            .iter()
            .map(|code| render_one(generator, &mut surface, code, max_extent, opts))
            .collect()
    };

    let mut report = BatchReport::default();
    for (code, result) in codes.iter().zip(results) {
        match result {
            Ok(glyph) => report.glyphs.push(glyph),
            Err(error) => {
                tracing::warn!(code = %code, error = %error, "skipping glyph");
                report.failures.push(GlyphFailure {
                    code: code.clone(),
                    error,
                });
            }
        }
    }
    tracing::debug!(
        rendered = report.glyphs.len(),
        failed = report.failures.len(),
        "glyph batch done"
    );
    Ok(report)
}

fn render_one(
    generator: &GlyphGenerator,
    surface: &mut CpuSurface,
    code: &str,
    max_extent: f64,
    opts: &GlyphBatchOpts,
) -> FlagreelResult<RenderedGlyph> {
    let plan = generator.plan(code, opts.mode, max_extent)?;
    paint(&plan, surface);
    let image = surface.read_pixels()?;
    let svg = if opts.svg {
        Some(render_svg(&plan, opts.size)?)
    } else {
        None
    };
    Ok(RenderedGlyph {
        code: code.to_owned(),
        plan,
        image,
        svg,
    })
}

fn build_thread_pool(threads: Option<usize>) -> FlagreelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FlagreelError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FlagreelError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/batch.rs"]
mod tests;
