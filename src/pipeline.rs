//! End-to-end flows: locale list to glyph files, glyph files to banner, or both in one go.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::compose::compositor::{Entry, ScrollCompositor};
use crate::compose::select::{Exclusion, select_entries};
use crate::config::Config;
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::foundation::core::Canvas;
use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::glyph::batch::{GlyphFailure, RenderedGlyph, generate_batch};
use crate::glyph::plan::GlyphGenerator;
use crate::glyph::render::GlyphImage;
use crate::locale::provider::{BundledLocales, ListFileLocales, LocaleProvider};
use crate::render::frame::FrameRGBA;
use crate::render::text::LabelFont;
use crate::vector::svg::rasterize_svg;

/// Outcome of [`generate_flags`].
#[derive(Debug, Default)]
pub struct FlagsReport {
    /// Files written, PNG and SVG, in code order.
    pub written: Vec<PathBuf>,
    /// Stale glyph files removed from the output directory first.
    pub removed: usize,
    /// Codes that could not be rendered.
    pub failures: Vec<GlyphFailure>,
}

/// Outcome of a banner composition.
#[derive(Debug)]
pub struct BannerReport {
    /// GIF path.
    pub out: PathBuf,
    /// Labels of the composed entries, in order.
    pub selected: Vec<String>,
    /// Codes left out by selection.
    pub excluded: Vec<Exclusion>,
    /// Frames in the loop.
    pub frames: u64,
}

/// Outcome of [`run`].
#[derive(Debug)]
pub struct RunReport {
    /// Glyph files, when a flags directory was requested.
    pub flags: Option<FlagsReport>,
    /// Codes that could not be rendered or written (also listed in `flags` when present).
    pub failures: Vec<String>,
    /// The banner.
    pub banner: BannerReport,
}

/// A glyph read back from a flags directory.
#[derive(Clone, Debug)]
pub struct LoadedGlyph {
    /// File stem, used as the label.
    pub code: String,
    /// Decoded raster.
    pub image: GlyphImage,
}

/// Locale provider selected by the configuration.
pub fn provider_for(config: &Config) -> Box<dyn LocaleProvider> {
    match &config.locales {
        Some(path) => Box::new(ListFileLocales::new(path)),
        None => Box::new(BundledLocales),
    }
}

/// Label font selected by the configuration: the configured file, else a system face.
///
/// `None` when labels are disabled or no face could be found.
pub fn label_font_for(config: &Config) -> FlagreelResult<Option<LabelFont>> {
    if !config.labels {
        return Ok(None);
    }
    match &config.font {
        Some(path) => LabelFont::from_path(path).map(Some),
        None => {
            let font = LabelFont::system_default();
            if font.is_none() {
                tracing::warn!("no system font found, banner labels will be skipped");
            }
            Ok(font)
        }
    }
}

/// Create `dir` if needed and delete the `.png` / `.svg` files already in it.
///
/// Returns how many files were removed. Other files and subdirectories are left alone.
pub fn prepare_output_dir(dir: &Path) -> FlagreelResult<usize> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    let mut removed = 0;
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("read directory '{}'", dir.display()))?
            .path();
        if path.is_file() && matches!(glyph_extension(&path), Some("png" | "svg")) {
            std::fs::remove_file(&path)
                .with_context(|| format!("remove stale file '{}'", path.display()))?;
            removed += 1;
        }
    }
    if removed > 0 {
        tracing::info!(dir = %dir.display(), removed, "cleared stale glyph files");
    }
    Ok(removed)
}

/// File stem used for a code: anything but ASCII letters, digits, `-` and `_` becomes `_`.
pub fn file_stem_for(code: &str) -> String {
    code.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Write `<code>.png` and, when present, `<code>.svg` for every glyph.
///
/// A glyph whose [file stem](file_stem_for) was already taken by an earlier glyph is not written;
/// it is appended to `failures` instead.
pub fn write_glyph_files(
    dir: &Path,
    glyphs: &[RenderedGlyph],
    failures: &mut Vec<GlyphFailure>,
) -> FlagreelResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(glyphs.len() * 2);
    let mut owners: HashMap<String, &str> = HashMap::with_capacity(glyphs.len());
    for glyph in glyphs {
        let stem = file_stem_for(&glyph.code);
        if let Some(owner) = owners.get(&stem) {
            tracing::warn!(code = %glyph.code, taken_by = %owner, stem = %stem, "file name collision");
            failures.push(GlyphFailure {
                code: glyph.code.clone(),
                error: FlagreelError::validation(format!(
                    "file name '{stem}' is already used by '{owner}'"
                )),
            });
            continue;
        }
        let png = dir.join(format!("{stem}.png"));
        glyph.image.save_png(&png)?;
        written.push(png);
        if let Some(svg) = &glyph.svg {
            let path = dir.join(format!("{stem}.svg"));
            std::fs::write(&path, svg)
                .with_context(|| format!("write svg '{}'", path.display()))?;
            written.push(path);
        }
        owners.insert(stem, &glyph.code);
    }
    Ok(written)
}

/// Render every code from `provider` into `dir`, replacing previous glyph files.
#[tracing::instrument(skip_all, fields(dir = %dir.display()))]
pub fn generate_flags(
    provider: &dyn LocaleProvider,
    dir: &Path,
    config: &Config,
) -> FlagreelResult<FlagsReport> {
    config.validate()?;
    let codes = provider.codes()?;
    tracing::info!(codes = codes.len(), "generating glyphs");
    let batch = generate_batch(&GlyphGenerator::default(), &codes, &config.glyphs)?;
    let removed = prepare_output_dir(dir)?;
    let mut failures = batch.failures;
    let written = write_glyph_files(dir, &batch.glyphs, &mut failures)?;
    tracing::info!(files = written.len(), failed = failures.len(), "glyphs written");
    Ok(FlagsReport {
        written,
        removed,
        failures,
    })
}

/// Read the glyphs of a flags directory, sorted by file stem.
///
/// A `.png` is preferred; a stem with only an `.svg` is rasterized at `svg_size`.
pub fn load_glyph_dir(dir: &Path, svg_size: u32) -> FlagreelResult<Vec<LoadedGlyph>> {
    let mut by_stem: BTreeMap<String, (Option<PathBuf>, Option<PathBuf>)> = BTreeMap::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("read flags directory '{}'", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("read flags directory '{}'", dir.display()))?
            .path();
        if !path.is_file() {
            continue;
        }
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let slot = match glyph_extension(&path) {
            Some("png") => &mut by_stem.entry(stem).or_default().0,
            Some("svg") => &mut by_stem.entry(stem).or_default().1,
            _ => continue,
        };
        *slot = Some(path);
    }

    let canvas = Canvas::square(svg_size)?;
    let mut out = Vec::with_capacity(by_stem.len());
    for (code, files) in by_stem {
        let image = match files {
            (Some(png), _) => {
                let bytes =
                    std::fs::read(&png).with_context(|| format!("read '{}'", png.display()))?;
                FrameRGBA::decode(&bytes)?
            }
            (None, Some(svg)) => {
                let text = std::fs::read_to_string(&svg)
                    .with_context(|| format!("read '{}'", svg.display()))?;
                rasterize_svg(&text, canvas)?
            }
            (None, None) => continue,
        };
        out.push(LoadedGlyph { code, image });
    }
    tracing::debug!(dir = %dir.display(), glyphs = out.len(), "loaded glyph directory");
    Ok(out)
}

/// Select, compose and write the banner GIF for labelled glyphs.
pub fn compose_banner<'a>(
    glyphs: impl IntoIterator<Item = (&'a str, &'a GlyphImage)>,
    out: &Path,
    config: &Config,
    font: Option<LabelFont>,
) -> FlagreelResult<BannerReport> {
    config.validate()?;
    let entries = glyphs
        .into_iter()
        .map(|(label, image)| Entry { image, label });
    let selection = select_entries(entries, |e| e.label, config.select)?;
    for e in &selection.excluded {
        tracing::info!(code = %e.code, reason = %e.reason, "excluded from banner");
    }

    let compositor = ScrollCompositor::new(config.banner.clone())?.with_font(font);
    let mut sink = GifSink::new(GifSinkOpts {
        frame_delay_ms: config.frame_delay_ms,
        bg: config.banner.background,
        ..GifSinkOpts::new(out)
    })?;
    let frames = compositor.compose(&selection.selected, &mut sink)?;

    Ok(BannerReport {
        out: out.to_path_buf(),
        selected: selection
            .selected
            .iter()
            .map(|e| e.label.to_owned())
            .collect(),
        excluded: selection.excluded,
        frames,
    })
}

/// Compose the banner from a directory written by [`generate_flags`].
#[tracing::instrument(skip_all, fields(flags = %flags_dir.display(), out = %out.display()))]
pub fn banner_from_dir(flags_dir: &Path, out: &Path, config: &Config) -> FlagreelResult<BannerReport> {
    config.validate()?;
    let glyphs = load_glyph_dir(flags_dir, config.glyphs.size)?;
    if glyphs.is_empty() {
        return Err(FlagreelError::empty_input(format!(
            "no glyph files in '{}'",
            flags_dir.display()
        )));
    }
    let font = label_font_for(config)?;
    compose_banner(
        glyphs.iter().map(|g| (g.code.as_str(), &g.image)),
        out,
        config,
        font,
    )
}

/// Generate glyphs in memory (optionally also writing them to `flags_dir`) and compose the banner.
#[tracing::instrument(skip_all, fields(out = %out.display()))]
pub fn run(
    provider: &dyn LocaleProvider,
    out: &Path,
    flags_dir: Option<&Path>,
    config: &Config,
) -> FlagreelResult<RunReport> {
    config.validate()?;
    let codes = provider.codes()?;
    let batch = generate_batch(&GlyphGenerator::default(), &codes, &config.glyphs)?;

    let font = label_font_for(config)?;
    let banner = compose_banner(
        batch
            .glyphs
            .iter()
            .map(|g| (g.code.as_str(), &g.image)),
        out,
        config,
        font,
    )?;

    let failures: Vec<String>;
    let flags = match flags_dir {
        Some(dir) => {
            let removed = prepare_output_dir(dir)?;
            let mut glyph_failures = batch.failures;
            let written = write_glyph_files(dir, &batch.glyphs, &mut glyph_failures)?;
            failures = glyph_failures.iter().map(|f| f.code.clone()).collect();
            Some(FlagsReport {
                written,
                removed,
                failures: glyph_failures,
            })
        }
        None => {
            failures = batch.failures.iter().map(|f| f.code.clone()).collect();
            None
        }
    };

    Ok(RunReport {
        flags,
        failures,
        banner,
    })
}

fn glyph_extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str()).map(|e| {
        if e.eq_ignore_ascii_case("png") {
            "png"
        } else if e.eq_ignore_ascii_case("svg") {
            "svg"
        } else {
            ""
        }
    })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
