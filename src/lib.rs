//! flagreel derives a small deterministic glyph ("flag") from any locale code and turns a set of
//! glyphs into a seamlessly looping scroll banner.
//!
//! - Plan a glyph with [`generate_glyph_plan`] (pure data, no drawing)
//! - Render it to pixels with [`glyph::render::render`] or to SVG with
//!   [`glyph::render::render_svg`]
//! - Compose labelled glyphs with a [`ScrollCompositor`] and stream the frames into a
//!   [`FrameSink`] such as [`GifSink`]
//!
//! The [`pipeline`] module wires locale providers, batch rendering, glyph files and the GIF sink
//! together; the `flagreel` binary is a thin CLI over it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Banner composition.
pub mod compose;
/// Run configuration.
pub mod config;
/// Frame sinks.
pub mod encode;
/// Glyph planning and rendering.
pub mod glyph;
/// Locale codes and providers.
pub mod locale;
/// End-to-end flows.
pub mod pipeline;
/// Drawing surfaces.
pub mod render;
/// SVG output.
pub mod vector;

pub use crate::foundation::core::{Affine, BezPath, Canvas, FrameIndex, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{FlagreelError, FlagreelResult};

pub use crate::compose::compositor::{Entry, FrameSequence, ScrollCompositor, build_frames};
pub use crate::compose::layout::{ScrollConfig, ScrollLayout, frame_count};
pub use crate::compose::select::{
    Exclusion, ExclusionReason, FilterRule, SelectOpts, Selection, select_codes, select_entries,
};
pub use crate::config::Config;
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::glyph::batch::{BatchReport, GlyphBatchOpts, RenderedGlyph, generate_batch};
pub use crate::glyph::color::{ColorSpec, Parity, char_to_color};
pub use crate::glyph::plan::{
    GlyphGenerator, GlyphPlan, LayoutMode, Segment, generate_glyph_plan,
};
pub use crate::glyph::render::GlyphImage;
pub use crate::locale::code::{LocaleCode, normalize_code};
pub use crate::locale::provider::{BundledLocales, ListFileLocales, LocaleProvider};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::surface::Surface;
pub use crate::render::text::LabelFont;
