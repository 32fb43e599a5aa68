//! Deterministic locale-code glyphs.
//!
//! A code is normalized, turned into a pure [`GlyphPlan`](plan::GlyphPlan), then rendered to a
//! raster image or an SVG document from the same shapes.

/// Parallel, order-preserving glyph generation for many codes.
pub mod batch;
/// Character to color derivation.
pub mod color;
/// Glyph geometry and colors as pure data.
pub mod plan;
/// Raster and vector rendering of plans.
pub mod render;
