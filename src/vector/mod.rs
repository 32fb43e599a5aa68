//! Vector (SVG) output.

/// SVG document builder and rasterization.
pub mod svg;
