use std::f64::consts::TAU;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::glyph::color::{ColorFn, ColorSpec, Parity, char_to_color};
use crate::locale::code::LocaleCode;

/// Radius of the decorative center dot; also the hole reserved for it in radial layouts.
pub const CENTER_DOT_RADIUS: f64 = 10.0;
/// Color of the decorative center dot.
pub const CENTER_DOT_COLOR: Rgba8 = Rgba8::BLACK;
/// Width of the outline stroked around every segment boundary.
pub const OUTLINE_WIDTH: f64 = 2.0;
/// Color of the segment outlines.
pub const OUTLINE_COLOR: Rgba8 = Rgba8::BLACK;

/// How a glyph partitions its area among the code characters.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Concentric circular rings, outermost first.
    #[default]
    Rings,
    /// Concentric hexagonal bands, outermost first.
    Hexagons,
    /// Equal pie wedges, clockwise from 12 o'clock.
    Sectors,
}

impl LayoutMode {
    /// Whether segments carry radial extents.
    pub fn is_radial(self) -> bool {
        matches!(self, Self::Rings | Self::Hexagons)
    }
}

/// The part of the glyph one segment covers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum Extent {
    /// Annulus (or disc when `inner == 0`) between two radii.
    Radial {
        /// Outer radius.
        outer: f64,
        /// Inner radius; `0` for a filled disc.
        inner: f64,
    },
    /// Wedge from the center, in radians, `0` pointing right and angles growing clockwise.
    Angular {
        /// Start angle.
        start: f64,
        /// Sweep, positive.
        sweep: f64,
    },
}

/// One colored partition of a glyph.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    /// The character this segment was derived from (normalized).
    pub ch: char,
    /// Covered area.
    pub extent: Extent,
    /// Fill color.
    pub color: ColorSpec,
}

impl Segment {
    /// Outer and inner radius of a radial segment.
    pub fn radii(&self) -> Option<(f64, f64)> {
        match self.extent {
            Extent::Radial { outer, inner } => Some((outer, inner)),
            Extent::Angular { .. } => None,
        }
    }
}

/// The filled dot layered above every segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CenterDot {
    /// Dot radius.
    pub radius: f64,
    /// Dot color.
    pub color: Rgba8,
}

impl Default for CenterDot {
    fn default() -> Self {
        Self {
            radius: CENTER_DOT_RADIUS,
            color: CENTER_DOT_COLOR,
        }
    }
}

/// Full geometric and color description of one glyph.
///
/// Plans are pure data: they are fully determined by the normalized code, the layout mode and the
/// maximum extent, and no drawing surface is touched to build them.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GlyphPlan {
    /// Normalized code the plan was derived from.
    pub code: String,
    /// Partitioning strategy.
    pub mode: LayoutMode,
    /// Outer radius of the glyph in plan units.
    pub max_extent: f64,
    /// Segments in character order, outermost / first angle first.
    pub segments: Vec<Segment>,
    /// Decorative center dot.
    pub center_dot: CenterDot,
    /// Outline stroke width in plan units.
    pub outline_width: f64,
    /// Outline stroke color.
    pub outline_color: Rgba8,
}

impl GlyphPlan {
    /// Width of each radial band, `None` for angular layouts.
    pub fn band_width(&self) -> Option<f64> {
        if !self.mode.is_radial() || self.segments.is_empty() {
            return None;
        }
        Some((self.max_extent - self.center_dot.radius) / self.segments.len() as f64)
    }
}

/// Builds [`GlyphPlan`]s with an injected character-to-color function.
#[derive(Clone, Copy, Debug)]
pub struct GlyphGenerator {
    color_fn: ColorFn,
    center_dot: CenterDot,
}

impl Default for GlyphGenerator {
    fn default() -> Self {
        Self::new(char_to_color)
    }
}

impl GlyphGenerator {
    /// Create a generator deriving segment colors with `color_fn`.
    pub fn new(color_fn: ColorFn) -> Self {
        Self {
            color_fn,
            center_dot: CenterDot::default(),
        }
    }

    /// The color derivation in use.
    pub fn color_fn(&self) -> ColorFn {
        self.color_fn
    }

    /// Radius of the center dot, which is also the smallest usable `max_extent`.
    pub fn center_dot_radius(&self) -> f64 {
        self.center_dot.radius
    }

    /// Derive the plan for `code`.
    pub fn plan(&self, code: &str, mode: LayoutMode, max_extent: f64) -> FlagreelResult<GlyphPlan> {
        let code = LocaleCode::parse(code)?;
        self.plan_for(&code, mode, max_extent)
    }

    /// Derive the plan for an already parsed code.
    pub fn plan_for(
        &self,
        code: &LocaleCode,
        mode: LayoutMode,
        max_extent: f64,
    ) -> FlagreelResult<GlyphPlan> {
        if !max_extent.is_finite() || max_extent <= self.center_dot.radius {
            return Err(FlagreelError::validation(format!(
                "max_extent must be finite and larger than the center hole ({}), got {max_extent}",
                self.center_dot.radius
            )));
        }

        let chars: Vec<char> = code.normalized().chars().collect();
        let n = chars.len();
        let colors = chars
            .iter()
            .enumerate()
            .map(|(i, &ch)| (self.color_fn)(ch, Parity::of(i)));

        let segments = match mode {
            LayoutMode::Rings | LayoutMode::Hexagons => {
                let w = (max_extent - self.center_dot.radius) / n as f64;
                chars
                    .iter()
                    .zip(colors)
                    .enumerate()
                    .map(|(i, (&ch, color))| {
                        let outer = max_extent - i as f64 * w;
                        // The next band's outer edge, computed the same way so the two match exactly.
                        let inner = if i + 1 == n {
                            0.0
                        } else {
                            (max_extent - (i + 1) as f64 * w).max(0.0)
                        };
                        Segment {
                            ch,
                            extent: Extent::Radial { outer, inner },
                            color,
                        }
                    })
                    .collect()
            }
            LayoutMode::Sectors => {
                let sweep = TAU / n as f64;
                let top = -TAU / 4.0;
                chars
                    .iter()
                    .zip(colors)
                    .enumerate()
                    .map(|(i, (&ch, color))| Segment {
                        ch,
                        extent: Extent::Angular {
                            start: top + i as f64 * sweep,
                            sweep,
                        },
                        color,
                    })
                    .collect()
            }
        };

        Ok(GlyphPlan {
            code: code.normalized().to_owned(),
            mode,
            max_extent,
            segments,
            center_dot: self.center_dot,
            outline_width: OUTLINE_WIDTH,
            outline_color: OUTLINE_COLOR,
        })
    }
}

/// Derive a glyph plan with the default color derivation.
pub fn generate_glyph_plan(
    code: &str,
    mode: LayoutMode,
    max_extent: f64,
) -> FlagreelResult<GlyphPlan> {
    GlyphGenerator::default().plan(code, mode, max_extent)
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/plan.rs"]
mod tests;
