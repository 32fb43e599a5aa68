use crate::foundation::core::Rgba8;

/// Number of evenly spaced hues; one per Latin letter.
pub const HUE_STEPS: u32 = 26;

/// Saturation/lightness band used at even positions.
pub const EVEN_BAND: (f64, f64) = (70.0, 50.0);
/// Saturation/lightness band used at odd positions.
pub const ODD_BAND: (f64, f64) = (80.0, 60.0);

/// A color in HSL terms.
///
/// `hue` is in degrees `[0, 360)`, `saturation` and `lightness` in percent `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorSpec {
    /// Hue in degrees.
    pub hue: f64,
    /// Saturation in percent.
    pub saturation: f64,
    /// Lightness in percent.
    pub lightness: f64,
}

impl ColorSpec {
    /// Build a color, wrapping hue into `[0, 360)` and clamping the percentages.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 100.0),
            lightness: lightness.clamp(0.0, 100.0),
        }
    }

    /// Opaque sRGB color using the standard HSL conversion.
    pub fn to_rgba8(self) -> Rgba8 {
        let h = self.hue.rem_euclid(360.0) / 360.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        if s == 0.0 {
            let v = to_u8(l);
            return Rgba8::opaque(v, v, v);
        }

        fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                return p + (q - p) * 6.0 * t;
            }
            if t < 1.0 / 2.0 {
                return q;
            }
            if t < 2.0 / 3.0 {
                return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
            }
            p
        }

        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;

        Rgba8::opaque(
            to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            to_u8(hue_to_rgb(p, q, h)),
            to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }

    /// CSS `hsl()` notation.
    pub fn to_css(self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            trim_float(self.hue),
            trim_float(self.saturation),
            trim_float(self.lightness)
        )
    }
}

fn trim_float(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_owned()
}

/// Whether a segment sits at an even or odd position in its glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parity {
    /// Positions 0, 2, 4, ...
    Even,
    /// Positions 1, 3, 5, ...
    Odd,
}

impl Parity {
    /// Parity of a 0-based position.
    pub fn of(index: usize) -> Self {
        if index.is_multiple_of(2) {
            Self::Even
        } else {
            Self::Odd
        }
    }
}

/// Signature of a character-to-color derivation.
pub type ColorFn = fn(char, Parity) -> ColorSpec;

/// Derive the color of one code character.
///
/// The uppercased character's scalar value modulo 26 picks one of 26 evenly spaced hues, so the
/// Latin letters cover the whole wheel exactly once. Parity selects the saturation/lightness band
/// so neighbouring segments stay distinguishable even when their hues are close.
pub fn char_to_color(ch: char, parity: Parity) -> ColorSpec {
    let upper = ch.to_uppercase().next().unwrap_or(ch);
    let step = u32::from(upper) % HUE_STEPS;
    let hue = f64::from(step) * (360.0 / f64::from(HUE_STEPS));
    let (saturation, lightness) = match parity {
        Parity::Even => EVEN_BAND,
        Parity::Odd => ODD_BAND,
    };
    ColorSpec::new(hue, saturation, lightness)
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/color.rs"]
mod tests;
