//! Run configuration, loadable from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::compose::layout::ScrollConfig;
use crate::compose::select::SelectOpts;
use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::glyph::batch::GlyphBatchOpts;

/// Everything a `flags`, `banner` or `run` invocation needs.
///
/// Every field has a default, so a JSON file only lists what it changes:
///
/// ```json
/// { "glyphs": { "mode": "sectors" }, "banner": { "columns": 4 }, "select": { "limit": 10 } }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Glyph generation.
    pub glyphs: GlyphBatchOpts,
    /// Banner geometry and styling.
    pub banner: ScrollConfig,
    /// Which codes make it into the banner.
    pub select: SelectOpts,
    /// Delay between banner frames in milliseconds.
    pub frame_delay_ms: u32,
    /// Draw code labels next to banner glyphs.
    pub labels: bool,
    /// Label font file; system fonts are searched when unset.
    pub font: Option<PathBuf>,
    /// Locale list file; the bundled table is used when unset.
    pub locales: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            glyphs: GlyphBatchOpts::default(),
            banner: ScrollConfig::default(),
            select: SelectOpts::default(),
            frame_delay_ms: 50,
            labels: true,
            font: None,
            locales: None,
        }
    }
}

impl Config {
    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FlagreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FlagreelError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            FlagreelError::validation(format!("parse config JSON '{}': {e}", path.display()))
        })
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(s: &str) -> FlagreelResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| FlagreelError::validation(format!("parse config JSON: {e}")))
    }

    /// Check every section.
    pub fn validate(&self) -> FlagreelResult<()> {
        if self.glyphs.size == 0 {
            return Err(FlagreelError::validation("glyph size must be non-zero"));
        }
        if self.frame_delay_ms == 0 {
            return Err(FlagreelError::validation("frame_delay_ms must be non-zero"));
        }
        self.banner.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
