use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::locale::bundled::BUNDLED_LOCALES;
use crate::locale::code::SEPARATORS;

/// Source of locale code strings, in the order they should be rendered.
pub trait LocaleProvider {
    /// Return the ordered list of codes.
    fn codes(&self) -> FlagreelResult<Vec<String>>;
}

/// The table of language + region tags compiled into the crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct BundledLocales;

impl LocaleProvider for BundledLocales {
    fn codes(&self) -> FlagreelResult<Vec<String>> {
        Ok(BUNDLED_LOCALES
            .iter()
            .filter(|c| c.contains(SEPARATORS))
            .map(|c| (*c).to_owned())
            .collect())
    }
}

/// Codes read from a file on disk.
///
/// Two layouts are accepted: a JSON array of strings, or plain text with one code per line
/// (blank lines and `#` comments are skipped).
#[derive(Clone, Debug)]
pub struct ListFileLocales {
    path: PathBuf,
}

impl ListFileLocales {
    /// Read codes from `path` when [`LocaleProvider::codes`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The list file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocaleProvider for ListFileLocales {
    fn codes(&self) -> FlagreelResult<Vec<String>> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read locale list '{}'", self.path.display()))?;
        parse_locale_list(&text)
    }
}

/// Parse the contents of a locale list file.
pub fn parse_locale_list(text: &str) -> FlagreelResult<Vec<String>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        let codes: Vec<String> = serde_json::from_str(trimmed).map_err(|e| {
            FlagreelError::validation(format!("locale list is not a JSON string array: {e}"))
        })?;
        return Ok(codes
            .into_iter()
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
            .collect());
    }

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_owned)
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/locale/provider.rs"]
mod tests;
