use std::fmt;

use crate::foundation::error::{FlagreelError, FlagreelResult};

/// Characters that separate the language part of a code from its region part.
pub const SEPARATORS: [char; 2] = ['-', '_'];

/// Strip [`SEPARATORS`] and uppercase. Every other character, whitespace included, is kept.
///
/// `de-DE`, `de_de` and `DEDE` all normalize to `DEDE`.
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !SEPARATORS.contains(c))
        .flat_map(char::to_uppercase)
        .collect()
}

/// A locale/language code such as `de-DE` or `fr`.
///
/// The original spelling is kept for labels and file names; glyph derivation only ever sees the
/// [normalized](LocaleCode::normalized) form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LocaleCode {
    raw: String,
    normalized: String,
}

impl LocaleCode {
    /// Parse a code, rejecting strings that normalize to nothing.
    pub fn parse(code: &str) -> FlagreelResult<Self> {
        let raw = code.trim();
        let normalized = normalize_code(raw);
        if normalized.is_empty() {
            return Err(FlagreelError::invalid_code(format!(
                "'{code}' is empty after stripping separators"
            )));
        }
        Ok(Self {
            raw: raw.to_owned(),
            normalized,
        })
    }

    /// The code as written (trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Separator-free uppercase form.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Split on the first separator into `(prefix, suffix)`.
    pub fn split(&self) -> (&str, Option<&str>) {
        split_code(&self.raw)
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a raw code on its first separator.
pub fn split_code(code: &str) -> (&str, Option<&str>) {
    match code.find(SEPARATORS) {
        Some(i) => (&code[..i], Some(&code[i + 1..])),
        None => (code, None),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/locale/code.rs"]
mod tests;
