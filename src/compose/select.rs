use std::collections::HashSet;
use std::fmt;

use crate::foundation::error::{FlagreelError, FlagreelResult};
use crate::locale::code::split_code;

/// Which codes are eligible for the banner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterRule {
    /// Keep codes whose language and region parts are equal ignoring case (`de-DE`, `fr_fr`).
    #[default]
    MatchingPrefixSuffix,
    /// Keep every code.
    All,
}

impl FilterRule {
    /// Whether `code` passes the rule.
    pub fn accepts(self, code: &str) -> bool {
        match self {
            Self::All => true,
            Self::MatchingPrefixSuffix => match split_code(code) {
                (prefix, Some(suffix)) => {
                    !prefix.is_empty() && prefix.to_lowercase() == suffix.to_lowercase()
                }
                (_, None) => false,
            },
        }
    }
}

/// Options for [`select_entries`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SelectOpts {
    /// Eligibility rule.
    pub rule: FilterRule,
    /// Keep at most this many accepted entries.
    pub limit: Option<usize>,
}

/// Why an entry was left out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Rejected by [`FilterRule::MatchingPrefixSuffix`].
    PrefixSuffixMismatch,
    /// The exact same code was already selected.
    Duplicate,
    /// Accepted, but past [`SelectOpts::limit`].
    OverLimit,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PrefixSuffixMismatch => "prefix and suffix do not match (case-insensitive)",
            Self::Duplicate => "duplicate code",
            Self::OverLimit => "over the selection limit",
        })
    }
}

/// An excluded code and the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exclusion {
    /// Code as provided.
    pub code: String,
    /// Why it was excluded.
    pub reason: ExclusionReason,
}

/// Result of [`select_entries`].
#[derive(Clone, Debug)]
pub struct Selection<T> {
    /// Kept entries, in first-seen order.
    pub selected: Vec<T>,
    /// Every excluded code, rule rejections first, then duplicates, then limit cut-offs.
    pub excluded: Vec<Exclusion>,
}

/// Filter, de-duplicate and optionally truncate entries keyed by their code.
///
/// De-duplication compares exact codes, so `en-US` and `en-us` are distinct entries. Fails with
/// [`FlagreelError::EmptyInput`] when nothing is kept.
pub fn select_entries<T>(
    entries: impl IntoIterator<Item = T>,
    code_of: impl Fn(&T) -> &str,
    opts: SelectOpts,
) -> FlagreelResult<Selection<T>> {
    let mut accepted = Vec::new();
    let mut excluded = Vec::new();
    for entry in entries {
        if opts.rule.accepts(code_of(&entry)) {
            accepted.push(entry);
        } else {
            excluded.push(Exclusion {
                code: code_of(&entry).to_owned(),
                reason: ExclusionReason::PrefixSuffixMismatch,
            });
        }
    }

    let mut seen = HashSet::new();
    let mut selected = Vec::with_capacity(accepted.len());
    for entry in accepted {
        if seen.insert(code_of(&entry).to_owned()) {
            selected.push(entry);
        } else {
            excluded.push(Exclusion {
                code: code_of(&entry).to_owned(),
                reason: ExclusionReason::Duplicate,
            });
        }
    }

    if let Some(limit) = opts.limit
        && selected.len() > limit
    {
        for entry in selected.drain(limit..) {
            excluded.push(Exclusion {
                code: code_of(&entry).to_owned(),
                reason: ExclusionReason::OverLimit,
            });
        }
    }

    for e in &excluded {
        tracing::debug!(code = %e.code, reason = %e.reason, "entry excluded");
    }
    if selected.is_empty() {
        return Err(FlagreelError::empty_input(format!(
            "no entries left after selection ({} excluded)",
            excluded.len()
        )));
    }
    tracing::info!(
        selected = selected.len(),
        excluded = excluded.len(),
        "entries selected"
    );
    Ok(Selection { selected, excluded })
}

/// [`select_entries`] over plain code strings.
pub fn select_codes(codes: &[String], opts: SelectOpts) -> FlagreelResult<Selection<String>> {
    select_entries(codes.iter().cloned(), |c| c.as_str(), opts)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/select.rs"]
mod tests;
