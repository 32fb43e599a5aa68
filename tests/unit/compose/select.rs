use super::*;

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

fn reasons(sel: &Selection<String>) -> Vec<(&str, ExclusionReason)> {
    sel.excluded
        .iter()
        .map(|e| (e.code.as_str(), e.reason))
        .collect()
}

#[test]
fn rule_compares_prefix_and_suffix_ignoring_case() {
    let rule = FilterRule::MatchingPrefixSuffix;
    assert!(rule.accepts("de-DE"));
    assert!(rule.accepts("fr_fr"));
    assert!(rule.accepts("IT-it"));
    assert!(!rule.accepts("en-US"));
    assert!(!rule.accepts("de"));
    assert!(!rule.accepts("-"));
    assert!(!rule.accepts("de-DE-x"));
    assert!(FilterRule::All.accepts("anything"));
}

#[test]
fn mixed_input_keeps_only_matching_codes() {
    let sel = select_codes(
        &codes(&["en-US", "en-us", "fr-FR", "xx-yy"]),
        SelectOpts::default(),
    )
    .unwrap();
    assert_eq!(sel.selected, ["fr-FR"]);
    assert_eq!(
        reasons(&sel),
        [
            ("en-US", ExclusionReason::PrefixSuffixMismatch),
            ("en-us", ExclusionReason::PrefixSuffixMismatch),
            ("xx-yy", ExclusionReason::PrefixSuffixMismatch),
        ]
    );
}

#[test]
fn duplicates_are_exact_and_first_seen_wins() {
    let sel = select_codes(
        &codes(&["de-DE", "fr-FR", "de-DE", "de-de"]),
        SelectOpts::default(),
    )
    .unwrap();
    assert_eq!(sel.selected, ["de-DE", "fr-FR", "de-de"]);
    assert_eq!(reasons(&sel), [("de-DE", ExclusionReason::Duplicate)]);
}

#[test]
fn all_rule_only_deduplicates() {
    let opts = SelectOpts {
        rule: FilterRule::All,
        limit: None,
    };
    let sel = select_codes(&codes(&["en-US", "en-us", "en-US", "xx-yy"]), opts).unwrap();
    assert_eq!(sel.selected, ["en-US", "en-us", "xx-yy"]);
    assert_eq!(reasons(&sel), [("en-US", ExclusionReason::Duplicate)]);
}

#[test]
fn limit_keeps_the_first_entries_and_records_the_rest() {
    let opts = SelectOpts {
        rule: FilterRule::MatchingPrefixSuffix,
        limit: Some(2),
    };
    let sel = select_codes(&codes(&["de-DE", "en-US", "fr-FR", "it-IT", "es-ES"]), opts).unwrap();
    assert_eq!(sel.selected, ["de-DE", "fr-FR"]);
    assert_eq!(
        reasons(&sel),
        [
            ("en-US", ExclusionReason::PrefixSuffixMismatch),
            ("it-IT", ExclusionReason::OverLimit),
            ("es-ES", ExclusionReason::OverLimit),
        ]
    );
}

#[test]
fn nothing_left_is_empty_input() {
    let err = select_codes(&codes(&["ab-cd"]), SelectOpts::default()).unwrap_err();
    assert!(matches!(err, FlagreelError::EmptyInput(_)));

    let err = select_codes(&[], SelectOpts::default()).unwrap_err();
    assert!(matches!(err, FlagreelError::EmptyInput(_)));

    let zero = SelectOpts {
        limit: Some(0),
        ..SelectOpts::default()
    };
    assert!(select_codes(&codes(&["de-DE"]), zero).is_err());
}

#[test]
fn works_over_arbitrary_entries() {
    let entries = vec![("de-DE", 1), ("xx-yy", 2), ("nl-NL", 3)];
    let sel = select_entries(entries, |e| e.0, SelectOpts::default()).unwrap();
    let ids: Vec<i32> = sel.selected.iter().map(|e| e.1).collect();
    assert_eq!(ids, [1, 3]);
}

#[test]
fn reasons_read_as_sentences() {
    assert_eq!(
        ExclusionReason::PrefixSuffixMismatch.to_string(),
        "prefix and suffix do not match (case-insensitive)"
    );
    assert_eq!(ExclusionReason::Duplicate.to_string(), "duplicate code");
}

#[test]
fn trailing_subtags_belong_to_the_suffix() {
    assert!(matches!(
        select_codes(&codes(&["de-DE-1996"]), SelectOpts::default()),
        Err(FlagreelError::EmptyInput(_))
    ));
}

#[test]
fn case_folding_covers_non_ascii_letters() {
    let rule = FilterRule::MatchingPrefixSuffix;
    assert!(rule.accepts("är-ÄR"));
    assert!(rule.accepts("ΣΑ-σα"));
    assert!(!rule.accepts("är-AR"));
}
