use super::*;

fn radii(plan: &GlyphPlan) -> Vec<(f64, f64)> {
    plan.segments.iter().filter_map(Segment::radii).collect()
}

#[test]
fn case_and_separator_variants_produce_equal_plans() {
    for mode in [LayoutMode::Rings, LayoutMode::Hexagons, LayoutMode::Sectors] {
        let a = generate_glyph_plan("de-DE", mode, 128.0).unwrap();
        let b = generate_glyph_plan("de_de", mode, 128.0).unwrap();
        let c = generate_glyph_plan("DEDE", mode, 128.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.code, "DEDE");
    }
}

#[test]
fn one_segment_per_normalized_character() {
    for (code, n) in [("fr", 2), ("en-US", 4), ("fil-PH", 5), ("x", 1)] {
        let plan = generate_glyph_plan(code, LayoutMode::Rings, 128.0).unwrap();
        assert_eq!(plan.segments.len(), n, "{code}");
        let chars: String = plan.segments.iter().map(|s| s.ch).collect();
        assert_eq!(chars, normalize(code));
    }
}

fn normalize(code: &str) -> String {
    crate::locale::code::normalize_code(code)
}

#[test]
fn ring_radii_are_monotonic_and_contiguous() {
    for code in ["de-DE", "fil-PH", "zh-Hant-TW", "ab"] {
        let plan = generate_glyph_plan(code, LayoutMode::Rings, 128.0).unwrap();
        let r = radii(&plan);
        for (i, &(outer, inner)) in r.iter().enumerate() {
            assert!(outer > inner, "{code} segment {i}");
            assert!(inner >= 0.0);
            if i + 1 < r.len() {
                assert_eq!(inner, r[i + 1].0, "{code} segment {i}");
            }
        }
        assert_eq!(r[0].0, 128.0);
        assert_eq!(r.last().unwrap().1, 0.0);
    }
}

#[test]
fn ring_band_width_reserves_center_hole() {
    let plan = generate_glyph_plan("de-DE", LayoutMode::Rings, 128.0).unwrap();
    let w = plan.band_width().unwrap();
    assert!((w - (128.0 - CENTER_DOT_RADIUS) / 4.0).abs() < 1e-12);
    let r = radii(&plan);
    assert!((r[1].0 - (128.0 - w)).abs() < 1e-12);
}

#[test]
fn single_character_is_a_filled_disc() {
    let plan = generate_glyph_plan("q", LayoutMode::Rings, 64.0).unwrap();
    assert_eq!(radii(&plan), vec![(64.0, 0.0)]);
}

#[test]
fn sectors_cover_full_turn_in_order() {
    let plan = generate_glyph_plan("en-US", LayoutMode::Sectors, 128.0).unwrap();
    assert_eq!(plan.band_width(), None);
    let mut expected_start = -TAU / 4.0;
    let mut total = 0.0;
    for seg in &plan.segments {
        let Extent::Angular { start, sweep } = seg.extent else {
            panic!("expected angular extent");
        };
        assert!((start - expected_start).abs() < 1e-12);
        expected_start += sweep;
        total += sweep;
    }
    assert!((total - TAU).abs() < 1e-9);
}

#[test]
fn single_character_sector_is_one_full_revolution() {
    let plan = generate_glyph_plan("z", LayoutMode::Sectors, 128.0).unwrap();
    assert_eq!(plan.segments.len(), 1);
    let Extent::Angular { sweep, .. } = plan.segments[0].extent else {
        panic!("expected angular extent");
    };
    assert!((sweep - TAU).abs() < 1e-12);
}

#[test]
fn same_character_same_parity_same_color() {
    // Positions 0 and 2 of "AXAY" share both character and parity.
    let plan = generate_glyph_plan("AX-AY", LayoutMode::Rings, 128.0).unwrap();
    assert_eq!(plan.segments[0].color, plan.segments[2].color);
    assert_ne!(plan.segments[0].color, plan.segments[1].color);
    assert!(
        plan.segments
            .iter()
            .all(|s| (0.0..360.0).contains(&s.color.hue))
    );
}

#[test]
fn empty_code_is_invalid() {
    let err = generate_glyph_plan("-", LayoutMode::Rings, 128.0).unwrap_err();
    assert!(matches!(err, FlagreelError::InvalidCode(_)));
}

#[test]
fn max_extent_must_exceed_center_hole() {
    for bad in [0.0, CENTER_DOT_RADIUS, f64::NAN, f64::INFINITY] {
        let err = generate_glyph_plan("de", LayoutMode::Rings, bad).unwrap_err();
        assert!(matches!(err, FlagreelError::Validation(_)));
    }
}

#[test]
fn injected_color_function_is_used() {
    fn grey(_: char, _: Parity) -> ColorSpec {
        ColorSpec::new(0.0, 0.0, 42.0)
    }
    let plan = GlyphGenerator::new(grey)
        .plan("ja-JP", LayoutMode::Hexagons, 100.0)
        .unwrap();
    assert!(
        plan.segments
            .iter()
            .all(|s| s.color == ColorSpec::new(0.0, 0.0, 42.0))
    );
}

#[test]
fn center_dot_is_identical_for_every_code() {
    let a = generate_glyph_plan("en-US", LayoutMode::Rings, 128.0).unwrap();
    let b = generate_glyph_plan("ko", LayoutMode::Sectors, 128.0).unwrap();
    assert_eq!(a.center_dot, b.center_dot);
    assert_eq!(a.center_dot.radius, CENTER_DOT_RADIUS);
}
