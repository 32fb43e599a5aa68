use super::*;

fn cfg(columns: u32, visible_rows: u32) -> ScrollConfig {
    ScrollConfig {
        glyph_width: 8,
        glyph_height: 8,
        label_width: 0,
        columns,
        visible_rows,
        scroll_step: 4,
        ..ScrollConfig::default()
    }
}

#[test]
fn frame_count_formula() {
    assert_eq!(frame_count(500, 200, 4), 76);
    assert_eq!(frame_count(16, 8, 4), 3);
    assert_eq!(frame_count(17, 8, 4), 4);
    assert_eq!(frame_count(8, 8, 4), 1);
}

#[test]
fn defaults_match_the_classic_banner() {
    let c = ScrollConfig::default();
    assert_eq!((c.glyph_width, c.glyph_height, c.label_width), (128, 128, 200));
    assert_eq!((c.columns, c.scroll_step), (3, 4));
    assert_eq!(c.validate().unwrap(), Canvas::new(984, 384).unwrap());
}

#[test]
fn validation_rejects_degenerate_configs() {
    for bad in [
        ScrollConfig { columns: 0, ..cfg(1, 1) },
        ScrollConfig { visible_rows: 0, ..cfg(1, 1) },
        ScrollConfig { scroll_step: 0, ..cfg(1, 1) },
        ScrollConfig { glyph_height: 0, ..cfg(1, 1) },
        ScrollConfig { label_padding: f64::NAN, ..cfg(1, 1) },
        ScrollConfig { columns: 70_000, ..cfg(1, 1) },
    ] {
        assert!(matches!(bad.validate(), Err(FlagreelError::Validation(_))), "{bad:?}");
    }
}

#[test]
fn last_row_is_padded_and_head_is_appended() {
    let layout = ScrollLayout::new(3, &cfg(2, 1)).unwrap();
    assert_eq!(
        layout.cells(),
        [Some(0), Some(1), Some(2), None, Some(0), Some(1)]
    );
    assert_eq!(layout.content_rows(), 2);
    assert_eq!(layout.total_rows(), 3);
    assert_eq!(layout.content_height(), 24);
    assert_eq!(layout.frame_count(), 5);
}

#[test]
fn two_entries_two_columns_need_no_padding() {
    let layout = ScrollLayout::new(2, &cfg(2, 1)).unwrap();
    assert_eq!(layout.cells(), [Some(0), Some(1), Some(0), Some(1)]);
}

#[test]
fn short_content_cycles_into_the_duplicate() {
    let layout = ScrollLayout::new(2, &cfg(2, 3)).unwrap();
    assert_eq!(layout.cells().len(), 2 + 6);
    assert_eq!(&layout.cells()[2..], [Some(0), Some(1)].repeat(3));
    // Last frame scrolled exactly one content height.
    let last = FrameIndex(layout.frame_count() - 1);
    assert_eq!(layout.offset(last), 8);
}

#[test]
fn last_offset_reaches_the_duplicate_head() {
    for (n, columns, rows) in [(1, 1, 1), (5, 2, 2), (7, 3, 1), (10, 3, 3)] {
        let layout = ScrollLayout::new(n, &cfg(columns, rows)).unwrap();
        let last = layout.offset(FrameIndex(layout.frame_count() - 1));
        let content = layout.content_rows() as u64 * 8;
        assert!(last >= content, "n={n}: {last} < {content}");
        assert!(last < content + 4, "n={n}: overshoot {last}");
    }
}

#[test]
fn visible_cells_are_clipped_to_the_viewport() {
    let layout = ScrollLayout::new(3, &cfg(2, 1)).unwrap();
    let at0: Vec<PlacedCell> = layout.visible_cells(0).collect();
    assert_eq!(
        at0,
        [
            PlacedCell { entry: Some(0), x: 0.0, y: 0.0 },
            PlacedCell { entry: Some(1), x: 8.0, y: 0.0 },
        ]
    );

    let at4: Vec<(Option<usize>, f64)> = layout.visible_cells(4).map(|c| (c.entry, c.y)).collect();
    assert_eq!(
        at4,
        [(Some(0), -4.0), (Some(1), -4.0), (Some(2), 4.0), (None, 4.0)]
    );
}

#[test]
fn cell_pitch_includes_the_label() {
    let config = ScrollConfig {
        label_width: 20,
        ..cfg(2, 1)
    };
    let layout = ScrollLayout::new(2, &config).unwrap();
    let xs: Vec<f64> = layout.visible_cells(0).map(|c| c.x).collect();
    assert_eq!(xs, [0.0, 28.0]);
}

#[test]
fn no_entries_is_empty_input() {
    assert!(matches!(
        ScrollLayout::new(0, &cfg(2, 1)),
        Err(FlagreelError::EmptyInput(_))
    ));
}

#[test]
fn overshooting_last_offset_wraps_onto_content() {
    let config = ScrollConfig {
        scroll_step: 3,
        ..cfg(1, 1)
    };
    let layout = ScrollLayout::new(1, &config).unwrap();
    assert_eq!(layout.frame_count(), 4);
    let last = layout.offset(FrameIndex(3));
    assert_eq!(last, 9);

    let cells: Vec<(Option<usize>, f64)> = layout.visible_cells(last).map(|c| (c.entry, c.y)).collect();
    assert_eq!(cells, [(Some(0), -1.0), (Some(0), 7.0)]);
}

#[test]
fn viewport_is_always_covered_for_odd_steps() {
    for step in [3, 5, 7] {
        let config = ScrollConfig {
            scroll_step: step,
            ..cfg(2, 2)
        };
        let layout = ScrollLayout::new(5, &config).unwrap();
        for f in 0..layout.frame_count() {
            let offset = layout.offset(FrameIndex(f));
            let bottom = layout
                .visible_cells(offset)
                .map(|c| c.y + 8.0)
                .fold(f64::MIN, f64::max);
            assert!(bottom >= 16.0, "step={step} frame={f}: bottom {bottom}");
        }
    }
}
