use super::*;

#[test]
fn empty_font_bytes_are_rejected() {
    assert!(matches!(
        LabelFont::from_bytes(Vec::new(), 0),
        Err(FlagreelError::Validation(_))
    ));
}

#[test]
fn missing_font_file_is_an_error() {
    let err = LabelFont::from_path(Path::new("target/does-not-exist.ttf")).unwrap_err();
    assert!(err.to_string().contains("does-not-exist.ttf"), "{err}");
}

#[test]
fn system_font_shapes_a_line() {
    let Some(font) = LabelFont::system_default() else {
        eprintln!("no system font, skipping");
        return;
    };
    assert!(!font.bytes().is_empty());
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    let layout = engine
        .layout_line("de-DE", 20.0, Rgba8::BLACK.into())
        .unwrap();
    assert_eq!(layout.lines().count(), 1);
    assert!(layout.width() > 0.0);
    assert!(layout.height() > 0.0);
    assert!(matches!(
        engine.layout_line("x", 0.0, Rgba8::BLACK.into()),
        Err(FlagreelError::Validation(_))
    ));
}
