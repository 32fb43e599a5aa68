use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FlagreelError::invalid_code("x")
            .to_string()
            .contains("invalid locale code:")
    );
    assert!(
        FlagreelError::empty_input("x")
            .to_string()
            .contains("empty input:")
    );
    assert!(
        FlagreelError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        FlagreelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FlagreelError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FlagreelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_context_converts_with_question_mark() {
    fn read_missing() -> FlagreelResult<Vec<u8>> {
        use anyhow::Context as _;
        let bytes = std::fs::read("target/definitely/missing/file.bin")
            .context("read missing fixture")?;
        Ok(bytes)
    }

    let err = read_missing().unwrap_err();
    assert!(matches!(err, FlagreelError::Other(_)));
    assert!(err.to_string().contains("read missing fixture"));
}
