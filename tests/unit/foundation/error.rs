use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PikuraError::decode(2, anyhow::anyhow!("bad header"))
            .to_string()
            .contains("decode error: frame 2")
    );
    assert!(
        PikuraError::sticker_json("x")
            .to_string()
            .contains("sticker json error:")
    );
    assert!(
        PikuraError::glyph_render("s1", "no font")
            .to_string()
            .contains("glyph render error: sticker s1")
    );
    assert!(PikuraError::encode("x").to_string().contains("encode error:"));
    assert!(
        PikuraError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn kinds_are_stable_snake_case() {
    assert_eq!(PikuraError::NoFrames.kind().as_str(), "no_frames");
    assert_eq!(
        PikuraError::TooManyFrames { count: 5, max: 4 }.kind(),
        ErrorKind::TooManyFrames
    );
    assert_eq!(
        serde_json::to_string(&ErrorKind::StickerJson).unwrap(),
        "\"sticker_json\""
    );
    assert_eq!(ErrorKind::GlyphRender.to_string(), "glyph_render");
}

#[test]
fn only_glyph_failures_are_recoverable() {
    assert!(!PikuraError::glyph_render("a", "b").is_fatal());
    assert!(PikuraError::NoFrames.is_fatal());
    assert!(PikuraError::Cancelled.is_fatal());
    assert!(PikuraError::encode("x").is_fatal());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PikuraError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.kind(), ErrorKind::Other);
}
