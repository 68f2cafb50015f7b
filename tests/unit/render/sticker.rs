use super::*;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::ErrorKind;

/// Paints a solid square for every glyph except `missing`.
struct BoxGlyphs {
    missing: &'static str,
}

impl GlyphRasterizer for BoxGlyphs {
    fn rasterize(&self, text: &str, size: u32) -> PikuraResult<RasterBuffer> {
        if text == self.missing {
            return Err(PikuraError::glyph_render("", "not in font"));
        }
        RasterBuffer::filled(size, size, Rgba8Premul::from_straight_rgba(255, 0, 0, 255))
    }
}

struct BlankGlyphs;

impl GlyphRasterizer for BlankGlyphs {
    fn rasterize(&self, _text: &str, size: u32) -> PikuraResult<RasterBuffer> {
        RasterBuffer::transparent(size, size)
    }
}

struct WrongSizeGlyphs;

impl GlyphRasterizer for WrongSizeGlyphs {
    fn rasterize(&self, _text: &str, size: u32) -> PikuraResult<RasterBuffer> {
        RasterBuffer::filled(size + 1, size, Rgba8Premul::from_straight_rgba(0, 0, 0, 255))
    }
}

fn plan() -> GeometryPlan {
    GeometryPlan::from_source_widths(&[800]).unwrap()
}

#[test]
fn sticker_raster_is_square_at_plan_size() {
    let s = StickerPlacement::new(0, "🌸", 10.0, 10.0);
    let raster = rasterize_sticker(&s, 0, &plan(), &BoxGlyphs { missing: "x" }).unwrap();
    assert_eq!((raster.width(), raster.height()), (120, 120));
}

#[test]
fn failures_carry_the_sticker_id() {
    let s = StickerPlacement::new(0, "x", 10.0, 10.0).with_id("abc");
    let err = rasterize_sticker(&s, 4, &plan(), &BoxGlyphs { missing: "x" }).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GlyphRender);
    assert!(matches!(err, PikuraError::GlyphRender { ref sticker_id, .. } if sticker_id == "abc"));

    let s = StickerPlacement::new(0, "x", 10.0, 10.0);
    let err = rasterize_sticker(&s, 4, &plan(), &BoxGlyphs { missing: "x" }).unwrap_err();
    assert!(matches!(err, PikuraError::GlyphRender { ref sticker_id, .. } if sticker_id == "#4"));
}

#[test]
fn empty_blank_and_misshapen_glyphs_are_rejected() {
    let glyphs = BoxGlyphs { missing: "x" };
    let empty = StickerPlacement::new(0, "  ", 0.0, 0.0);
    assert!(!rasterize_sticker(&empty, 0, &plan(), &glyphs).unwrap_err().is_fatal());

    let s = StickerPlacement::new(0, "✨", 0.0, 0.0);
    assert_eq!(
        rasterize_sticker(&s, 0, &plan(), &BlankGlyphs).unwrap_err().kind(),
        ErrorKind::GlyphRender
    );
    assert_eq!(
        rasterize_sticker(&s, 0, &plan(), &WrongSizeGlyphs).unwrap_err().kind(),
        ErrorKind::GlyphRender
    );
}

#[test]
fn svg_glyphs_without_fonts_fail_softly() {
    let settings = StripSettings {
        load_system_fonts: false,
        ..StripSettings::default()
    };
    let glyphs = SvgGlyphRasterizer::new(&settings);
    assert_eq!(glyphs.face_count(), 0);

    let s = StickerPlacement::new(0, "✨", 50.0, 50.0);
    let err = rasterize_sticker(&s, 0, &plan(), &glyphs).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GlyphRender);
}

#[test]
fn svg_glyphs_draw_text_when_fonts_are_installed() {
    let glyphs = SvgGlyphRasterizer::new(&StripSettings::default());
    if glyphs.face_count() == 0 {
        return;
    }
    let raster = glyphs.rasterize("A", 64).unwrap();
    assert_eq!((raster.width(), raster.height()), (64, 64));
    // Corners stay transparent around a centered glyph.
    assert_eq!(raster.pixel(0, 0).unwrap().a, 0);
    assert_eq!(raster.pixel(63, 63).unwrap().a, 0);
}
