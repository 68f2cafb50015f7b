use std::sync::Arc;

use crate::assets::svg_raster::{
    build_glyph_fontdb, glyph_svg_document, parse_svg_with_fonts, rasterize_svg_to_premul_rgba8,
};
use crate::composition::model::StickerPlacement;
use crate::config::StripSettings;
use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{PikuraError, PikuraResult};
use crate::layout::geometry::GeometryPlan;

/// Source of sticker glyph pixels.
///
/// Implementations are shared read-only across worker threads, so `rasterize` takes `&self`.
pub trait GlyphRasterizer: Send + Sync {
    /// Render `text` centered in a transparent `size`×`size` premultiplied buffer.
    ///
    /// Returns an error when the text cannot be drawn, including when no available font covers it.
    fn rasterize(&self, text: &str, size: u32) -> PikuraResult<RasterBuffer>;
}

/// Draws glyphs through an SVG `<text>` element rendered by `resvg`.
#[derive(Clone)]
pub struct SvgGlyphRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgGlyphRasterizer {
    /// Load fonts according to `settings`.
    pub fn new(settings: &StripSettings) -> Self {
        Self::with_fontdb(build_glyph_fontdb(
            settings.load_system_fonts,
            &settings.font_dirs,
        ))
    }

    /// Use an already populated font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    /// Number of font faces available for glyph lookup.
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }
}

impl std::fmt::Debug for SvgGlyphRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgGlyphRasterizer")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

impl GlyphRasterizer for SvgGlyphRasterizer {
    fn rasterize(&self, text: &str, size: u32) -> PikuraResult<RasterBuffer> {
        let doc = glyph_svg_document(text, size);
        let tree = parse_svg_with_fonts(&doc, &self.fontdb)?;
        let data = rasterize_svg_to_premul_rgba8(&tree, size, size)?;
        RasterBuffer::from_premul_rgba8(size, size, data)
    }
}

/// Rasterize one sticker at the plan's sticker size.
///
/// Every failure is reported as [`PikuraError::GlyphRender`] carrying the sticker id, so the caller
/// can skip the sticker and keep compositing.
pub fn rasterize_sticker(
    placement: &StickerPlacement,
    position: usize,
    plan: &GeometryPlan,
    glyphs: &dyn GlyphRasterizer,
) -> PikuraResult<RasterBuffer> {
    let sticker_id = placement.sticker_id(position);
    let size = plan.sticker_pixel_size;

    if placement.emoji.trim().is_empty() {
        return Err(PikuraError::glyph_render(sticker_id, "empty emoji text"));
    }

    let raster = glyphs
        .rasterize(&placement.emoji, size)
        .map_err(|e| match e {
            PikuraError::GlyphRender { reason, .. } => {
                PikuraError::glyph_render(sticker_id.clone(), reason)
            }
            other => PikuraError::glyph_render(sticker_id.clone(), other.to_string()),
        })?;

    if raster.width() != size || raster.height() != size {
        return Err(PikuraError::glyph_render(
            sticker_id,
            format!(
                "glyph raster is {}x{}, expected {size}x{size}",
                raster.width(),
                raster.height()
            ),
        ));
    }
    if raster.is_fully_transparent() {
        return Err(PikuraError::glyph_render(
            sticker_id,
            format!("no available font draws {:?}", placement.emoji),
        ));
    }
    Ok(raster)
}

#[cfg(test)]
#[path = "../../tests/unit/render/sticker.rs"]
mod tests;
