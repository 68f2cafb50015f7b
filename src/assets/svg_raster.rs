use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{PikuraError, PikuraResult};

/// Font family stack used for sticker glyphs, color emoji faces first.
pub const EMOJI_FONT_FAMILIES: &str =
    "Apple Color Emoji, Segoe UI Emoji, Noto Color Emoji, Arial, sans-serif";

/// Glyph font size in units of the 100-unit sticker viewbox.
pub const GLYPH_FONT_SIZE: u32 = 80;

/// Build the font database used for glyph rendering.
pub fn build_glyph_fontdb(
    load_system_fonts: bool,
    font_dirs: &[PathBuf],
) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    if load_system_fonts {
        db.load_system_fonts();
    }
    for dir in font_dirs {
        load_fonts_from_dir(&mut db, dir);
    }
    tracing::debug!(faces = db.len(), "glyph font database ready");
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(font = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

/// SVG document drawing `text` centered in a `size`×`size` square.
///
/// The document uses a 100-unit viewbox so the glyph scale is independent of `size`.
pub fn glyph_svg_document(text: &str, size: u32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 100 100"><text x="50" y="50" dominant-baseline="middle" text-anchor="middle" font-size="{GLYPH_FONT_SIZE}" font-family="{EMOJI_FONT_FAMILIES}">{}</text></svg>"#,
        escape_xml_text(text)
    )
}

fn escape_xml_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Parse an SVG document against a shared font database.
pub fn parse_svg_with_fonts(
    svg: &str,
    fontdb: &Arc<usvg::fontdb::Database>,
) -> PikuraResult<usvg::Tree> {
    let opts = usvg::Options {
        fontdb: Arc::clone(fontdb),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Render `tree` into a `width`×`height` premultiplied RGBA8 buffer.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> PikuraResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PikuraError::allocation(format!("{width}x{height} svg pixmap")))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.take())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
