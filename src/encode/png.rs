use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ExtendedColorType, ImageEncoder as _, codecs::png::PngEncoder};

use crate::assets::decode::unpremultiply_rgba8_in_place;
use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{PikuraError, PikuraResult};

/// MIME type of encoded strips.
pub const PNG_MIME: &str = "image/png";

/// Encode a premultiplied raster as a straight-alpha RGBA8 PNG.
///
/// Encoding is deterministic: identical rasters produce identical bytes.
pub fn encode_png(raster: &RasterBuffer) -> PikuraResult<Vec<u8>> {
    let mut rgba = raster.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);

    let mut out = Vec::new();
    PngEncoder::new(Cursor::new(&mut out))
        .write_image(
            &rgba,
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| PikuraError::encode(format!("png: {e}")))?;
    Ok(out)
}

/// Wrap PNG bytes in a `data:image/png;base64,...` URI.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:{PNG_MIME};base64,{}", STANDARD.encode(png))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
