use std::io::Cursor;

use anyhow::Context;

use crate::composition::model::SourceFrame;
use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{PikuraError, PikuraResult};

/// Largest width or height accepted from an image header.
pub const MAX_SOURCE_DIM: u32 = 16_384;

/// Read the image header of frame `index` and record its dimensions.
///
/// Only the header is parsed here; full decoding happens during normalization. Headers declaring
/// a side longer than [`MAX_SOURCE_DIM`] are rejected before any pixel memory is touched.
pub fn probe_source(index: usize, bytes: Vec<u8>) -> PikuraResult<SourceFrame> {
    let (width, height) = image::ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .context("sniff image format")
        .and_then(|r| r.into_dimensions().context("read image dimensions"))
        .map_err(|e| PikuraError::decode(index, e))?;

    if width == 0 || height == 0 {
        return Err(PikuraError::decode(
            index,
            anyhow::anyhow!("image has zero size ({width}x{height})"),
        ));
    }
    if width > MAX_SOURCE_DIM || height > MAX_SOURCE_DIM {
        return Err(PikuraError::decode(
            index,
            anyhow::anyhow!(
                "image too large: {width}x{height} (max {MAX_SOURCE_DIM}x{MAX_SOURCE_DIM})"
            ),
        ));
    }

    Ok(SourceFrame {
        index,
        bytes,
        width,
        height,
    })
}

/// Fully decode a source frame into premultiplied RGBA8.
pub fn decode_source(frame: &SourceFrame) -> PikuraResult<RasterBuffer> {
    let dyn_img = image::load_from_memory(&frame.bytes)
        .context("decode image from memory")
        .map_err(|e| PikuraError::decode(frame.index, e))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    RasterBuffer::from_premul_rgba8(width, height, rgba8_premul)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
