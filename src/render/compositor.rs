use crate::effects::composite::draw_over_clipped;
use crate::foundation::core::{RasterBuffer, Rgba8};
use crate::foundation::error::{PikuraError, PikuraResult};
use crate::layout::geometry::GeometryPlan;

/// A rasterized sticker and its top-left position on the canvas.
#[derive(Clone, Debug)]
pub struct PlacedSticker {
    /// Sticker pixels.
    pub raster: RasterBuffer,
    /// Canvas x of the raster's left edge; may be negative.
    pub left: i64,
    /// Canvas y of the raster's top edge; may be negative.
    pub top: i64,
}

/// Layer frames and stickers onto a background-filled canvas.
///
/// Frames are drawn in index order, then stickers in list order, so stickers always cover frames and
/// later stickers cover earlier ones. Sticker pixels outside the canvas are clipped.
pub fn composite_strip(
    background: Rgba8,
    plan: &GeometryPlan,
    frames: Vec<RasterBuffer>,
    stickers: Vec<PlacedSticker>,
) -> PikuraResult<RasterBuffer> {
    if frames.len() != plan.frame_count {
        return Err(PikuraError::validation(format!(
            "compositor got {} frames for a {}-frame plan",
            frames.len(),
            plan.frame_count
        )));
    }

    let mut canvas = RasterBuffer::filled(
        plan.strip_width,
        plan.strip_height,
        background.premultiplied(),
    )?;

    for (i, frame) in frames.iter().enumerate() {
        if frame.width() != plan.frame_width || frame.height() != plan.frame_height {
            return Err(PikuraError::validation(format!(
                "frame {i} is {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                plan.frame_width,
                plan.frame_height
            )));
        }
        let (left, top) = plan.frame_offset(i);
        draw_over_clipped(&mut canvas, frame, left, top);
    }

    for (i, sticker) in stickers.iter().enumerate() {
        let drawn = draw_over_clipped(&mut canvas, &sticker.raster, sticker.left, sticker.top);
        if drawn == 0 {
            tracing::debug!(
                sticker = i,
                left = sticker.left,
                top = sticker.top,
                "sticker lies entirely outside the canvas"
            );
        }
    }

    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
