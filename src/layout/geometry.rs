use crate::composition::model::{StickerPlacement, validate_frame_count};
use crate::foundation::error::{PikuraError, PikuraResult};

/// Frames are never narrower than this.
pub const MIN_FRAME_WIDTH: u32 = 800;
/// Widest frame a strip will plan. Wider sources are rejected instead of letterboxed, which keeps
/// a four-frame canvas well under 2 GiB.
pub const MAX_FRAME_WIDTH: u32 = 8_192;
/// Outer gutter around the stacked frames.
pub const STRIP_PADDING: u32 = 40;
/// Vertical gap between consecutive frames.
pub const FRAME_GAP: u32 = 20;
/// Frame height as a multiple of frame width (3:4 portrait).
pub const FRAME_ASPECT: f64 = 1.33;
/// Sticker edge length as a fraction of frame width.
pub const STICKER_SIZE_RATIO: f64 = 0.15;

/// Pixel layout of one strip.
///
/// Computed once per invocation from the source widths and frame count. All frames share the same
/// dimensions regardless of their source aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeometryPlan {
    /// Number of frames stacked in the strip.
    pub frame_count: usize,
    /// Width of every frame slot.
    pub frame_width: u32,
    /// Height of every frame slot, `floor(frame_width * 1.33)`.
    pub frame_height: u32,
    /// Canvas width.
    pub strip_width: u32,
    /// Canvas height.
    pub strip_height: u32,
    /// Outer gutter.
    pub padding: u32,
    /// Gap between frames.
    pub inter_frame_padding: u32,
    /// Edge length of every sticker raster.
    pub sticker_pixel_size: u32,
}

impl GeometryPlan {
    /// Plan a strip from the decoded width of every source, in frame order.
    ///
    /// Fails when the width list is empty or longer than [`crate::MAX_FRAMES`], and when the widest
    /// source exceeds [`MAX_FRAME_WIDTH`].
    pub fn from_source_widths(widths: &[u32]) -> PikuraResult<Self> {
        validate_frame_count(widths.len())?;

        let max_width = widths.iter().copied().max().unwrap_or(MIN_FRAME_WIDTH);
        if max_width > MAX_FRAME_WIDTH {
            return Err(PikuraError::validation(format!(
                "source width {max_width} exceeds the maximum frame width {MAX_FRAME_WIDTH}"
            )));
        }
        let frame_width = max_width.max(MIN_FRAME_WIDTH);
        let frame_height = (f64::from(frame_width) * FRAME_ASPECT).floor() as u32;
        let frame_count = widths.len();
        let n = frame_count as u32;

        let padding = STRIP_PADDING;
        let inter_frame_padding = FRAME_GAP;

        let overflow = || {
            PikuraError::allocation(format!(
                "strip of {n} frames at {frame_width}x{frame_height} overflows canvas size"
            ))
        };
        let strip_width = padding
            .checked_mul(2)
            .and_then(|p| p.checked_add(frame_width))
            .ok_or_else(overflow)?;
        let strip_height = n
            .checked_mul(frame_height)
            .and_then(|h| h.checked_add((n - 1).checked_mul(inter_frame_padding)?))
            .and_then(|h| h.checked_add(padding.checked_mul(2)?))
            .ok_or_else(overflow)?;

        Ok(Self {
            frame_count,
            frame_width,
            frame_height,
            strip_width,
            strip_height,
            padding,
            inter_frame_padding,
            sticker_pixel_size: (f64::from(frame_width) * STICKER_SIZE_RATIO).floor() as u32,
        })
    }

    /// Top-left corner of frame `index` on the canvas.
    pub fn frame_offset(&self, index: usize) -> (i64, i64) {
        (i64::from(self.padding), self.frame_top(index as i64))
    }

    /// Top-left corner of a sticker raster on the canvas.
    ///
    /// Percent coordinates are relative to the sticker's frame and are not clamped, so the result
    /// may lie partly or entirely outside the canvas.
    pub fn sticker_offset(&self, placement: &StickerPlacement) -> (i64, i64) {
        let frame_top = self.frame_top(placement.frame_index) as f64;
        let half = f64::from(self.sticker_pixel_size) / 2.0;
        let center_x =
            f64::from(self.padding) + (placement.x_pct / 100.0) * f64::from(self.frame_width);
        let center_y = (placement.y_pct / 100.0) * f64::from(self.frame_height);

        let left = (center_x - half).floor() as i64;
        let top = (frame_top + center_y - half).floor() as i64;
        (left, top)
    }

    fn frame_top(&self, index: i64) -> i64 {
        let pitch = i64::from(self.frame_height) + i64::from(self.inter_frame_padding);
        i64::from(self.padding).saturating_add(index.saturating_mul(pitch))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
