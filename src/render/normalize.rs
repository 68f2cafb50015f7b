use image::imageops::{self, FilterType};

use crate::assets::decode::decode_source;
use crate::composition::model::{SourceFrame, Theme};
use crate::effects::composite::draw_over_clipped;
use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{PikuraError, PikuraResult};
use crate::layout::geometry::GeometryPlan;

/// Placement of a scaled photo inside its frame slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainFit {
    /// Scaled photo width.
    pub width: u32,
    /// Scaled photo height.
    pub height: u32,
    /// Horizontal offset inside the slot.
    pub left: u32,
    /// Vertical offset inside the slot.
    pub top: u32,
}

/// Scale `src` to fit entirely inside `target`, preserving aspect ratio, centered.
///
/// Smaller sources are scaled up. Odd leftover pixels go to the right/bottom.
pub fn contain_fit(src_w: u32, src_h: u32, target_w: u32, target_h: u32) -> ContainFit {
    let scale_x = f64::from(target_w) / f64::from(src_w);
    let scale_y = f64::from(target_h) / f64::from(src_h);
    let scale = scale_x.min(scale_y);
    let width = ((f64::from(src_w) * scale).round() as u32).clamp(1, target_w);
    let height = ((f64::from(src_h) * scale).round() as u32).clamp(1, target_h);
    ContainFit {
        width,
        height,
        left: (target_w - width) / 2,
        top: (target_h - height) / 2,
    }
}

/// Letterbox one source photo into an opaque `frame_width`×`frame_height` buffer.
///
/// Uncovered area, and any transparency in the photo itself, shows the theme background.
#[tracing::instrument(skip_all, fields(frame = source.index))]
pub fn normalize_frame(
    source: &SourceFrame,
    plan: &GeometryPlan,
    theme: Theme,
) -> PikuraResult<RasterBuffer> {
    let decoded = decode_source(source)?;
    let fit = contain_fit(
        decoded.width(),
        decoded.height(),
        plan.frame_width,
        plan.frame_height,
    );
    tracing::debug!(
        src_w = decoded.width(),
        src_h = decoded.height(),
        fit_w = fit.width,
        fit_h = fit.height,
        "letterboxing frame"
    );

    let scaled = if fit.width == decoded.width() && fit.height == decoded.height() {
        decoded
    } else {
        resize_premul(decoded, fit.width, fit.height)?
    };

    let mut out = RasterBuffer::filled(
        plan.frame_width,
        plan.frame_height,
        theme.background().premultiplied(),
    )?;
    draw_over_clipped(&mut out, &scaled, i64::from(fit.left), i64::from(fit.top));
    Ok(out)
}

fn resize_premul(src: RasterBuffer, width: u32, height: u32) -> PikuraResult<RasterBuffer> {
    let (src_w, src_h) = (src.width(), src.height());
    let img = image::RgbaImage::from_raw(src_w, src_h, src.into_data()).ok_or_else(|| {
        PikuraError::validation(format!("decoded frame {src_w}x{src_h} has a short pixel buffer"))
    })?;
    let resized = imageops::resize(&img, width, height, FilterType::Lanczos3);
    let mut data = resized.into_raw();
    clamp_premul_in_place(&mut data);
    RasterBuffer::from_premul_rgba8(width, height, data)
}

// Lanczos ringing can push a color channel above its alpha.
fn clamp_premul_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        for c in &mut px[..3] {
            *c = (*c).min(a);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/normalize.rs"]
mod tests;
