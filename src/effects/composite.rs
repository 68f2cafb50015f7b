use crate::foundation::core::RasterBuffer;

/// One premultiplied pixel in RGBA channel order.
pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    for ((o, &s), &d) in out.iter_mut().zip(&src).zip(&dst) {
        *o = add_sat_u8(s, mul_div255(u16::from(d), inv));
    }
    out
}

/// Alpha-composite `src` onto `dst` with its top-left corner at `(left, top)`.
///
/// Any part of `src` outside `dst` is clipped. Returns the number of pixels touched, which is zero
/// for a placement entirely off the canvas.
pub fn draw_over_clipped(dst: &mut RasterBuffer, src: &RasterBuffer, left: i64, top: i64) -> u64 {
    let dst_w = i64::from(dst.width());
    let dst_h = i64::from(dst.height());
    let src_w = i64::from(src.width());
    let src_h = i64::from(src.height());

    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = left.saturating_add(src_w).min(dst_w);
    let y1 = top.saturating_add(src_h).min(dst_h);
    if x0 >= x1 || y0 >= y1 {
        return 0;
    }

    let span = (x1 - x0) as usize;
    let sx0 = (x0 - left) as usize;
    let dst_stride = dst.width() as usize * 4;
    let src_stride = src.width() as usize * 4;
    let src_data = src.data();
    let dst_data = dst.data_mut();

    for y in y0..y1 {
        let sy = (y - top) as usize;
        let d_start = (y as usize) * dst_stride + (x0 as usize) * 4;
        let s_start = sy * src_stride + sx0 * 4;
        let d_row = &mut dst_data[d_start..d_start + span * 4];
        let s_row = &src_data[s_start..s_start + span * 4];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }

    (span as u64) * ((y1 - y0) as u64)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
