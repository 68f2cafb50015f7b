use super::*;
use crate::composition::model::{StickerPlacement, Theme};
use crate::foundation::core::Rgba8Premul;

fn solid(w: u32, h: u32, r: u8, g: u8, b: u8) -> RasterBuffer {
    RasterBuffer::filled(w, h, Rgba8Premul::from_straight_rgba(r, g, b, 255)).unwrap()
}

fn frames_for(plan: &GeometryPlan) -> Vec<RasterBuffer> {
    (0..plan.frame_count)
        .map(|i| solid(plan.frame_width, plan.frame_height, 0, 0, i as u8 * 10))
        .collect()
}

#[test]
fn gutters_show_theme_background() {
    let plan = GeometryPlan::from_source_widths(&[800, 800]).unwrap();
    let bg = Theme::Midnight.background();
    let canvas = composite_strip(bg, &plan, frames_for(&plan), vec![]).unwrap();

    assert_eq!((canvas.width(), canvas.height()), (plan.strip_width, plan.strip_height));
    let bgp = bg.premultiplied();
    // Outer padding on every side.
    for (x, y) in [(0, 0), (39, 500), (plan.strip_width - 1, 500), (500, plan.strip_height - 1)] {
        assert_eq!(canvas.pixel(x, y), Some(bgp), "({x},{y})");
    }
    // Gap between frame 0 and frame 1.
    let gap_y = 40 + plan.frame_height + 5;
    assert_eq!(canvas.pixel(400, gap_y), Some(bgp));

    // Frame interiors.
    assert_eq!(canvas.pixel(40, 40).unwrap().to_array(), [0, 0, 0, 255]);
    let (_, top1) = plan.frame_offset(1);
    assert_eq!(canvas.pixel(40, top1 as u32).unwrap().to_array(), [0, 0, 10, 255]);
}

#[test]
fn stickers_draw_above_frames_in_list_order() {
    let plan = GeometryPlan::from_source_widths(&[800]).unwrap();
    let first = StickerPlacement::new(0, "a", 50.0, 50.0);
    let (left, top) = plan.sticker_offset(&first);
    let size = plan.sticker_pixel_size;

    let stickers = vec![
        PlacedSticker {
            raster: solid(size, size, 255, 0, 0),
            left,
            top,
        },
        PlacedSticker {
            raster: solid(size, size, 0, 255, 0),
            left: left + 10,
            top,
        },
    ];
    let canvas = composite_strip(Theme::Plain.background(), &plan, frames_for(&plan), stickers)
        .unwrap();

    assert_eq!(canvas.pixel(left as u32, top as u32).unwrap().to_array(), [255, 0, 0, 255]);
    assert_eq!(
        canvas.pixel(left as u32 + 10, top as u32).unwrap().to_array(),
        [0, 255, 0, 255]
    );
}

#[test]
fn off_canvas_stickers_are_clipped_silently() {
    let plan = GeometryPlan::from_source_widths(&[800]).unwrap();
    let size = plan.sticker_pixel_size;
    let stickers = vec![
        PlacedSticker {
            raster: solid(size, size, 255, 0, 0),
            left: -60,
            top: -60,
        },
        PlacedSticker {
            raster: solid(size, size, 255, 0, 0),
            left: 100_000,
            top: -100_000,
        },
    ];
    let canvas =
        composite_strip(Theme::Pastel.background(), &plan, frames_for(&plan), stickers).unwrap();
    assert_eq!(canvas.pixel(0, 0).unwrap().to_array(), [255, 0, 0, 255]);
    assert_eq!(canvas.pixel(60, 60).unwrap().to_array(), [0, 0, 0, 255]);
    assert_eq!(canvas.pixel(70, 10), Some(Theme::Pastel.background().premultiplied()));
}

#[test]
fn mismatched_frames_are_rejected() {
    let plan = GeometryPlan::from_source_widths(&[800, 800]).unwrap();
    let bg = Theme::Plain.background();
    assert!(composite_strip(bg, &plan, vec![solid(800, 1064, 0, 0, 0)], vec![]).is_err());
    assert!(
        composite_strip(bg, &plan, vec![solid(10, 10, 0, 0, 0), solid(10, 10, 0, 0, 0)], vec![])
            .is_err()
    );
}
