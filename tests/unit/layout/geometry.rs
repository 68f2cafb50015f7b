use super::*;
use crate::foundation::error::ErrorKind;

#[test]
fn strip_dimensions_follow_frame_count() {
    for n in 1..=crate::MAX_FRAMES {
        let widths = vec![640; n];
        let plan = GeometryPlan::from_source_widths(&widths).unwrap();
        let fh = (f64::from(plan.frame_width) * 1.33).floor() as u32;
        assert_eq!(plan.frame_width, 800);
        assert_eq!(plan.frame_height, fh);
        assert_eq!(plan.strip_width, plan.frame_width + 80);
        assert_eq!(
            plan.strip_height,
            n as u32 * fh + (n as u32 - 1) * 20 + 80,
            "frame count {n}"
        );
    }
}

#[test]
fn frame_width_is_widest_source_but_at_least_800() {
    let plan = GeometryPlan::from_source_widths(&[600, 900]).unwrap();
    assert_eq!(plan.frame_width, 900);
    assert_eq!(plan.frame_height, 1197);
    assert_eq!(plan.sticker_pixel_size, 135);

    let plan = GeometryPlan::from_source_widths(&[10]).unwrap();
    assert_eq!(plan.frame_width, 800);
    assert_eq!(plan.frame_height, 1064);
    assert_eq!(plan.sticker_pixel_size, 120);
}

#[test]
fn empty_and_oversized_inputs_are_rejected() {
    assert_eq!(
        GeometryPlan::from_source_widths(&[]).unwrap_err().kind(),
        ErrorKind::NoFrames
    );
    assert_eq!(
        GeometryPlan::from_source_widths(&[800; 5]).unwrap_err().kind(),
        ErrorKind::TooManyFrames
    );
}

#[test]
fn frame_offsets_stack_with_gap() {
    let plan = GeometryPlan::from_source_widths(&[800, 800, 800]).unwrap();
    assert_eq!(plan.frame_offset(0), (40, 40));
    assert_eq!(plan.frame_offset(1), (40, 40 + 1064 + 20));
    assert_eq!(plan.frame_offset(2), (40, 40 + 2 * (1064 + 20)));
}

#[test]
fn centered_sticker_lands_at_frame_center() {
    let plan = GeometryPlan::from_source_widths(&[800]).unwrap();
    let s = StickerPlacement::new(0, "✨", 50.0, 50.0);
    let (x, y) = plan.sticker_offset(&s);
    let half = i64::from(plan.sticker_pixel_size) / 2;
    let cx = x + half;
    let cy = y + half;
    assert!((cx - (40 + 400)).abs() <= 1);
    assert!((cy - (532 + 40)).abs() <= 1);
}

#[test]
fn sticker_offset_uses_frame_top_and_floors() {
    let plan = GeometryPlan::from_source_widths(&[900, 900]).unwrap();
    // size 135, half 67.5
    let s = StickerPlacement::new(1, "✨", 0.0, 0.0);
    let frame_top = 40 + 1197 + 20;
    assert_eq!(plan.sticker_offset(&s), (-28, frame_top - 68));
}

#[test]
fn out_of_range_percentages_are_not_clamped() {
    let plan = GeometryPlan::from_source_widths(&[800]).unwrap();
    let (x, y) = plan.sticker_offset(&StickerPlacement::new(0, "✨", 250.0, -80.0));
    assert!(x > i64::from(plan.strip_width));
    assert!(y < 0);
}

#[test]
fn huge_widths_are_rejected_without_overflow() {
    let err = GeometryPlan::from_source_widths(&[i32::MAX as u32; 4]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = GeometryPlan::from_source_widths(&[u32::MAX]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    // Decodable but far too wide for a sane canvas.
    let err = GeometryPlan::from_source_widths(&[640, 16_000]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let plan = GeometryPlan::from_source_widths(&[MAX_FRAME_WIDTH; 4]).unwrap();
    assert_eq!(plan.frame_width, MAX_FRAME_WIDTH);
    assert_eq!(plan.strip_width, MAX_FRAME_WIDTH + 80);
    assert_eq!(plan.strip_height, 4 * plan.frame_height + 3 * 20 + 80);
}

#[test]
fn extreme_frame_indices_saturate() {
    let plan = GeometryPlan::from_source_widths(&[800]).unwrap();
    for index in [i64::MAX, i64::MIN, 9_007_199_254_740_993] {
        let (x, y) = plan.sticker_offset(&StickerPlacement::new(index, "✨", 50.0, 50.0));
        assert_eq!(x, 40 + 400 - 60);
        if index > 0 {
            assert!(y > i64::from(plan.strip_height), "index {index}");
        } else {
            assert!(y < 0, "index {index}");
        }
    }
    assert_eq!(plan.frame_offset(usize::MAX).0, 40);
}
