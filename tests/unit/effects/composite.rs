use super::*;
use crate::effects::key::{BACK_INK, BACK_PAPER, FRONT_INK, FRONT_PAPER};

#[test]
fn blend_half_of_keyed_pixels() {
    assert_eq!(blend_half(FRONT_INK, BACK_PAPER), [0, 0, 0, 128]);
    assert_eq!(blend_half(FRONT_PAPER, BACK_INK), [255, 255, 255, 128]);
    assert_eq!(blend_half(FRONT_INK, BACK_INK), [128, 128, 128, 255]);
    assert_eq!(blend_half(FRONT_PAPER, BACK_PAPER), [128, 128, 128, 0]);
}

#[test]
fn blend_half_is_symmetric_and_idempotent() {
    let a = [10, 20, 30, 40];
    let b = [200, 0, 31, 255];
    assert_eq!(blend_half(a, b), blend_half(b, a));
    assert_eq!(blend_half(a, a), a);
}

#[test]
fn blend_half_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(blend_half_in_place(&mut dst, &[0u8; 4]).is_err());
    let mut odd = vec![0u8; 3];
    assert!(blend_half_in_place(&mut odd, &[0u8; 3]).is_err());
}

#[test]
fn blend_region_only_touches_the_centered_window() {
    let mut canvas = RgbaImage::from_pixel(4, 3, image::Rgba(FRONT_INK));
    let layer = RgbaImage::from_pixel(2, 1, image::Rgba(BACK_INK));
    blend_region_in_place(&mut canvas, &layer).unwrap();

    for (x, y, p) in canvas.enumerate_pixels() {
        if y == 1 && (x == 1 || x == 2) {
            assert_eq!(p.0, [128, 128, 128, 255], "({x},{y})");
        } else {
            assert_eq!(p.0, FRONT_INK, "({x},{y})");
        }
    }
}

#[test]
fn blend_region_rejects_larger_layer() {
    let mut canvas = RgbaImage::new(2, 2);
    let layer = RgbaImage::new(3, 1);
    assert!(blend_region_in_place(&mut canvas, &layer).is_err());
}

#[test]
fn gray_alpha_opaque_when_back_dominates() {
    assert_eq!(gray_alpha(100, 200), (200, 255));
    assert_eq!(gray_alpha(0, 255), (255, 255));
    assert_eq!(gray_alpha(0, 0), (0, 255));
}

#[test]
fn gray_alpha_fully_transparent_is_zero_gray() {
    assert_eq!(gray_alpha(255, 0), (0, 0));
}

#[test]
fn gray_alpha_partial_alpha() {
    // alpha = 10 + 255 - 200 = 65, gray = 10 * 255 / 65 = 39
    assert_eq!(gray_alpha(200, 10), (39, 65));
}

#[test]
fn gray_alpha_saturates_iff_back_not_below_front() {
    for x in 0..=255u8 {
        for y in 0..=255u8 {
            let (gray, alpha) = gray_alpha(x, y);
            assert_eq!(alpha == 255, y >= x, "x={x} y={y}");
            if alpha > 0 {
                let expected = u32::from(y) * 255 / u32::from(alpha);
                assert_eq!(u32::from(gray), expected, "x={x} y={y}");
                assert!(gray >= y, "x={x} y={y}");
            } else {
                assert_eq!((x, y, gray), (255, 0, 0));
            }
        }
    }
}

#[test]
fn gray_alpha_row_interleaves_pairs() {
    let mut row = vec![0u8; 4];
    gray_alpha_row(&mut row, &[100, 255], &[200, 0]).unwrap();
    assert_eq!(row, vec![200, 255, 0, 0]);
    assert!(gray_alpha_row(&mut row, &[1], &[1]).is_err());
}

#[test]
fn gray_alpha_rows_walks_top_to_bottom() {
    let front = IntensityBuffer::from_raw(2, 2, vec![100, 255, 0, 200]).unwrap();
    let back = IntensityBuffer::from_raw(2, 2, vec![200, 0, 0, 10]).unwrap();
    let mut rows = GrayAlphaRows::new(&front, &back).unwrap();
    assert_eq!(rows.canvas(), Canvas::new(2, 2));

    let (idx, row) = rows.next_row().unwrap().unwrap();
    assert_eq!((idx, row.to_vec()), (0, vec![200, 255, 0, 0]));
    let (idx, row) = rows.next_row().unwrap().unwrap();
    assert_eq!((idx, row.to_vec()), (1, vec![0, 255, 39, 65]));
    assert!(rows.next_row().unwrap().is_none());
}

#[test]
fn gray_alpha_rows_requires_aligned_canvases() {
    let front = IntensityBuffer::new(2, 2);
    let back = IntensityBuffer::new(2, 3);
    assert!(GrayAlphaRows::new(&front, &back).is_err());
}
