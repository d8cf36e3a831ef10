use image::RgbaImage;

use crate::effects::key::Rgba8;
use crate::foundation::core::{Canvas, IntensityBuffer};
use crate::foundation::error::{HoshizoraError, HoshizoraResult};

/// Equal-weight mix of two pixels, every channel including alpha.
///
/// `0.5 * dst + 0.5 * src`, rounded half up and saturated to `u8`.
pub fn blend_half(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = avg_round_u8(dst[i], src[i]);
    }
    out
}

/// Blend `layer` onto the centered region of `canvas` it covers, 50/50 per channel.
///
/// Pixels of `canvas` outside that region are left untouched.
pub fn blend_region_in_place(canvas: &mut RgbaImage, layer: &RgbaImage) -> HoshizoraResult<()> {
    let (ox, oy) = Canvas::of(&*canvas).centered_offset(Canvas::of(layer))?;
    if Canvas::of(layer).is_empty() {
        return Ok(());
    }
    let row_len = layer.width() as usize * 4;
    let stride = canvas.width() as usize * 4;
    let dst: &mut [u8] = &mut **canvas;
    for (y, src_row) in layer.as_raw().chunks_exact(row_len).enumerate() {
        let start = (oy as usize + y) * stride + ox as usize * 4;
        blend_half_in_place(&mut dst[start..start + row_len], src_row)?;
    }
    Ok(())
}

/// Row-level form of [`blend_half`].
pub fn blend_half_in_place(dst: &mut [u8], src: &[u8]) -> HoshizoraResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(HoshizoraError::validation(
            "blend_half_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = blend_half([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Gray and alpha for one pixel from the front intensity `x` and the back intensity `y`.
///
/// `alpha = min(y + 255 - x, 255)` and `gray = y * 255 / alpha` (truncating). Fully transparent
/// pixels (`alpha == 0`, only reachable at `x == 255, y == 0`) get `gray = 0`.
pub fn gray_alpha(x: u8, y: u8) -> (u8, u8) {
    let (x, y) = (u32::from(x), u32::from(y));
    let alpha = (y + 255 - x).min(255);
    if alpha == 0 {
        return (0, 0);
    }
    // alpha >= y, so the quotient stays within 0..=255
    let gray = y * 255 / alpha;
    (gray as u8, alpha as u8)
}

/// Fill `row` with interleaved `(gray, alpha)` pairs for two equal-length intensity rows.
pub fn gray_alpha_row(row: &mut [u8], front: &[u8], back: &[u8]) -> HoshizoraResult<()> {
    if front.len() != back.len() || row.len() != front.len() * 2 {
        return Err(HoshizoraError::validation(
            "gray_alpha_row expects equal-length intensity rows and a 2x output row",
        ));
    }
    for ((px, &x), &y) in row.chunks_exact_mut(2).zip(front).zip(back) {
        let (gray, alpha) = gray_alpha(x, y);
        px[0] = gray;
        px[1] = alpha;
    }
    Ok(())
}

/// Row-at-a-time producer of the gray+alpha raster for two pixel-aligned canvases.
///
/// Only one output row is held at a time; it is overwritten on each step.
pub struct GrayAlphaRows<'a> {
    front: &'a IntensityBuffer,
    back: &'a IntensityBuffer,
    next: u32,
    row: Vec<u8>,
}

impl<'a> GrayAlphaRows<'a> {
    /// Pair two canvases of identical size.
    pub fn new(front: &'a IntensityBuffer, back: &'a IntensityBuffer) -> HoshizoraResult<Self> {
        if front.dimensions() != back.dimensions() {
            return Err(HoshizoraError::validation(format!(
                "gray+alpha canvases differ: front {}, back {}",
                Canvas::of(front),
                Canvas::of(back)
            )));
        }
        Ok(Self {
            front,
            back,
            next: 0,
            row: vec![0u8; front.width() as usize * 2],
        })
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas::of(self.front)
    }

    /// Compute the next row, returning its index and bytes, or `None` past the last row.
    pub fn next_row(&mut self) -> HoshizoraResult<Option<(u32, &[u8])>> {
        if self.next >= self.front.height() {
            return Ok(None);
        }
        let (front, back) = (self.front, self.back);
        let width = front.width() as usize;
        let start = self.next as usize * width;
        let front = &front.as_raw()[start..start + width];
        let back = &back.as_raw()[start..start + width];
        gray_alpha_row(&mut self.row, front, back)?;
        let idx = self.next;
        self.next += 1;
        Ok(Some((idx, &self.row)))
    }
}

fn avg_round_u8(a: u8, b: u8) -> u8 {
    ((u16::from(a) + u16::from(b) + 1) / 2) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
