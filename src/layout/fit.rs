use image::imageops::{self, FilterType};

use crate::foundation::core::{Canvas, IntensityBuffer};
use crate::foundation::error::{HoshizoraError, HoshizoraResult};

/// Front and back layers after aspect-preserving fitting.
///
/// One layer is left untouched and the other is resampled so that neither is distorted; the
/// pair then fits, uncropped, on [`FittedLayers::canvas`].
#[derive(Clone, Debug)]
pub struct FittedLayers {
    /// Front (ink) layer.
    pub front: IntensityBuffer,
    /// Back (base) layer.
    pub back: IntensityBuffer,
}

impl FittedLayers {
    /// Smallest canvas holding both layers.
    pub fn canvas(&self) -> Canvas {
        Canvas::enclosing(Canvas::of(&self.front), Canvas::of(&self.back))
    }
}

/// Resample `src` to a target width or height, deriving the other side from `src`'s aspect.
///
/// A zero `width` means "derive the width from `height`"; otherwise the width wins and the height
/// is derived. When both are zero the source is returned unchanged. The derived side is
/// truncated toward zero and never drops below one pixel. Resampling is linear.
pub fn resize_to_fit(src: &IntensityBuffer, width: u32, height: u32) -> IntensityBuffer {
    if width == 0 && height == 0 {
        return src.clone();
    }
    let (w, h) = src.dimensions();
    let (width, height) = if width == 0 {
        (derive_side(w, height, h), height)
    } else {
        (width, derive_side(h, width, w))
    };
    if (width, height) == (w, h) {
        return src.clone();
    }
    imageops::resize(src, width, height, FilterType::Triangle)
}

fn derive_side(source_other: u32, target: u32, source_target: u32) -> u32 {
    let ratio = f64::from(target) / f64::from(source_target);
    ((f64::from(source_other) * ratio) as u32).max(1)
}

/// Bring `front` and `back` to compatible sizes without distorting either.
///
/// The layer that is smaller along the compared axes is resampled toward the other one. When
/// one layer is larger on both axes, the smaller one is scaled by whichever side keeps it inside
/// the larger layer's aspect; otherwise it is matched by height.
#[tracing::instrument(skip_all, fields(front = %Canvas::of(&front), back = %Canvas::of(&back)))]
pub fn fit_layers(
    front: IntensityBuffer,
    back: IntensityBuffer,
) -> HoshizoraResult<FittedLayers> {
    let fc = Canvas::of(&front);
    let bc = Canvas::of(&back);
    if fc.is_empty() || bc.is_empty() {
        return Err(HoshizoraError::validation(format!(
            "cannot fit empty layers (front {fc}, back {bc})"
        )));
    }

    let (front, back) = if fc.width > bc.width {
        let back = if fc.height > bc.height && fc.aspect() <= bc.aspect() {
            resize_to_fit(&back, fc.width, 0)
        } else {
            resize_to_fit(&back, 0, fc.height)
        };
        (front, back)
    } else {
        let front = if fc.height < bc.height && fc.aspect() <= bc.aspect() {
            resize_to_fit(&front, bc.width, 0)
        } else {
            resize_to_fit(&front, 0, bc.height)
        };
        (front, back)
    };

    let fitted = FittedLayers { front, back };
    tracing::debug!(
        front = %Canvas::of(&fitted.front),
        back = %Canvas::of(&fitted.back),
        canvas = %fitted.canvas(),
        "fitted layers"
    );
    Ok(fitted)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
