use image::{GrayImage, Luma, Rgba, RgbaImage};

use crate::foundation::core::{Canvas, IntensityBuffer};
use crate::foundation::error::HoshizoraResult;

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Opaque black, the front layer's ink.
pub const FRONT_INK: Rgba8 = [0, 0, 0, 255];
/// Transparent white, the front layer's keyed-out paper.
pub const FRONT_PAPER: Rgba8 = [255, 255, 255, 0];
/// Opaque white, the back layer's ink.
pub const BACK_INK: Rgba8 = [255, 255, 255, 255];
/// Transparent black, the back layer's keyed-out base.
pub const BACK_PAPER: Rgba8 = [0, 0, 0, 0];

/// Padding intensity for the front canvas (reads as paper).
pub const FRONT_FILL: u8 = 255;
/// Padding intensity for the back canvas (reads as base).
pub const BACK_FILL: u8 = 0;

/// Which side of the composite a layer belongs to. Decides keying polarity and padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerRole {
    /// Dark ink on light paper.
    Front,
    /// Light ink on dark base.
    Back,
}

impl LayerRole {
    /// Intensity used to pad this layer onto a larger canvas.
    pub fn fill(self) -> u8 {
        match self {
            Self::Front => FRONT_FILL,
            Self::Back => BACK_FILL,
        }
    }

    /// Keyed pixel for the keyed-out background of this layer.
    pub fn keyed_fill(self) -> Rgba8 {
        match self {
            Self::Front => FRONT_PAPER,
            Self::Back => BACK_PAPER,
        }
    }

    /// Key one intensity sample for this layer.
    pub fn key(self, intensity: u8, threshold: u8) -> Rgba8 {
        match self {
            Self::Front => key_front(intensity, threshold),
            Self::Back => key_back(intensity, threshold),
        }
    }
}

/// Front keying: anything darker than `threshold` is ink.
pub fn key_front(intensity: u8, threshold: u8) -> Rgba8 {
    if intensity < threshold {
        FRONT_INK
    } else {
        FRONT_PAPER
    }
}

/// Back keying: anything brighter than `threshold` is ink.
pub fn key_back(intensity: u8, threshold: u8) -> Rgba8 {
    if intensity > threshold {
        BACK_INK
    } else {
        BACK_PAPER
    }
}

/// Hard-key every sample of `layer` into an RGBA mask.
pub fn key_layer(layer: &IntensityBuffer, threshold: u8, role: LayerRole) -> RgbaImage {
    RgbaImage::from_fn(layer.width(), layer.height(), |x, y| {
        Rgba(role.key(layer.get_pixel(x, y).0[0], threshold))
    })
}

/// Place `layer` uncropped and centered on `canvas`, padding with `fill`.
pub fn pad_centered(
    layer: IntensityBuffer,
    canvas: Canvas,
    fill: u8,
) -> HoshizoraResult<IntensityBuffer> {
    let (ox, oy) = canvas.centered_offset(Canvas::of(&layer))?;
    if Canvas::of(&layer) == canvas {
        return Ok(layer);
    }
    let mut out = GrayImage::from_pixel(canvas.width, canvas.height, Luma([fill]));
    image::imageops::replace(&mut out, &layer, i64::from(ox), i64::from(oy));
    Ok(out)
}

/// RGBA counterpart of [`pad_centered`].
pub fn pad_centered_rgba(
    layer: RgbaImage,
    canvas: Canvas,
    fill: Rgba8,
) -> HoshizoraResult<RgbaImage> {
    let (ox, oy) = canvas.centered_offset(Canvas::of(&layer))?;
    if Canvas::of(&layer) == canvas {
        return Ok(layer);
    }
    let mut out = RgbaImage::from_pixel(canvas.width, canvas.height, Rgba(fill));
    image::imageops::replace(&mut out, &layer, i64::from(ox), i64::from(oy));
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/key.rs"]
mod tests;
