use crate::foundation::error::{HoshizoraError, HoshizoraResult};

/// Single-channel 8-bit intensity raster, row-major.
pub type IntensityBuffer = image::GrayImage;

/// Pixel dimensions both layers agree on before compositing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas of `width` x `height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Canvas matching the dimensions of `img`.
    pub fn of<I: image::GenericImageView>(img: &I) -> Self {
        let (width, height) = img.dimensions();
        Self { width, height }
    }

    /// Smallest canvas that holds both `a` and `b` without clipping.
    pub fn enclosing(a: Canvas, b: Canvas) -> Self {
        Self {
            width: a.width.max(b.width),
            height: a.height.max(b.height),
        }
    }

    /// `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height.
    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Number of pixels.
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `true` when `inner` fits inside `self` on both axes.
    pub fn contains(self, inner: Canvas) -> bool {
        inner.width <= self.width && inner.height <= self.height
    }

    /// Top-left offset that centers `inner` on this canvas (rounded toward the top-left).
    pub fn centered_offset(self, inner: Canvas) -> HoshizoraResult<(u32, u32)> {
        if !self.contains(inner) {
            return Err(HoshizoraError::validation(format!(
                "{}x{} does not fit on a {}x{} canvas",
                inner.width, inner.height, self.width, self.height
            )));
        }
        Ok((
            (self.width - inner.width) / 2,
            (self.height - inner.height) / 2,
        ))
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
