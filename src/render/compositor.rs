use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::{
    config::StrategyKind,
    encode::gray_alpha_png::{OutputGuard, PngGrayAlphaSink, ensure_parent_dir},
    foundation::error::{HoshizoraError, HoshizoraResult},
    layout::fit::FittedLayers,
    render::pipeline::{render_gray_alpha, render_keyed},
};

/// A strategy that merges two fitted layers and writes the result to disk.
///
/// Both implementations share loading and fitting; they differ only in how the layers are keyed,
/// merged and encoded.
pub trait Compositor {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Merge `layers` and write the output image to `output`.
    fn composite(&self, layers: FittedLayers, output: &Path) -> HoshizoraResult<()>;
}

/// Hard-threshold keying followed by a 50/50 blend of the back layer into the front canvas.
///
/// The output container is picked from the file extension of `output`. Containers that cannot
/// carry the keyed alpha channel receive the color channels only.
#[derive(Clone, Copy, Debug)]
pub struct KeyedBlend {
    /// Keying threshold.
    pub threshold: u8,
}

impl Compositor for KeyedBlend {
    fn name(&self) -> &'static str {
        "keyed"
    }

    fn composite(&self, layers: FittedLayers, output: &Path) -> HoshizoraResult<()> {
        let format = ImageFormat::from_path(output).map_err(|e| {
            HoshizoraError::encode(format!(
                "unsupported output format '{}': {e}",
                output.display()
            ))
        })?;
        let rgba = render_keyed(layers, self.threshold)?;
        let img = fit_to_container(rgba, format);

        ensure_parent_dir(output)?;
        let guard = OutputGuard::new(output);
        img.save_with_format(output, format).map_err(|e| {
            HoshizoraError::encode(format!("failed to write '{}': {e}", output.display()))
        })?;
        guard.commit();
        tracing::debug!(path = %output.display(), ?format, "keyed output written");
        Ok(())
    }
}

/// Convert the keyed raster to a pixel layout the `format` encoder accepts.
fn fit_to_container(rgba: RgbaImage, format: ImageFormat) -> DynamicImage {
    let img = DynamicImage::ImageRgba8(rgba);
    match format {
        ImageFormat::Jpeg | ImageFormat::Pnm => DynamicImage::ImageRgb8(img.to_rgb8()),
        ImageFormat::Hdr => DynamicImage::ImageRgb32F(img.to_rgb32f()),
        ImageFormat::OpenExr => DynamicImage::ImageRgba32F(img.to_rgba32f()),
        ImageFormat::Farbfeld => DynamicImage::ImageRgba16(img.to_rgba16()),
        _ => img,
    }
}

/// Algebraic gray+alpha fusion streamed straight into a PNG file.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrayAlphaFuse;

impl Compositor for GrayAlphaFuse {
    fn name(&self) -> &'static str {
        "gray-alpha"
    }

    fn composite(&self, layers: FittedLayers, output: &Path) -> HoshizoraResult<()> {
        let mut sink = PngGrayAlphaSink::create(output)?;
        render_gray_alpha(layers, &mut sink)
    }
}

/// Create the compositor for `kind`.
pub fn create_compositor(kind: StrategyKind) -> Box<dyn Compositor> {
    match kind {
        StrategyKind::Keyed { threshold } => Box::new(KeyedBlend { threshold }),
        StrategyKind::GrayAlpha => Box::new(GrayAlphaFuse),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
