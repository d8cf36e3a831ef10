use std::path::Path;

use crate::foundation::core::{Canvas, IntensityBuffer};
use crate::foundation::error::{HoshizoraError, HoshizoraResult};

/// Load an image file of any supported format as 8-bit luma.
///
/// Fails with [`HoshizoraError::Decode`] when the file cannot be read, is not a decodable image,
/// or decodes to a zero-area raster.
#[tracing::instrument]
pub fn load_layer(path: &Path) -> HoshizoraResult<IntensityBuffer> {
    let dyn_img = image::open(path)
        .map_err(|e| HoshizoraError::decode(format!("load '{}': {e}", path.display())))?;
    let gray = into_layer(dyn_img)?;
    tracing::debug!(size = %Canvas::of(&gray), "decoded layer");
    Ok(gray)
}

/// Decode encoded image bytes as 8-bit luma.
pub fn decode_layer(bytes: &[u8]) -> HoshizoraResult<IntensityBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| HoshizoraError::decode(format!("decode image from memory: {e}")))?;
    into_layer(dyn_img)
}

fn into_layer(dyn_img: image::DynamicImage) -> HoshizoraResult<IntensityBuffer> {
    let gray = dyn_img.into_luma8();
    if Canvas::of(&gray).is_empty() {
        return Err(HoshizoraError::decode(format!(
            "layer decoded to an empty {}x{} image",
            gray.width(),
            gray.height()
        )));
    }
    Ok(gray)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
