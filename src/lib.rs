//! Hoshizora fuses two grayscale line-art scans into a single transparent image.
//!
//! A *front* layer (dark ink on light paper) and a *back* layer (light ink on dark base) of any
//! size are brought to a common canvas without distortion and merged by one of two strategies.
//!
//! # Pipeline overview
//!
//! 1. **Load**: decode both files as 8-bit luma ([`load_layer`])
//! 2. **Fit**: resample one layer so the pair shares a canvas with aspect ratios intact
//!    ([`fit_layers`])
//! 3. **Composite**: either
//!    - [`KeyedBlend`]: hard-key each layer to opaque ink / transparent paper at a threshold and
//!      blend the back into the front 50/50, or
//!    - [`GrayAlphaFuse`]: derive `alpha = min(y + 255 - x, 255)` and `gray = y * 255 / alpha`
//!      per pixel from the front (`x`) and back (`y`) intensities
//! 4. **Encode**: the keyed result is saved by `image`; the gray+alpha raster is streamed row by
//!    row into a PNG through a [`RowSink`]
//!
//! Everything runs single-threaded and synchronously; each stage owns its buffers and hands them
//! to the next one.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod foundation;
mod layout;

/// Immutable run configuration.
pub mod config;
/// Output encoding sinks.
pub mod encode;
/// Compositing strategies and pipeline.
pub mod render;

pub use crate::assets::decode::{decode_layer, load_layer};
pub use crate::config::{CompositeConfig, DEFAULT_THRESHOLD, StrategyKind};
pub use crate::effects::composite::{
    GrayAlphaRows, blend_half, blend_half_in_place, blend_region_in_place, gray_alpha,
    gray_alpha_row,
};
pub use crate::effects::key::{
    BACK_FILL, BACK_INK, BACK_PAPER, FRONT_FILL, FRONT_INK, FRONT_PAPER, LayerRole, Rgba8,
    key_back, key_front, key_layer, pad_centered, pad_centered_rgba,
};
pub use crate::encode::gray_alpha_png::{OutputGuard, PngGrayAlphaSink, ensure_parent_dir};
pub use crate::encode::sink::{GRAY_ALPHA_CHANNELS, InMemoryRowSink, RasterConfig, RowSink};
pub use crate::foundation::core::{Canvas, IntensityBuffer};
pub use crate::foundation::error::{HoshizoraError, HoshizoraResult};
pub use crate::layout::fit::{FittedLayers, fit_layers, resize_to_fit};
pub use crate::render::compositor::{Compositor, GrayAlphaFuse, KeyedBlend, create_compositor};
pub use crate::render::pipeline::{RunSummary, render_gray_alpha, render_keyed, run};
