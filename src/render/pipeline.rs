use image::RgbaImage;

use crate::{
    assets::decode::load_layer,
    config::{CompositeConfig, StrategyKind},
    effects::composite::{GrayAlphaRows, blend_region_in_place},
    effects::key::{LayerRole, key_layer, pad_centered, pad_centered_rgba},
    encode::sink::{RasterConfig, RowSink},
    foundation::core::Canvas,
    foundation::error::HoshizoraResult,
    layout::fit::{FittedLayers, fit_layers},
    render::compositor::create_compositor,
};

/// What a finished run produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Output image size.
    pub canvas: Canvas,
    /// Strategy that produced it.
    pub strategy: StrategyKind,
}

/// Load, fit and composite both layers as described by `cfg`.
///
/// Pipeline:
/// 1. [`load_layer`] for front and back
/// 2. [`fit_layers`]
/// 3. the [`Compositor`](crate::Compositor) selected by `cfg.strategy`
///
/// Nothing is written when validation, decoding or fitting fails.
#[tracing::instrument(skip_all, fields(strategy = %cfg.strategy))]
pub fn run(cfg: &CompositeConfig) -> HoshizoraResult<RunSummary> {
    cfg.validate()?;
    let front = load_layer(&cfg.front)?;
    let back = load_layer(&cfg.back)?;

    let layers = fit_layers(front, back)?;
    let canvas = layers.canvas();

    let compositor = create_compositor(cfg.strategy);
    tracing::info!(
        compositor = compositor.name(),
        %canvas,
        output = %cfg.output.display(),
        "compositing"
    );
    compositor.composite(layers, &cfg.output)?;

    Ok(RunSummary {
        canvas,
        strategy: cfg.strategy,
    })
}

/// Key both layers and blend the back into the centered region of the front canvas.
///
/// The front layer spans the whole canvas (padded with keyed-out paper when the back layer is the
/// larger one); front pixels outside the back layer's region keep their keyed value.
pub fn render_keyed(layers: FittedLayers, threshold: u8) -> HoshizoraResult<RgbaImage> {
    let canvas = layers.canvas();
    let front = key_layer(&layers.front, threshold, LayerRole::Front);
    let back = key_layer(&layers.back, threshold, LayerRole::Back);
    drop(layers);

    let mut out = pad_centered_rgba(front, canvas, LayerRole::Front.keyed_fill())?;
    blend_region_in_place(&mut out, &back)?;
    tracing::debug!(%canvas, threshold, "keyed blend done");
    Ok(out)
}

/// Center both layers on their common canvas and stream the gray+alpha raster into `sink`.
///
/// Rows are produced top to bottom and handed to the sink one at a time.
pub fn render_gray_alpha(layers: FittedLayers, sink: &mut dyn RowSink) -> HoshizoraResult<()> {
    let canvas = layers.canvas();
    let FittedLayers { front, back } = layers;
    let front = pad_centered(front, canvas, LayerRole::Front.fill())?;
    let back = pad_centered(back, canvas, LayerRole::Back.fill())?;

    let mut rows = GrayAlphaRows::new(&front, &back)?;
    sink.begin(RasterConfig::for_canvas(canvas))?;
    while let Some((idx, row)) = rows.next_row()? {
        sink.push_row(idx, row)?;
    }
    sink.end()?;
    tracing::debug!(%canvas, "gray+alpha raster streamed");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
