use image::GenericImageView;
use std::path::PathBuf;

use super::*;
use crate::foundation::core::IntensityBuffer;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("compositor_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

fn layers(front: u8, back: u8) -> FittedLayers {
    FittedLayers {
        front: IntensityBuffer::from_pixel(2, 2, image::Luma([front])),
        back: IntensityBuffer::from_pixel(2, 2, image::Luma([back])),
    }
}

#[test]
fn factory_maps_strategy_kinds() {
    assert_eq!(
        create_compositor(StrategyKind::Keyed { threshold: 1 }).name(),
        "keyed"
    );
    assert_eq!(create_compositor(StrategyKind::GrayAlpha).name(), "gray-alpha");
}

#[test]
fn keyed_blend_writes_rgba_png() {
    let out = scratch("keyed.png");
    KeyedBlend { threshold: 192 }
        .composite(layers(50, 50), &out)
        .unwrap();
    let img = image::open(&out).unwrap().into_rgba8();
    assert_eq!(img.dimensions(), (2, 2));
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 128]));
}

#[test]
fn keyed_blend_reports_unknown_extension() {
    let out = scratch("keyed.not-an-image-format");
    let err = KeyedBlend { threshold: 192 }
        .composite(layers(50, 50), &out)
        .unwrap_err();
    assert!(matches!(err, HoshizoraError::Encode(_)));
}

#[test]
fn gray_alpha_fuse_writes_luma_alpha_png() {
    let out = scratch("fuse.png");
    GrayAlphaFuse.composite(layers(100, 200), &out).unwrap();
    let img = image::open(&out).unwrap();
    let image::DynamicImage::ImageLumaA8(img) = img else {
        panic!("expected a gray+alpha image");
    };
    assert!(img.pixels().all(|p| p.0 == [200, 255]));
}

#[test]
fn keyed_blend_drops_alpha_for_jpeg() {
    let out = scratch("keyed.jpg");
    KeyedBlend { threshold: 192 }
        .composite(layers(50, 50), &out)
        .unwrap();
    let img = image::open(&out).unwrap();
    assert_eq!(img.color(), image::ColorType::Rgb8);
    assert_eq!(img.dimensions(), (2, 2));
    // keyed ink is black; jpeg is lossy, so allow a small drift
    assert!(img.into_rgb8().pixels().all(|p| p.0.iter().all(|&c| c <= 4)));
}

#[test]
fn keyed_blend_unknown_extension_creates_no_file() {
    let out = scratch("keyed.xyz");
    assert!(
        KeyedBlend { threshold: 192 }
            .composite(layers(50, 50), &out)
            .is_err()
    );
    assert!(!out.exists());
}

#[test]
fn keyed_blend_removes_output_when_encoder_rejects_raster() {
    // ico frames are limited to 256 pixels per side; the file is created before the encoder
    // checks the dimensions
    let out = scratch("keyed_too_wide.ico");
    let layers = FittedLayers {
        front: IntensityBuffer::from_pixel(300, 1, image::Luma([50])),
        back: IntensityBuffer::from_pixel(300, 1, image::Luma([50])),
    };
    let err = KeyedBlend { threshold: 192 }
        .composite(layers, &out)
        .unwrap_err();
    assert!(matches!(err, HoshizoraError::Encode(_)));
    assert!(!out.exists());
}

#[test]
fn container_conversion_matches_encoder_layouts() {
    let rgba = RgbaImage::from_pixel(1, 1, image::Rgba([10, 20, 30, 40]));
    assert_eq!(
        fit_to_container(rgba.clone(), ImageFormat::Png).color(),
        image::ColorType::Rgba8
    );
    let jpeg = fit_to_container(rgba.clone(), ImageFormat::Jpeg);
    assert_eq!(jpeg.as_rgb8().unwrap().get_pixel(0, 0).0, [10, 20, 30]);
    assert_eq!(
        fit_to_container(rgba, ImageFormat::Farbfeld).color(),
        image::ColorType::Rgba16
    );
}
