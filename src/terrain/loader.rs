//! Decode uploaded raster images into height fields
//!
//! Format and size are checked against [`TerrainLimits`] before any decoding
//! happens. The image is always reduced to a single 8-bit luma channel, so
//! colour and alpha uploads are accepted and flattened to grayscale.

use serde::Serialize;

use super::height_field::{Dimensions, HeightField, TerrainStatistics};
use crate::core::config::TerrainLimits;
use crate::core::error::{Result, SitingError};

/// True when `filename` ends with one of the accepted extensions (any case)
pub fn has_supported_extension(filename: &str, limits: &TerrainLimits) -> bool {
    let lower = filename.to_lowercase();
    limits
        .supported_extensions
        .iter()
        .any(|ext| lower.ends_with(&ext.to_lowercase()))
}

/// Decode `bytes` (declared as `filename`) into a validated height field
pub fn load_from_image(
    bytes: &[u8],
    filename: &str,
    limits: &TerrainLimits,
) -> Result<HeightField> {
    if !has_supported_extension(filename, limits) {
        tracing::warn!("Rejected terrain upload {}: unsupported format", filename);
        return Err(SitingError::UnsupportedFormat {
            filename: filename.to_string(),
            supported: limits.supported_extensions.join(", "),
        });
    }

    if bytes.len() > limits.max_payload_bytes {
        tracing::warn!(
            "Rejected terrain upload {}: {} bytes over the {} byte cap",
            filename,
            bytes.len(),
            limits.max_payload_bytes
        );
        return Err(SitingError::PayloadTooLarge {
            size: bytes.len(),
            max: limits.max_payload_bytes,
        });
    }

    let image = image::load_from_memory(bytes)?;
    let luma = image.to_luma8();
    let (width, height) = luma.dimensions();
    let samples = luma.pixels().map(|p| f64::from(p.0[0])).collect();

    let field = HeightField::from_samples(
        width as usize,
        height as usize,
        samples,
        limits.min_dimension,
    )?;

    tracing::info!("Loaded {}x{} height field from {}", width, height, filename);
    Ok(field)
}

/// Serializable upload result: the full grid plus its summary
#[derive(Debug, Clone, Serialize)]
pub struct TerrainUpload {
    pub height_map: Vec<Vec<f64>>,
    pub dimensions: Dimensions,
    pub statistics: TerrainStatistics,
}

impl From<&HeightField> for TerrainUpload {
    fn from(field: &HeightField) -> Self {
        let summary = field.summarize();
        Self {
            height_map: field.rows().map(<[f64]>::to_vec).collect(),
            dimensions: summary.dimensions,
            statistics: summary.statistics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageOutputFormat::Png).unwrap();
        bytes.into_inner()
    }

    fn gradient_png(width: u32, height: u32) -> Vec<u8> {
        let img = GrayImage::from_fn(width, height, |x, y| Luma([(x + y) as u8]));
        encode(DynamicImage::ImageLuma8(img))
    }

    #[test]
    fn test_loads_grayscale_png() {
        let limits = TerrainLimits::default();
        let field = load_from_image(&gradient_png(16, 12), "moon.png", &limits).unwrap();
        assert_eq!(field.width(), 16);
        assert_eq!(field.height(), 12);
        assert_eq!(field.get(3, 2), 5.0);
    }

    #[test]
    fn test_colour_image_is_reduced_to_one_channel() {
        let img = RgbImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let bytes = encode(DynamicImage::ImageRgb8(img));
        let field = load_from_image(&bytes, "SITE.PNG", &TerrainLimits::default()).unwrap();
        assert_eq!(field.get(0, 0), 0.0);
        assert_eq!(field.get(9, 9), 255.0);
    }

    #[test]
    fn test_rejects_unsupported_extension_before_decoding() {
        let result = load_from_image(b"not an image", "terrain.bmp", &TerrainLimits::default());
        assert!(matches!(result, Err(SitingError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_configured_extensions_match_any_case() {
        let limits = TerrainLimits {
            supported_extensions: vec![".PNG".to_string()],
            ..TerrainLimits::default()
        };
        assert!(has_supported_extension("rim.png", &limits));
        assert!(has_supported_extension("rim.Png", &limits));
        assert!(load_from_image(&gradient_png(12, 12), "rim.png", &limits).is_ok());
    }

    #[test]
    fn test_rejects_oversized_payload() {
        let limits = TerrainLimits {
            max_payload_bytes: 8,
            ..TerrainLimits::default()
        };
        let result = load_from_image(&[0u8; 9], "terrain.png", &limits);
        assert!(matches!(
            result,
            Err(SitingError::PayloadTooLarge { size: 9, max: 8 })
        ));
    }

    #[test]
    fn test_undecodable_bytes() {
        let result = load_from_image(b"garbage", "terrain.jpg", &TerrainLimits::default());
        assert!(matches!(result, Err(SitingError::Decode(_))));
    }

    #[test]
    fn test_small_and_flat_images_rejected() {
        let limits = TerrainLimits::default();
        let small = load_from_image(&gradient_png(9, 30), "a.png", &limits);
        assert!(matches!(small, Err(SitingError::TooSmall { .. })));

        let flat = encode(DynamicImage::ImageLuma8(GrayImage::from_pixel(
            32,
            32,
            Luma([128]),
        )));
        let flat = load_from_image(&flat, "b.png", &limits);
        assert!(matches!(flat, Err(SitingError::Degenerate { .. })));
    }

    #[test]
    fn test_upload_view() {
        let field = load_from_image(&gradient_png(10, 10), "a.tiff", &TerrainLimits::default())
            .unwrap();
        let upload = TerrainUpload::from(&field);
        assert_eq!(upload.height_map.len(), 10);
        assert_eq!(upload.height_map[1][0], 1.0);
        assert_eq!(upload.statistics.max_height, 18.0);

        let json = serde_json::to_value(&upload).unwrap();
        assert_eq!(json["dimensions"]["width"], 10);
    }
}
