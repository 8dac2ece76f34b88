//! Image processor - read-time metadata extraction
//!
//! Enrichment is a pure function of the stored bytes: nothing here is
//! persisted or cached, a detail fetch recomputes it every time.

use docforge_core::error::AppError;
use image::{GenericImageView, ImageReader};
use std::io::Cursor;

/// Derived descriptive fields of an image document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    /// Number of color bands: 1 grayscale, 3 RGB, 4 RGBA.
    pub channels: u8,
}

pub struct ImageProcessor;

impl ImageProcessor {
    pub fn extract_metadata(data: &[u8]) -> Result<ImageMetadata, AppError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| AppError::CorruptImage(e.to_string()))?;
        let img = reader
            .decode()
            .map_err(|e| AppError::CorruptImage(e.to_string()))?;

        let (width, height) = img.dimensions();
        let channels = img.color().channel_count();

        Ok(ImageMetadata {
            width,
            height,
            channels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
    use std::io::Cursor;

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
        buf
    }

    #[test]
    fn test_rgb_png_metadata() {
        let data = encode(
            DynamicImage::ImageRgb8(RgbImage::new(800, 400)),
            ImageFormat::Png,
        );
        let meta = ImageProcessor::extract_metadata(&data).unwrap();
        assert_eq!(meta.width, 800);
        assert_eq!(meta.height, 400);
        assert_eq!(meta.channels, 3);
    }

    #[test]
    fn test_rgba_png_reports_four_channels() {
        let data = encode(
            DynamicImage::ImageRgba8(RgbaImage::new(10, 20)),
            ImageFormat::Png,
        );
        let meta = ImageProcessor::extract_metadata(&data).unwrap();
        assert_eq!(meta.channels, 4);
    }

    #[test]
    fn test_jpeg_metadata() {
        let data = encode(
            DynamicImage::ImageRgb8(RgbImage::new(32, 16)),
            ImageFormat::Jpeg,
        );
        let meta = ImageProcessor::extract_metadata(&data).unwrap();
        assert_eq!((meta.width, meta.height), (32, 16));
        assert_eq!(meta.channels, 3);
    }

    #[test]
    fn test_undecodable_bytes_are_corrupt() {
        let err = ImageProcessor::extract_metadata(b"definitely not an image").unwrap_err();
        assert!(matches!(err, AppError::CorruptImage(_)));
    }

    #[test]
    fn test_enrichment_is_idempotent() {
        let data = encode(
            DynamicImage::ImageRgb8(RgbImage::new(5, 7)),
            ImageFormat::Png,
        );
        let first = ImageProcessor::extract_metadata(&data).unwrap();
        let second = ImageProcessor::extract_metadata(&data).unwrap();
        assert_eq!(first, second);
    }
}
