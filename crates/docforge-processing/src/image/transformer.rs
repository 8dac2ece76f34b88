//! Image transformer - rotation producing new document bytes.
//!
//! Positive angles rotate counter-clockwise. The output canvas always
//! expands to the full rotated extent, so corners of a rotated rectangle
//! stay visible and output dimensions generally differ from the input for
//! non-multiple-of-90 angles. The result is re-encoded in the source
//! image's own format.

use bytes::Bytes;
use docforge_core::error::AppError;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use std::io::Cursor;

/// Rotated image bytes plus the extension matching their encoding.
#[derive(Debug, Clone)]
pub struct RotatedImage {
    pub bytes: Bytes,
    pub extension: &'static str,
}

pub struct ImageTransformer;

impl ImageTransformer {
    /// Rotate an encoded image by `angle_degrees` counter-clockwise,
    /// expanding the canvas, and re-encode it in its source format.
    pub fn rotate(data: &[u8], angle_degrees: f64) -> Result<RotatedImage, AppError> {
        let format =
            image::guess_format(data).map_err(|e| AppError::CorruptImage(e.to_string()))?;
        let img = image::load_from_memory_with_format(data, format)
            .map_err(|e| AppError::CorruptImage(e.to_string()))?;

        let rotated = rotate_expanded(&img, angle_degrees);
        let output = prepare_for_encoding(rotated, format);

        let (width, height) = (output.width(), output.height());
        let estimated_size = (width * height * 3) as usize;
        let mut buffer = Vec::with_capacity(estimated_size);
        output
            .write_to(&mut Cursor::new(&mut buffer), format)
            .map_err(|e| AppError::Internal(format!("Image encode failed: {}", e)))?;

        let extension = format.extensions_str().first().copied().unwrap_or("png");

        tracing::debug!(
            angle = angle_degrees,
            width,
            height,
            format = ?format,
            "Rotated image"
        );

        Ok(RotatedImage {
            bytes: Bytes::from(buffer),
            extension,
        })
    }
}

/// Rotate counter-clockwise with the canvas expanded to the rotated extent.
fn rotate_expanded(img: &DynamicImage, angle_degrees: f64) -> DynamicImage {
    let normalized = angle_degrees.rem_euclid(360.0);

    // Exact quarter turns keep pixel fidelity; no resampling involved.
    // image's rotate90/180/270 turn clockwise, so counter-clockwise flips them.
    if normalized == 0.0 {
        return img.clone();
    }
    if normalized == 90.0 {
        return img.rotate270();
    }
    if normalized == 180.0 {
        return img.rotate180();
    }
    if normalized == 270.0 {
        return img.rotate90();
    }

    let theta = normalized.to_radians() as f32;
    let (w, h) = (img.width() as f32, img.height() as f32);
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let out_w = (w * cos + h * sin).round().max(1.0) as u32;
    let out_h = (w * sin + h * cos).round().max(1.0) as u32;

    // Map source center to output center. imageproc's projection turns
    // clockwise in image coordinates (y grows downward), hence -theta.
    let projection = Projection::translate(out_w as f32 / 2.0, out_h as f32 / 2.0)
        * Projection::rotate(-theta)
        * Projection::translate(-w / 2.0, -h / 2.0);

    // Warp per source layout so the channel count survives the transform.
    match img {
        DynamicImage::ImageLuma8(buf) => {
            let mut canvas = ImageBuffer::from_pixel(out_w, out_h, image::Luma([0u8]));
            warp_into(
                buf,
                &projection,
                Interpolation::Bilinear,
                image::Luma([0u8]),
                &mut canvas,
            );
            DynamicImage::ImageLuma8(canvas)
        }
        DynamicImage::ImageLumaA8(buf) => {
            let mut canvas = ImageBuffer::from_pixel(out_w, out_h, image::LumaA([0u8, 0]));
            warp_into(
                buf,
                &projection,
                Interpolation::Bilinear,
                image::LumaA([0u8, 0]),
                &mut canvas,
            );
            DynamicImage::ImageLumaA8(canvas)
        }
        DynamicImage::ImageRgb8(buf) => {
            let mut canvas = ImageBuffer::from_pixel(out_w, out_h, image::Rgb([0u8, 0, 0]));
            warp_into(
                buf,
                &projection,
                Interpolation::Bilinear,
                image::Rgb([0u8, 0, 0]),
                &mut canvas,
            );
            DynamicImage::ImageRgb8(canvas)
        }
        DynamicImage::ImageRgba8(buf) => {
            let mut canvas = ImageBuffer::from_pixel(out_w, out_h, image::Rgba([0u8, 0, 0, 0]));
            warp_into(
                buf,
                &projection,
                Interpolation::Bilinear,
                image::Rgba([0u8, 0, 0, 0]),
                &mut canvas,
            );
            DynamicImage::ImageRgba8(canvas)
        }
        other => {
            let buf = other.to_rgba8();
            let mut canvas = ImageBuffer::from_pixel(out_w, out_h, image::Rgba([0u8, 0, 0, 0]));
            warp_into(
                &buf,
                &projection,
                Interpolation::Bilinear,
                image::Rgba([0u8, 0, 0, 0]),
                &mut canvas,
            );
            DynamicImage::ImageRgba8(canvas)
        }
    }
}

/// JPEG has no alpha channel; everything else round-trips as-is.
fn prepare_for_encoding(img: DynamicImage, format: ImageFormat) -> DynamicImage {
    if format == ImageFormat::Jpeg && img.color().has_alpha() {
        DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    }
}
