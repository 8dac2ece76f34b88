//! PDF rasterisation: render every page to an encoded image via pdfium.
//!
//! pdfium wraps a C++ library with thread-local state and is not safe to
//! call from async contexts; callers run [`PdfRasterizer::rasterize_all`]
//! inside `tokio::task::spawn_blocking`. Rendering is all-or-nothing: any
//! page failure fails the whole operation with no partial output.

use bytes::Bytes;
use docforge_core::config::RasterFormat;
use docforge_core::error::AppError;
use image::{DynamicImage, GenericImageView, ImageFormat};
use pdfium_render::prelude::*;
use std::io::Cursor;

/// One rendered page, already encoded in the configured raster format.
#[derive(Debug, Clone)]
pub struct RasterizedPage {
    pub bytes: Bytes,
    pub extension: &'static str,
}

/// Renders PDF pages at a fixed resolution.
///
/// Default configuration is 300 DPI JPEG output (see `Config`); both knobs
/// are constant for the lifetime of the service so repeated conversions of
/// the same document are deterministic.
pub struct PdfRasterizer {
    dpi: u32,
    format: RasterFormat,
}

impl PdfRasterizer {
    pub fn new(dpi: u32, format: RasterFormat) -> Self {
        PdfRasterizer { dpi, format }
    }

    /// Render every page of `data` in page order.
    pub fn rasterize_all(&self, data: &[u8]) -> Result<Vec<RasterizedPage>, AppError> {
        let pdfium = bind_pdfium()?;

        let document = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| AppError::CorruptPdf(format!("{:?}", e)))?;

        let pages = document.pages();
        let mut rendered = Vec::with_capacity(pages.len() as usize);

        // PDF points are 1/72 inch; scale the declared page width to DPI.
        let scale = self.dpi as f32 / 72.0;

        for (index, page) in pages.iter().enumerate() {
            let target_width = (page.width().value * scale).round().max(1.0) as i32;
            let render_config = PdfRenderConfig::new().set_target_width(target_width);

            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                AppError::Render(format!("page {}: {:?}", index + 1, e))
            })?;

            let image = bitmap.as_image();
            tracing::debug!(
                page = index + 1,
                width = image.width(),
                height = image.height(),
                "Rendered PDF page"
            );

            rendered.push(self.encode(image, index)?);
        }

        Ok(rendered)
    }

    fn encode(&self, image: DynamicImage, index: usize) -> Result<RasterizedPage, AppError> {
        let (output, format) = match self.format {
            // pdfium bitmaps carry alpha; JPEG cannot.
            RasterFormat::Jpeg => (DynamicImage::ImageRgb8(image.to_rgb8()), ImageFormat::Jpeg),
            RasterFormat::Png => (image, ImageFormat::Png),
        };

        let mut buffer = Vec::new();
        output
            .write_to(&mut Cursor::new(&mut buffer), format)
            .map_err(|e| AppError::Render(format!("page {}: encode failed: {}", index + 1, e)))?;

        Ok(RasterizedPage {
            bytes: Bytes::from(buffer),
            extension: self.format.extension(),
        })
    }
}

/// Bind to a pdfium library next to the executable, or the system one.
fn bind_pdfium() -> Result<Pdfium, AppError> {
    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| AppError::Internal(format!("pdfium library unavailable: {}", e)))
}

/// Whether a pdfium library can be bound in this environment. Used by tests
/// to skip rasterization cases on hosts without the native library.
pub fn pdfium_available() -> bool {
    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::processor::tests::pdf_with_pages;

    #[test]
    fn test_rasterize_two_pages_in_order() {
        if !pdfium_available() {
            println!("SKIP — no pdfium library on this host");
            return;
        }

        let data = pdf_with_pages(&[(596, 842), (596, 842)]);
        let rasterizer = PdfRasterizer::new(300, RasterFormat::Jpeg);
        let pages = rasterizer.rasterize_all(&data).unwrap();

        assert_eq!(pages.len(), 2);
        for page in &pages {
            assert_eq!(page.extension, "jpg");
            let img = image::load_from_memory(&page.bytes).unwrap();
            // 596pt at 300 DPI ≈ 2483px wide.
            assert_eq!(img.width(), 2483);
        }
    }

    #[test]
    fn test_garbage_bytes_fail_before_rendering() {
        if !pdfium_available() {
            println!("SKIP — no pdfium library on this host");
            return;
        }

        let rasterizer = PdfRasterizer::new(300, RasterFormat::Jpeg);
        let err = rasterizer.rasterize_all(b"not a pdf").unwrap_err();
        assert!(matches!(err, AppError::CorruptPdf(_)));
    }
}
