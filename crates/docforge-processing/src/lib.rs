//! Media processing for docforge.
//!
//! The ingestion side: base64 decoding, content sniffing, and kind
//! classification. The read/transform side: image metadata and rotation,
//! PDF metadata and page rasterization.

pub mod classifier;
pub mod image;
pub mod ingest;
pub mod pdf;
pub mod sniff;

pub use classifier::classify;
pub use image::{ImageMetadata, ImageProcessor, ImageTransformer, RotatedImage};
pub use ingest::{decode_batch, DecodedUpload, EncodedUpload};
pub use pdf::{pdfium_available, PdfMetadata, PdfProcessor, PdfRasterizer, RasterizedPage};
