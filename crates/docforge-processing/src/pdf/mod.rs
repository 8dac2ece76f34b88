pub mod processor;
pub mod rasterizer;

pub use processor::{PdfMetadata, PdfProcessor};
pub use rasterizer::{pdfium_available, PdfRasterizer, RasterizedPage};
