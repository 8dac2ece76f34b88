pub mod processor;
pub mod transformer;

pub use processor::{ImageMetadata, ImageProcessor};
pub use transformer::{ImageTransformer, RotatedImage};
