pub mod document;
pub mod media;

pub use document::{
    Document, DocumentResponse, ImageDetailResponse, PageDimensions, PdfDetailResponse,
    StorageLocation,
};
pub use media::MediaKind;
