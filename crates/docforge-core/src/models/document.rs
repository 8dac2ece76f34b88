use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::media::MediaKind;

/// Reference to the canonical byte content of a document.
///
/// The key addresses the bytes inside the storage backend; the url is the
/// client-retrievable location. Content is write-once: transforms create
/// new locations, never overwrite existing ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageLocation {
    pub key: String,
    pub url: String,
}

/// The sole persistent entity: one uploaded or derived file.
///
/// Derived metadata (dimensions, page count, page boxes) is never stored
/// here; it is recomputed from the stored bytes on every detail read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub media_type: MediaKind,
    pub filename: String,
    pub storage: StorageLocation,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    pub fn storage_key(&self) -> &str {
        &self.storage.key
    }

    pub fn storage_url(&self) -> &str {
        &self.storage.url
    }
}

/// Base list/upload view of a document.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub media_type: MediaKind,
    pub location: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&Document> for DocumentResponse {
    fn from(doc: &Document) -> Self {
        DocumentResponse {
            id: doc.id,
            media_type: doc.media_type,
            location: doc.storage.url.clone(),
            uploaded_at: doc.uploaded_at,
        }
    }
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        DocumentResponse::from(&doc)
    }
}

/// Detail view of an image document, enriched at read time.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImageDetailResponse {
    pub id: Uuid,
    pub location: String,
    pub media_type: MediaKind,
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub uploaded_at: DateTime<Utc>,
}

impl ImageDetailResponse {
    pub fn new(doc: &Document, width: u32, height: u32, channels: u8) -> Self {
        ImageDetailResponse {
            id: doc.id,
            location: doc.storage.url.clone(),
            media_type: doc.media_type,
            width,
            height,
            channels,
            uploaded_at: doc.uploaded_at,
        }
    }
}

/// Declared media box of a single PDF page, in PDF points (no unit conversion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
}

/// Detail view of a PDF document, enriched at read time.
///
/// `page_dimensions` carries one entry per page in page order; an earlier
/// revision exposed only the first page's box, the all-pages form is
/// canonical.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PdfDetailResponse {
    pub id: Uuid,
    pub location: String,
    pub num_pages: usize,
    pub page_dimensions: Vec<PageDimensions>,
    pub uploaded_at: DateTime<Utc>,
}

impl PdfDetailResponse {
    pub fn new(doc: &Document, num_pages: usize, page_dimensions: Vec<PageDimensions>) -> Self {
        PdfDetailResponse {
            id: doc.id,
            location: doc.storage.url.clone(),
            num_pages,
            page_dimensions,
            uploaded_at: doc.uploaded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_document(kind: MediaKind) -> Document {
        Document {
            id: Uuid::new_v4(),
            media_type: kind,
            filename: "abc.png".to_string(),
            storage: StorageLocation {
                key: "documents/abc.png".to_string(),
                url: "http://localhost:3000/media/documents/abc.png".to_string(),
            },
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_document_response_from_document() {
        let doc = test_document(MediaKind::Image);
        let response = DocumentResponse::from(&doc);
        assert_eq!(response.id, doc.id);
        assert_eq!(response.media_type, MediaKind::Image);
        assert_eq!(response.location, doc.storage.url);
        assert_eq!(response.uploaded_at, doc.uploaded_at);
    }

    #[test]
    fn test_image_detail_response() {
        let doc = test_document(MediaKind::Image);
        let response = ImageDetailResponse::new(&doc, 800, 400, 3);
        assert_eq!(response.width, 800);
        assert_eq!(response.height, 400);
        assert_eq!(response.channels, 3);
        assert_eq!(response.location, doc.storage.url);
    }

    #[test]
    fn test_pdf_detail_response_keeps_page_order() {
        let doc = test_document(MediaKind::Pdf);
        let dims = vec![
            PageDimensions {
                width: 596.0,
                height: 842.0,
            },
            PageDimensions {
                width: 421.0,
                height: 596.0,
            },
        ];
        let response = PdfDetailResponse::new(&doc, 2, dims.clone());
        assert_eq!(response.num_pages, 2);
        assert_eq!(response.page_dimensions, dims);
    }
}
