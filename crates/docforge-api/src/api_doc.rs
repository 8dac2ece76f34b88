//! OpenAPI documentation definition

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers::convert::{ConvertRequest, ConvertResponse};
use crate::handlers::rotate::RotateRequest;
use crate::handlers::upload::{UploadItemRequest, UploadResponse};
use docforge_core::models::{
    DocumentResponse, ImageDetailResponse, MediaKind, PageDimensions, PdfDetailResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::upload::upload_documents,
        crate::handlers::media_get::list_images,
        crate::handlers::media_get::list_pdfs,
        crate::handlers::media_get::get_image,
        crate::handlers::media_get::get_pdf,
        crate::handlers::media_delete::delete_image,
        crate::handlers::media_delete::delete_pdf,
        crate::handlers::rotate::rotate_image,
        crate::handlers::convert::convert_pdf_to_images,
        crate::handlers::health::health_check,
    ),
    components(schemas(
        UploadItemRequest,
        UploadResponse,
        RotateRequest,
        ConvertRequest,
        ConvertResponse,
        DocumentResponse,
        ImageDetailResponse,
        PdfDetailResponse,
        PageDimensions,
        MediaKind,
        ErrorResponse,
    )),
    tags(
        (name = "documents", description = "Upload, list, inspect, and delete documents"),
        (name = "transforms", description = "Derive new documents from stored ones"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Docforge API",
        version = "0.1.0",
        description = "Document management API: batch base64 upload, kind-scoped listing and read-time metadata, image rotation, and PDF page rasterization."
    )
)]
pub struct ApiDoc;
