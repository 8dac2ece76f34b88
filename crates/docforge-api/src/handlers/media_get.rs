//! List and detail endpoints for images and PDFs.
//!
//! Detail views are enriched at read time from the stored bytes; nothing
//! derived is persisted, so a corrupted blob surfaces on every fetch.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use docforge_core::models::{
    DocumentResponse, ImageDetailResponse, MediaKind, PdfDetailResponse,
};
use docforge_core::AppError;
use docforge_processing::{ImageProcessor, PdfProcessor};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::state::AppState;

/// List all image documents
#[utoipa::path(
    get,
    path = "/images",
    responses(
        (status = 200, description = "All image documents in upload order", body = Vec<DocumentResponse>)
    ),
    tag = "documents"
)]
#[tracing::instrument(skip(state))]
pub async fn list_images(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let documents = state.store.list(MediaKind::Image).await?;
    let response: Vec<DocumentResponse> = documents.iter().map(DocumentResponse::from).collect();
    Ok(Json(response))
}

/// List all PDF documents
#[utoipa::path(
    get,
    path = "/pdfs",
    responses(
        (status = 200, description = "All PDF documents in upload order", body = Vec<DocumentResponse>)
    ),
    tag = "documents"
)]
#[tracing::instrument(skip(state))]
pub async fn list_pdfs(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let documents = state.store.list(MediaKind::Pdf).await?;
    let response: Vec<DocumentResponse> = documents.iter().map(DocumentResponse::from).collect();
    Ok(Json(response))
}

/// Get one image with read-time metadata
#[utoipa::path(
    get,
    path = "/images/{id}",
    params(
        ("id" = Uuid, Path, description = "Image document id")
    ),
    responses(
        (status = 200, description = "Image detail with dimensions and channels", body = ImageDetailResponse),
        (status = 404, description = "No image with this id", body = crate::error::ErrorResponse)
    ),
    tag = "documents"
)]
#[tracing::instrument(skip(state))]
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let document = state
        .store
        .get(id, MediaKind::Image)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    let bytes = state.storage.download(document.storage_key()).await?;
    let metadata = ImageProcessor::extract_metadata(&bytes)?;

    Ok(Json(ImageDetailResponse::new(
        &document,
        metadata.width,
        metadata.height,
        metadata.channels,
    )))
}

/// Get one PDF with read-time metadata
#[utoipa::path(
    get,
    path = "/pdfs/{id}",
    params(
        ("id" = Uuid, Path, description = "PDF document id")
    ),
    responses(
        (status = 200, description = "PDF detail with page count and per-page media boxes", body = PdfDetailResponse),
        (status = 404, description = "No PDF with this id", body = crate::error::ErrorResponse)
    ),
    tag = "documents"
)]
#[tracing::instrument(skip(state))]
pub async fn get_pdf(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let document = state
        .store
        .get(id, MediaKind::Pdf)
        .await?
        .ok_or_else(|| AppError::NotFound("PDF not found".to_string()))?;

    let bytes = state.storage.download(document.storage_key()).await?;
    let metadata = PdfProcessor::extract_metadata(&bytes)?;

    Ok(Json(PdfDetailResponse::new(
        &document,
        metadata.num_pages,
        metadata.page_dimensions,
    )))
}
