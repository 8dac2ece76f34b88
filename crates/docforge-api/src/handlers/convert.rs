//! PDF-to-image conversion endpoint.
//!
//! Every page of the source PDF is rasterized; one new Image document is
//! created per page, in page order, all-or-nothing.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use docforge_core::models::{Document, DocumentResponse, MediaKind, StorageLocation};
use docforge_core::AppError;
use docforge_processing::PdfRasterizer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConvertRequest {
    /// Source PDF document id.
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConvertResponse {
    /// One created image document per page, in page order.
    pub images: Vec<DocumentResponse>,
}

/// Rasterize every page of a PDF into new image documents
#[utoipa::path(
    post,
    path = "/convert-pdf-to-image",
    request_body = ConvertRequest,
    responses(
        (status = 201, description = "One image document created per page", body = ConvertResponse),
        (status = 400, description = "Unparsable source PDF or page render failure", body = crate::error::ErrorResponse),
        (status = 404, description = "No PDF with this id", body = crate::error::ErrorResponse)
    ),
    tag = "transforms"
)]
#[tracing::instrument(skip(state, request), fields(id = %request.id))]
pub async fn convert_pdf_to_images(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ConvertRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let source = state
        .store
        .get(request.id, MediaKind::Pdf)
        .await?
        .ok_or_else(|| AppError::NotFound("PDF not found".to_string()))?;

    let bytes = state.storage.download(source.storage_key()).await?;

    let rasterizer = PdfRasterizer::new(state.config.raster_dpi, state.config.raster_format);
    // pdfium is a blocking C library; keep it off the async runtime.
    let pages = tokio::task::spawn_blocking(move || rasterizer.rasterize_all(&bytes))
        .await
        .map_err(|e| AppError::Internal(format!("rasterization task failed: {}", e)))??;

    let mut written_keys: Vec<String> = Vec::with_capacity(pages.len());
    let mut documents: Vec<Document> = Vec::with_capacity(pages.len());

    for page in &pages {
        let id = Uuid::new_v4();
        let filename = format!("{}.{}", id, page.extension);

        let (key, url) = match state.storage.upload(&filename, page.bytes.to_vec()).await {
            Ok(pair) => pair,
            Err(err) => {
                super::upload::cleanup_blobs(state.storage.as_ref(), &written_keys).await;
                return Err(err.into());
            }
        };
        written_keys.push(key.clone());

        documents.push(Document {
            id,
            media_type: MediaKind::Image,
            filename,
            storage: StorageLocation { key, url },
            uploaded_at: Utc::now(),
        });
    }

    let created = match state.store.bulk_create(documents).await {
        Ok(created) => created,
        Err(err) => {
            super::upload::cleanup_blobs(state.storage.as_ref(), &written_keys).await;
            return Err(err.into());
        }
    };

    tracing::info!(source = %request.id, pages = created.len(), "Rasterized PDF");

    let response = ConvertResponse {
        images: created.iter().map(DocumentResponse::from).collect(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}
