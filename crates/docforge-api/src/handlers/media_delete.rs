//! Hard-delete endpoints.
//!
//! The record is removed first; blob removal is best-effort so a storage
//! hiccup never leaves a dangling record behind. Concurrent deletes of the
//! same id race harmlessly: exactly one caller gets 204, the rest 404.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use docforge_core::models::MediaKind;
use docforge_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Delete an image document
#[utoipa::path(
    delete,
    path = "/images/{id}",
    params(
        ("id" = Uuid, Path, description = "Image document id")
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 404, description = "No image with this id", body = crate::error::ErrorResponse)
    ),
    tag = "documents"
)]
#[tracing::instrument(skip(state))]
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    delete_document(&state, id, MediaKind::Image, "Image not found").await
}

/// Delete a PDF document
#[utoipa::path(
    delete,
    path = "/pdfs/{id}",
    params(
        ("id" = Uuid, Path, description = "PDF document id")
    ),
    responses(
        (status = 204, description = "PDF deleted"),
        (status = 404, description = "No PDF with this id", body = crate::error::ErrorResponse)
    ),
    tag = "documents"
)]
#[tracing::instrument(skip(state))]
pub async fn delete_pdf(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    delete_document(&state, id, MediaKind::Pdf, "PDF not found").await
}

async fn delete_document(
    state: &AppState,
    id: Uuid,
    kind: MediaKind,
    not_found: &str,
) -> Result<StatusCode, HttpAppError> {
    let removed = state
        .store
        .delete(id, kind)
        .await?
        .ok_or_else(|| AppError::NotFound(not_found.to_string()))?;

    if let Err(err) = state.storage.delete(removed.storage_key()).await {
        tracing::warn!(
            id = %id,
            key = removed.storage_key(),
            error = %err,
            "Record deleted but blob removal failed"
        );
    }

    tracing::info!(id = %id, kind = %kind, "Deleted document");
    Ok(StatusCode::NO_CONTENT)
}
