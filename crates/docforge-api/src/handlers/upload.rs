//! Batch upload endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use docforge_core::models::{Document, StorageLocation};
use docforge_processing::{decode_batch, EncodedUpload};
use docforge_storage::Storage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// One item of the upload batch.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadItemRequest {
    /// Base64 content, bare or with a `data:<mime>;base64,` prefix.
    pub file: String,
    /// Optional declared filename; its extension drives classification.
    /// When absent the content signature supplies one.
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    /// Ids of the created documents, in input order.
    pub documents: Vec<Uuid>,
}

/// Upload a batch of base64-encoded files
///
/// The whole batch is validated before anything is written; any failing
/// item rejects the batch with no documents created.
#[utoipa::path(
    post,
    path = "/upload",
    request_body = Vec<UploadItemRequest>,
    responses(
        (status = 201, description = "All files uploaded", body = UploadResponse),
        (status = 400, description = "Validation failure, no documents created", body = crate::error::ErrorResponse),
        (status = 413, description = "A file exceeds the size limit", body = crate::error::ErrorResponse)
    ),
    tag = "documents"
)]
#[tracing::instrument(skip(state, items), fields(batch_size = items.len()))]
pub async fn upload_documents(
    State(state): State<Arc<AppState>>,
    ValidatedJson(items): ValidatedJson<Vec<UploadItemRequest>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let encoded: Vec<EncodedUpload> = items
        .into_iter()
        .map(|item| EncodedUpload {
            file: item.file,
            filename: item.filename,
        })
        .collect();

    let decoded = decode_batch(
        &encoded,
        &state.config.media_kinds,
        state.config.max_file_size_bytes,
    )?;

    // Write blobs first; record creation is one all-or-nothing bulk insert.
    let mut written_keys: Vec<String> = Vec::with_capacity(decoded.len());
    let mut documents: Vec<Document> = Vec::with_capacity(decoded.len());

    for item in &decoded {
        let id = Uuid::new_v4();
        let filename = format!("{}.{}", id, item.extension);

        let (key, url) = match state.storage.upload(&filename, item.bytes.to_vec()).await {
            Ok(pair) => pair,
            Err(err) => {
                cleanup_blobs(state.storage.as_ref(), &written_keys).await;
                return Err(err.into());
            }
        };
        written_keys.push(key.clone());

        documents.push(Document {
            id,
            media_type: item.kind,
            filename,
            storage: StorageLocation { key, url },
            uploaded_at: Utc::now(),
        });
    }

    let created = match state.store.bulk_create(documents).await {
        Ok(created) => created,
        Err(err) => {
            cleanup_blobs(state.storage.as_ref(), &written_keys).await;
            return Err(err.into());
        }
    };

    tracing::info!(count = created.len(), "Uploaded document batch");

    let response = UploadResponse {
        message: format!("{} document(s) uploaded", created.len()),
        documents: created.iter().map(|d| d.id).collect(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Best-effort removal of blobs written before a mid-batch failure.
pub(crate) async fn cleanup_blobs(storage: &dyn Storage, keys: &[String]) {
    for key in keys {
        if let Err(err) = storage.delete(key).await {
            tracing::warn!(key = %key, error = %err, "Failed to clean up orphaned blob");
        }
    }
}
