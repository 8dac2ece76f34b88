//! Image rotation endpoint.
//!
//! Rotation is counter-clockwise with the canvas expanded to the full
//! rotated extent, encoded back in the source format. The source document
//! is never touched; the result is a fresh Image document.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use docforge_core::models::{Document, ImageDetailResponse, MediaKind, StorageLocation};
use docforge_core::AppError;
use docforge_processing::{ImageProcessor, ImageTransformer};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Angle field as received: the original API accepted both a JSON number
/// and a numeric string, so both deserialize here and parse() validates.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AngleParam {
    Number(f64),
    Text(String),
}

impl AngleParam {
    fn parse(&self) -> Result<f64, AppError> {
        let angle = match self {
            AngleParam::Number(n) => *n,
            AngleParam::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| AppError::InvalidAngle(s.clone()))?,
        };
        if !angle.is_finite() {
            return Err(AppError::InvalidAngle(angle.to_string()));
        }
        Ok(angle)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RotateRequest {
    /// Source image document id.
    pub id: Uuid,
    /// Degrees counter-clockwise; number or numeric string.
    #[schema(value_type = f64)]
    pub rotation_angle: AngleParam,
}

/// Rotate an image into a new document
#[utoipa::path(
    post,
    path = "/rotate",
    request_body = RotateRequest,
    responses(
        (status = 201, description = "Rotated image created", body = ImageDetailResponse),
        (status = 400, description = "Invalid angle or undecodable source", body = crate::error::ErrorResponse),
        (status = 404, description = "No image with this id", body = crate::error::ErrorResponse)
    ),
    tag = "transforms"
)]
#[tracing::instrument(skip(state, request), fields(id = %request.id))]
pub async fn rotate_image(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RotateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let source = state
        .store
        .get(request.id, MediaKind::Image)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    let angle = request.rotation_angle.parse()?;

    let bytes = state.storage.download(source.storage_key()).await?;

    // CPU-bound decode/warp/encode runs off the async runtime.
    let rotated = tokio::task::spawn_blocking(move || ImageTransformer::rotate(&bytes, angle))
        .await
        .map_err(|e| AppError::Internal(format!("rotation task failed: {}", e)))??;

    let id = Uuid::new_v4();
    let filename = format!("{}.{}", id, rotated.extension);
    let (key, url) = state
        .storage
        .upload(&filename, rotated.bytes.to_vec())
        .await?;

    let document = Document {
        id,
        media_type: MediaKind::Image,
        filename,
        storage: StorageLocation {
            key: key.clone(),
            url,
        },
        uploaded_at: Utc::now(),
    };

    let created = match state.store.create(document).await {
        Ok(created) => created,
        Err(err) => {
            super::upload::cleanup_blobs(state.storage.as_ref(), &[key]).await;
            return Err(err.into());
        }
    };

    let metadata = ImageProcessor::extract_metadata(&rotated.bytes)?;
    tracing::info!(
        source = %request.id,
        rotated = %created.id,
        angle,
        width = metadata.width,
        height = metadata.height,
        "Rotated image"
    );

    Ok((
        StatusCode::CREATED,
        Json(ImageDetailResponse::new(
            &created,
            metadata.width,
            metadata.height,
            metadata.channels,
        )),
    ))
}
