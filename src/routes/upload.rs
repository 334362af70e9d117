use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::{error, info};

use crate::models::{AppState, UploadResponse};
use crate::storage::MAX_FILE_SIZE;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload_image))
        // The multipart body needs headroom above the stored-file limit so
        // the storage layer's own size check is the one that decides.
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024))
        .with_state(state)
}

/// Entry point for user uploads; stores the image and returns its image_id.
async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|err| {
            error!(error = %err, "Malformed multipart upload");
            AppError::InvalidUpload
        })?
        .ok_or_else(|| {
            error!("Upload attempt with no file part");
            AppError::InvalidUpload
        })?;

    // Guard against clients sending a part without a filename or a declared
    // content type; both are required for validation downstream.
    let filename = field.file_name().map(str::to_owned).ok_or_else(|| {
        error!("Upload attempt with missing filename");
        AppError::InvalidUpload
    })?;
    let content_type = field.content_type().map(str::to_owned).ok_or_else(|| {
        error!("Upload attempt with missing content type");
        AppError::InvalidUpload
    })?;

    let content = field.bytes().await.map_err(|err| {
        error!(error = %err, "Failed to read upload body");
        AppError::InvalidUpload
    })?;

    info!(filename = %filename, size = content.len(), "File upload request received");

    let image_id = state.store.save(&content, &filename, &content_type).await?;

    Ok(Json(UploadResponse { image_id }))
}
