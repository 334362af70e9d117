use axum::{extract::State, routing::post, Json, Router};
use tracing::{error, info};

use crate::models::{AnalysisRequest, AnalysisResult, AppState};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_image))
        .with_state(state)
}

/// Retrieves analysis results for a previously uploaded image.
async fn analyze_image(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> AppResult<Json<AnalysisResult>> {
    info!(image_id = %request.image_id, "Analysis request received");

    // The id must refer to stored content before analysis runs. Any
    // resolution failure other than a clean miss is also reported as 404 so
    // the caller learns nothing about the storage internals.
    state
        .store
        .resolve(&request.image_id)
        .await
        .map_err(|err| match err {
            AppError::NotFound(_) => err,
            other => {
                error!(error = %other, "Error checking stored file");
                AppError::NotFound(request.image_id.clone())
            }
        })?;

    let result = state.analyzer.analyze(&request.image_id).await;
    info!(
        image_id = %request.image_id,
        skin_type = %result.skin_type,
        confidence = result.confidence,
        "Analysis complete"
    );
    Ok(Json(result))
}
