//! API-key authentication.
//!
//! Every functional endpoint requires the shared secret in the `X-API-Key`
//! header. The rejection is the same for a missing and a wrong key, so a
//! caller cannot probe which of the two it was.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::models::AppState;
use crate::types::{AppError, AppResult};

pub const API_KEY_HEADER: &str = "x-api-key";

pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> AppResult<Response> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(key) if key == state.config.auth.api_key => Ok(next.run(req).await),
        _ => {
            warn!("Request rejected: missing or invalid API key");
            Err(AppError::Unauthorized)
        }
    }
}
