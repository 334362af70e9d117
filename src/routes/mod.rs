//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `POST /upload` - image upload (API key required)
//! - `POST /analyze` - analysis result for an uploaded image (API key required)
//! - `GET /health` - liveness probe (no auth)

pub mod analyze;
pub mod health;
pub mod upload;

use axum::{middleware as axum_middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::require_api_key;
use crate::models::AppState;

/// Create the main application router.
///
/// The functional routes sit behind the API-key gate; the health probe stays
/// open so load balancers can reach it without credentials.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let api_router = Router::new()
        .merge(upload::router(state.clone()))
        .merge(analyze::router(state.clone()))
        .layer(axum_middleware::from_fn_with_state(state, require_api_key));

    Router::new()
        .merge(api_router)
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
