// Error taxonomy shared by handlers and services

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("Invalid file upload: Missing filename or content type.")]
    InvalidUpload,

    #[error("Only JPEG and PNG images are allowed.")]
    InvalidMediaType(String),

    #[error("File size exceeds the 5MB limit.")]
    PayloadTooLarge(usize),

    #[error("Image ID {0} not found.")]
    NotFound(String),

    #[error("Internal server error during file storage.")]
    Storage(#[from] std::io::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::InvalidUpload
            | AppError::InvalidMediaType(_)
            | AppError::PayloadTooLarge(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // The underlying cause stays in the server logs; the client only ever
        // sees the generic message from the Display impl.
        if let AppError::Storage(err) = &self {
            error!(error = %err, "Storage failure");
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
