//! Error types for the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::highlight::HighlightError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Highlight(#[from] HighlightError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Highlight(e) => match e {
                HighlightError::NotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "not_found",
                    format!("Document not found: {}", id),
                ),
                HighlightError::InvalidIdentifier(_) => {
                    (StatusCode::BAD_REQUEST, "bad_request", e.to_string())
                }
                // Page counts only disagree when the two PDF readers do
                HighlightError::Pdf(_) | HighlightError::PageOutOfRange { .. } => {
                    tracing::error!("PDF error: {}", e);
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "pdf_error",
                        "Failed to process PDF".to_string(),
                    )
                }
                HighlightError::Io(_) => {
                    tracing::error!("IO error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "io_error",
                        "IO error".to_string(),
                    )
                }
                HighlightError::Join(_) => {
                    tracing::error!("Worker error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal_error",
                        "An internal error occurred".to_string(),
                    )
                }
            },
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
