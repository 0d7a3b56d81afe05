use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Every failure in the request path ends up here, so handlers return `Result<T, AppError>`
/// and clients always see the same `{"error": ..., "code": ...}` body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid method. Choose either 'tfidf' or 'semantic'.")]
    InvalidMethod,

    #[error("Job description for role '{0}' not found.")]
    RoleNotFound(String),

    #[error("Could not extract text from PDF: {0}")]
    Extraction(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidMethod => StatusCode::BAD_REQUEST,
            AppError::RoleNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Embedding(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidMethod => "INVALID_METHOD",
            AppError::RoleNotFound(_) => "ROLE_NOT_FOUND",
            AppError::Extraction(_) => "EXTRACTION_FAILED",
            AppError::Embedding(_) => "EMBEDDING_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Embedding(msg) => {
                tracing::error!("Embedding error: {msg}");
                "A semantic scoring error occurred".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            other => {
                tracing::warn!(code = other.code(), "Rejected request: {other}");
                other.to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "code": self.code(),
        }));

        (self.status(), body).into_response()
    }
}
