use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Service error taxonomy, mapped onto HTTP statuses at the router boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required field is missing or malformed. Checked before any store access.
    #[error("{0}")]
    Validation(String),

    /// No matching row. Includes the empty-pool outcome of the allocator.
    #[error("{0}")]
    NotFound(&'static str),

    /// A compare-and-set race that survived the internal retry budget.
    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            // Conflicts are retried internally; one reaching the caller means
            // the retry budget is exhausted, which surfaces as a store failure.
            ApiError::Conflict(_) | ApiError::Store(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
