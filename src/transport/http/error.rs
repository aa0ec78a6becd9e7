//! Mapping of failures onto HTTP responses.
//!
//! | Error | Status |
//! |-------|--------|
//! | `NotFound` | 404 |
//! | `Validation`, `InvalidId` | 400 |
//! | `InvalidBody` | 422 |
//! | `Storage` | 500 (details are logged, not returned) |

use crate::app::ServiceError;
use crate::transport::http::types::ApiResponse;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid JSON body: {0}")]
    InvalidBody(String),
    #[error("invalid id {0:?}: expected an integer")]
    InvalidId(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Service(ServiceError::Storage(e)) => {
                error!(error = %e, "storage operation failed");
                ApiResponse::failure("Internal server error", None)
            }
            ApiError::Service(ServiceError::Validation(errors)) => ApiResponse::failure(
                "Validation failed",
                Some(serde_json::json!({ "errors": errors })),
            ),
            other => ApiResponse::failure(other.to_string(), None),
        };
        (status, Json(body)).into_response()
    }
}
