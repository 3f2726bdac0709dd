//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use order_store::StoreError;
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("{0}")]
    NotFound(String),
    /// Malformed path or body.
    #[error("{0}")]
    BadRequest(String),
    /// The store rejected the supplied order.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Store(StoreError::Order(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(StoreError::IdsExhausted { .. }) => {
                tracing::error!(error = %self, "order id counter exhausted");
                StatusCode::SERVICE_UNAVAILABLE
            }
        };
        tracing::debug!(%status, error = %self, "request rejected");

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {err}"))
    }
}
