//! API error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::http::response::{ErrorBody, INTERNAL_ERROR_DETAIL};
use crate::upstream::FetchError;

/// Errors surfaced to `/analyze` callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not an `AnalyzeRequest`.
    #[error("{0}")]
    BadRequest(String),

    /// The request body exceeded `security.max_body_size`.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The target URL could not be fetched.
    #[error("Error fetching URL: {0}")]
    UpstreamFetch(#[from] FetchError),

    /// Anything else. The payload is for logs only.
    #[error("{}", INTERNAL_ERROR_DETAIL)]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UpstreamFetch(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metrics label.
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) | ApiError::PayloadTooLarge(_) => "bad_request",
            ApiError::UpstreamFetch(_) => "fetch_error",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
