//! Response bodies.
//!
//! Success is an [`AnalyzeResult`] serialized up front so a serialization
//! failure can still be reported as an internal error. Failures of every
//! kind share the `{ "detail": ... }` shape.

use std::any::Any;

use axum::{
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzeResult;
use crate::http::error::ApiError;
use crate::observability::metrics;

/// Message returned for any failure whose cause must stay server side.
pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

/// Error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Serialize a successful analysis into a 200 response.
pub fn analysis_response(result: &AnalyzeResult) -> Result<axum::response::Response, ApiError> {
    let body = serde_json::to_vec(result)
        .map_err(|e| ApiError::Internal(format!("failed to serialize analysis: {e}")))?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}

/// Response used by the panic guard layer. The panic payload is logged, not returned.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<String> {
    let message = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = %message, "Request handler panicked");
    metrics::record_outcome("internal_error");

    let body = serde_json::json!({ "detail": INTERNAL_ERROR_DETAIL }).to_string();
    let mut response = Response::new(body);
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analysis;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_analysis_response_is_json() {
        let result = AnalyzeResult {
            headers: BTreeMap::from([("Server".to_string(), "nginx".to_string())]),
            body: "ok".into(),
            http_version: "HTTP/1.1".into(),
            analysis: Analysis {
                service_name: "nginx".into(),
                status_code: 200,
                content_length: "N/A".into(),
            },
        };

        let response = analysis_response(&result).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let decoded: AnalyzeResult = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, result);
    }

    #[test]
    fn test_panic_response_hides_payload() {
        let response = panic_response(Box::new("secret database password"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorBody = serde_json::from_str(response.body()).unwrap();
        assert_eq!(body.detail, INTERNAL_ERROR_DETAIL);
    }
}
