//! `POST /analyze`: fetch the caller's URL once and report on the response.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};

use crate::analysis::{build_report, AnalyzeRequest};
use crate::http::error::ApiError;
use crate::http::request::RequestIdExt;
use crate::http::response::analysis_response;
use crate::http::server::AppState;
use crate::observability::metrics;

pub async fn analyze(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let start_time = Instant::now();
    let request_id = headers.request_id();

    // Rejected bodies never reach the upstream client.
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let err = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge(rejection.body_text())
            } else {
                ApiError::BadRequest(rejection.body_text())
            };
            tracing::warn!(request_id = %request_id, error = %err, "Rejected analyze request");
            metrics::record_request(err.outcome(), start_time);
            return Err(err);
        }
    };

    tracing::info!(request_id = %request_id, url = %request.url, "Received request to analyze URL");

    match analyze_url(&state, &request.url).await {
        Ok((response, status)) => {
            tracing::info!(
                request_id = %request_id,
                url = %request.url,
                status,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Successfully analyzed URL"
            );
            metrics::record_upstream_status(status);
            metrics::record_request("success", start_time);
            Ok(response)
        }
        Err(err) => {
            match &err {
                ApiError::UpstreamFetch(cause) => tracing::error!(
                    request_id = %request_id,
                    url = %request.url,
                    kind = cause.kind(),
                    error = %cause,
                    "Error fetching URL"
                ),
                other => tracing::error!(
                    request_id = %request_id,
                    url = %request.url,
                    error = ?other,
                    "Unexpected error"
                ),
            }
            metrics::record_request(err.outcome(), start_time);
            Err(err)
        }
    }
}

async fn analyze_url(state: &AppState, url: &str) -> Result<(Response, u16), ApiError> {
    let upstream = state.upstream.fetch(url).await?;
    let status = upstream.status;
    let report = build_report(upstream);
    Ok((analysis_response(&report)?, status))
}
