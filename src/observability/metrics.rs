//! Metrics collection and exposition.
//!
//! # Metrics
//! - `analyzer_requests_total` (counter): requests by outcome
//! - `analyzer_request_duration_seconds` (histogram): latency by outcome
//! - `analyzer_upstream_status_total` (counter): upstream status codes
//!
//! Outcomes: `success`, `bad_request`, `fetch_error`, `internal_error`.
//! Without an installed exporter every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with its own scrape listener.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Count a finished request and record its latency.
pub fn record_request(outcome: &'static str, start_time: Instant) {
    record_outcome(outcome);
    ::metrics::histogram!("analyzer_request_duration_seconds", "outcome" => outcome)
        .record(start_time.elapsed().as_secs_f64());
}

/// Count a finished request whose start time is unknown (panics).
pub fn record_outcome(outcome: &'static str) {
    ::metrics::counter!("analyzer_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_upstream_status(status: u16) {
    ::metrics::counter!("analyzer_upstream_status_total", "status" => status.to_string())
        .increment(1);
}
