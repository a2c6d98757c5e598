//! Turns an upstream response into an [`AnalyzeResult`].

use std::collections::BTreeMap;

use crate::analysis::headers::normalize_headers;
use crate::analysis::types::{Analysis, AnalyzeResult};
use crate::upstream::UpstreamResponse;

/// Reported when the upstream sends no `Server` header.
pub const UNKNOWN_SERVICE: &str = "Unknown";

/// Reported when the upstream sends no `Content-Length` header.
pub const CONTENT_LENGTH_UNAVAILABLE: &str = "N/A";

/// Build the report for one upstream response.
pub fn build_report(upstream: UpstreamResponse) -> AnalyzeResult {
    let http_version = upstream.http_version();
    let headers = normalize_headers(&upstream.headers);
    let analysis = derive_analysis(&headers, upstream.status);

    AnalyzeResult {
        headers,
        body: upstream.body,
        http_version,
        analysis,
    }
}

/// Lookups run against normalized names, so upstream casing never matters.
pub fn derive_analysis(headers: &BTreeMap<String, String>, status_code: u16) -> Analysis {
    Analysis {
        service_name: headers
            .get("Server")
            .cloned()
            .unwrap_or_else(|| UNKNOWN_SERVICE.to_string()),
        status_code,
        content_length: headers
            .get("Content-Length")
            .cloned()
            .unwrap_or_else(|| CONTENT_LENGTH_UNAVAILABLE.to_string()),
    }
}
