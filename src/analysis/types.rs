//! Request and result shapes for `/analyze`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// Successful analysis payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalyzeResult {
    /// Normalized header name → value.
    pub headers: BTreeMap<String, String>,
    pub body: String,
    /// e.g. `HTTP/1.1`.
    pub http_version: String,
    pub analysis: Analysis,
}

/// Values derived from the upstream response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Analysis {
    /// `Server` header, or `"Unknown"`.
    pub service_name: String,
    pub status_code: u16,
    /// `Content-Length` header verbatim, or `"N/A"`. Never parsed.
    pub content_length: String,
}
