use std::collections::BTreeMap;
use std::fmt;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub http_version: String,
    pub analysis: Analysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub service_name: String,
    pub status_code: u16,
    pub content_length: String,
}

/// Failure talking to the analyzer.
#[derive(Debug)]
pub enum SdkError {
    /// Transport failure or undecodable body.
    Http(reqwest::Error),
    /// The analyzer answered with a non-success status.
    Api { status: StatusCode, detail: String },
}

impl fmt::Display for SdkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdkError::Http(e) => write!(f, "HTTP error: {}", e),
            SdkError::Api { status, detail } => write!(f, "Analyzer returned {}: {}", status, detail),
        }
    }
}

impl std::error::Error for SdkError {}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        SdkError::Http(e)
    }
}

pub struct AnalyzerClient {
    client: Client,
    base_url: String,
}

impl AnalyzerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Ask the analyzer to fetch `url`.
    pub async fn analyze(&self, url: &str) -> Result<AnalysisReport, SdkError> {
        let (status, body) = self
            .post_raw(&serde_json::to_value(AnalyzeRequest { url: url.to_string() })
                .unwrap_or(Value::Null))
            .await?;

        if !status.is_success() {
            let detail = body
                .get("detail")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(SdkError::Api { status, detail });
        }

        serde_json::from_value(body).map_err(|e| SdkError::Api {
            status,
            detail: format!("unexpected response shape: {}", e),
        })
    }

    /// Post an arbitrary JSON body to `/analyze` and return status and JSON reply.
    pub async fn post_raw(&self, body: &Value) -> Result<(StatusCode, Value), SdkError> {
        let resp = self
            .client
            .post(format!("{}/analyze", self.base_url))
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        let json = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok((status, json))
    }
}
