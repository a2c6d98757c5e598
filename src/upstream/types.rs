//! Upstream response and error definitions.

use std::error::Error as StdError;

use axum::http::{HeaderMap, Version};
use thiserror::Error;

/// A fully read upstream response. Lives for one request only.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub version: Version,
    /// Headers exactly as received (lower-cased names, repeated lines kept).
    pub headers: HeaderMap,
    /// Body decoded with the declared charset, UTF-8 otherwise.
    pub body: String,
}

impl UpstreamResponse {
    /// Protocol label as reported to callers, e.g. `HTTP/1.1` or `HTTP/2`.
    pub fn http_version(&self) -> String {
        version_label(self.version)
    }
}

/// Render a protocol version the way the analysis report expects it.
pub fn version_label(version: Version) -> String {
    match version {
        Version::HTTP_09 => "HTTP/0.9".to_string(),
        Version::HTTP_10 => "HTTP/1.0".to_string(),
        Version::HTTP_11 => "HTTP/1.1".to_string(),
        Version::HTTP_2 => "HTTP/2".to_string(),
        Version::HTTP_3 => "HTTP/3".to_string(),
        other => format!("{other:?}"),
    }
}

/// Failure reaching or reading from the target URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The caller-supplied URL could not be used.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The whole fetch exceeded its time budget.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// DNS, TCP, or TLS failure before any response arrived.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Malformed response or other transport failure.
    #[error("request failed: {0}")]
    Request(String),

    /// The response started but its body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

impl FetchError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl { .. } => "invalid_url",
            FetchError::Timeout(_) => "timeout",
            FetchError::Connect(_) => "connect",
            FetchError::Request(_) => "request",
            FetchError::Body(_) => "body",
        }
    }
}

/// Flatten an error and its sources into one line.
///
/// `reqwest::Error`'s own `Display` omits the cause ("error sending request
/// for url (...)"), which is the part callers actually need.
pub fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }
    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer(&'static str, Option<Box<Layer>>);

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.1.as_deref().map(|l| l as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn test_version_labels() {
        assert_eq!(version_label(Version::HTTP_09), "HTTP/0.9");
        assert_eq!(version_label(Version::HTTP_10), "HTTP/1.0");
        assert_eq!(version_label(Version::HTTP_11), "HTTP/1.1");
        assert_eq!(version_label(Version::HTTP_2), "HTTP/2");
        assert_eq!(version_label(Version::HTTP_3), "HTTP/3");
    }

    #[test]
    fn test_describe_error_walks_sources() {
        let err = Layer(
            "error sending request",
            Some(Box::new(Layer(
                "client error (Connect)",
                Some(Box::new(Layer("Connection refused (os error 111)", None))),
            ))),
        );
        assert_eq!(
            describe_error(&err),
            "error sending request: client error (Connect): Connection refused (os error 111)"
        );
    }

    #[test]
    fn test_describe_error_skips_repeated_text() {
        let err = Layer("io: broken pipe", Some(Box::new(Layer("broken pipe", None))));
        assert_eq!(describe_error(&err), "io: broken pipe");
    }

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(
            FetchError::Timeout(10).to_string(),
            "request timed out after 10s"
        );
        let err = FetchError::InvalidUrl {
            url: "nope".into(),
            reason: "relative URL without a base".into(),
        };
        assert_eq!(err.to_string(), "invalid URL 'nope': relative URL without a base");
        assert_eq!(err.kind(), "invalid_url");
    }
}
