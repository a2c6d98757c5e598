//! Configuration validation.
//!
//! Serde handles syntax; this module checks values that parse but cannot
//! work: unparsable socket addresses, zero budgets, malformed CORS origins.
//! Every problem is reported, not just the first.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::AnalyzerConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("cors origin '{origin}' is invalid: {reason}")]
    InvalidOrigin { origin: String, reason: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AnalyzerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    for origin in &config.cors.allowed_origins {
        if let Err(reason) = check_origin(origin) {
            errors.push(ValidationError::InvalidOrigin {
                origin: origin.clone(),
                reason,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Browsers send `Origin` as `scheme://host[:port]` with nothing after it.
fn check_origin(origin: &str) -> Result<(), String> {
    if origin == "*" {
        return Err("wildcard origins cannot be combined with credentials".to_string());
    }
    if HeaderValue::from_str(origin).is_err() {
        return Err("not a valid header value".to_string());
    }
    let parsed = Url::parse(origin).map_err(|e| e.to_string())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", parsed.scheme()));
    }
    if parsed.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if origin.ends_with('/') || parsed.path() != "/" || parsed.query().is_some() {
        return Err("must not contain a path, query, or trailing slash".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AnalyzerConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AnalyzerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.timeout_secs = 0;
        config.security.max_body_size = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::ZeroBodyLimit));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = AnalyzerConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidMetricsAddress("nope".into())])
        );
    }

    #[test]
    fn test_origin_rules() {
        assert!(check_origin("http://localhost:3000").is_ok());
        assert!(check_origin("https://app.example.com").is_ok());

        assert!(check_origin("*").is_err());
        assert!(check_origin("http://localhost:3000/").is_err());
        assert!(check_origin("https://example.com/app").is_err());
        assert!(check_origin("ftp://example.com").is_err());
        assert!(check_origin("localhost:3000").is_err());
    }
}
