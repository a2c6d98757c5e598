//! Outbound HTTP client.
//!
//! One `reqwest::Client` is built at startup and shared by every request.
//! It is a handle onto a connection pool and carries no per-request state.
//! A fetch that is dropped mid-flight (caller disconnect) or times out
//! closes its connection instead of returning it to the pool.

use std::time::Duration;

use reqwest::redirect::Policy;
use url::Url;

use crate::config::UpstreamConfig;
use crate::upstream::types::{describe_error, FetchError, UpstreamResponse};

/// Performs the single GET behind each analyze request.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl UpstreamClient {
    /// Build the client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let redirect = if config.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(redirect)
            .user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Fetch `url` once and read the whole body.
    ///
    /// The configured timeout spans connect, headers, and body.
    pub async fn fetch(&self, url: &str) -> Result<UpstreamResponse, FetchError> {
        let target = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(target.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", target.scheme()),
            });
        }

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| self.classify(e, false))?;

        let status = response.status().as_u16();
        let version = response.version();
        let headers = response.headers().clone();

        tracing::debug!(url = %url, status, version = ?version, "Upstream responded");

        let body = response.text().await.map_err(|e| self.classify(e, true))?;

        Ok(UpstreamResponse {
            status,
            version,
            headers,
            body,
        })
    }

    /// Configured time budget in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn classify(&self, err: reqwest::Error, reading_body: bool) -> FetchError {
        if err.is_timeout() {
            return FetchError::Timeout(self.timeout_secs);
        }
        let description = describe_error(&err);
        if reading_body || err.is_body() || err.is_decode() {
            FetchError::Body(description)
        } else if err.is_connect() {
            FetchError::Connect(description)
        } else {
            FetchError::Request(description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> UpstreamClient {
        let config = UpstreamConfig {
            use_system_proxy: false,
            ..UpstreamConfig::default()
        };
        UpstreamClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_rejects_unparsable_url_without_network() {
        let err = client().fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() {
        let err = client().fetch("ftp://example.com/file").await.unwrap_err();
        match err {
            FetchError::InvalidUrl { reason, .. } => assert!(reason.contains("ftp")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_connect_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client()
            .fetch(&format!("http://{addr}/"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Connect(_)), "{err:?}");
    }

    #[test]
    fn test_timeout_is_carried() {
        let config = UpstreamConfig {
            timeout_secs: 4,
            ..UpstreamConfig::default()
        };
        assert_eq!(UpstreamClient::new(&config).unwrap().timeout_secs(), 4);
    }
}
