//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the analyze handler
//! - Wire up middleware (CORS, request ID, tracing, body limit, panic guard)
//! - Own the shared upstream client
//! - Bind server to listener and shut down gracefully

use axum::{
    http::{HeaderValue, Method},
    routing::post,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::config::{AnalyzerConfig, CorsConfig};
use crate::http::analyze::analyze;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::panic_response;
use crate::lifecycle::ShutdownSignal;
use crate::upstream::UpstreamClient;

/// Errors raised while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
///
/// Holds no per-request data; cloning shares the client's connection pool.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// HTTP server for the analyzer.
pub struct HttpServer {
    router: Router,
    config: AnalyzerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AnalyzerConfig) -> Result<Self, ServerError> {
        let state = AppState {
            upstream: UpstreamClient::new(&config.upstream)?,
        };

        let routes = Router::new()
            .route("/analyze", post(analyze))
            .with_state(state);
        let router = apply_layers(routes, &config);

        Ok(Self { router, config })
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            allowed_origins = ?self.config.cors.allowed_origins,
            upstream_timeout_secs = self.config.upstream.timeout_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Wrap routes in the middleware stack. Listed outermost first.
///
/// CORS sits in its own outer `layer` call: `Cors` needs a `Default`
/// response body, which the traced and limited bodies do not provide.
pub(crate) fn apply_layers(routes: Router, config: &AnalyzerConfig) -> Router {
    routes
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                .layer(CatchPanicLayer::custom(panic_response)),
        )
        .layer(cors_layer(&config.cors))
}

/// Build the CORS policy.
///
/// Request headers are mirrored instead of using `*`, which browsers refuse
/// together with credentials.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials)
}
