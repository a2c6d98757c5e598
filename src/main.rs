//! HTTP Response Analyzer
//!
//! A single-endpoint relay built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client                ┌───────────────────────────────────────────────┐
//!     POST /analyze ───────▶│ http::server  (CORS, request id, trace,       │
//!                           │                body limit, panic guard)       │
//!                           │      │                                        │
//!                           │      ▼                                        │
//!                           │ http::analyze ──▶ upstream::client ───────────┼──▶ Target URL
//!                           │      │                 (one GET, timeout)     │
//!                           │      ▼                                        │
//!     JSON ◀────────────────│ analysis::report (normalize headers, derive)  │
//!                           │                                               │
//!                           │ config · observability · lifecycle            │
//!                           └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use http_analyzer::config::{load_config, AnalyzerConfig};
use http_analyzer::http::HttpServer;
use http_analyzer::lifecycle::{signals, Shutdown};
use http_analyzer::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "http-analyzer")]
#[command(about = "Fetch a URL on request and report on its HTTP response", long_about = None)]
struct Args {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;

    tracing::info!("http-analyzer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        upstream_timeout_secs = config.upstream.timeout_secs,
        follow_redirects = config.upstream.follow_redirects,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
