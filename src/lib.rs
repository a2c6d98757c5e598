//! HTTP response analyzer library.
//!
//! Fetches a caller-supplied URL and reports its headers, body, protocol
//! version, and a small derived analysis through `POST /analyze`.

pub mod analysis;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use analysis::{AnalyzeRequest, AnalyzeResult};
pub use config::AnalyzerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
