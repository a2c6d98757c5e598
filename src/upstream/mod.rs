//! Upstream fetch subsystem.
//!
//! # Data Flow
//! ```text
//! caller-supplied URL
//!     → client.rs (parse, one GET with a total timeout, read body)
//!     → UpstreamResponse | FetchError (types.rs)
//! ```
//!
//! # Design Decisions
//! - Exactly one attempt per inbound request; no retries
//! - Redirects are reported, not followed, unless configured
//! - Timeout errors are distinct from connect and transport errors

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{FetchError, UpstreamResponse};
