//! Response analysis.
//!
//! # Data Flow
//! ```text
//! UpstreamResponse
//!     → headers.rs (normalize names, merge repeated lines)
//!     → report.rs (derive service name, status, content length)
//!     → AnalyzeResult (types.rs)
//! ```

pub mod headers;
pub mod report;
pub mod types;

pub use headers::{normalize_header_name, normalize_headers};
pub use report::build_report;
pub use types::{Analysis, AnalyzeRequest, AnalyzeResult};
