//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, request ID, limits, panic guard)
//!     → analyze.rs (decode body, fetch upstream, build report)
//!     → response.rs (JSON body) | error.rs (status + detail)
//!     → Send to client
//! ```

pub mod analyze;
pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
pub use response::ErrorBody;
pub use server::{AppState, HttpServer, ServerError};
