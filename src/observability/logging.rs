//! Structured logging.
//!
//! The subscriber is installed exactly once, by the binary, before the
//! server is built. Library code only emits `tracing` events.

use tracing_subscriber::{
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::config::ObservabilityConfig;

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(log_level: &str) -> String {
    format!("http_analyzer={log_level},tower_http={log_level}")
}

/// Install the process-wide subscriber.
///
/// `RUST_LOG` wins over `observability.log_level`. Fails if a subscriber
/// is already installed.
pub fn init(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
