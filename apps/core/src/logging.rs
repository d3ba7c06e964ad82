//! Tracing subscriber setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::WellnessConfig;

/// Installs the global subscriber. `RUST_LOG` wins over the `info` default.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init(config: &WellnessConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if config.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(json = config.json_logs, "logging initialized");
    }
}
