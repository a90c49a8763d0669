//! Tracing subscriber setup
//!
//! The SDK only emits `tracing` events. Applications that want them printed
//! can call [`init_tracing`] once at startup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogConfig;
use crate::SdkError;

/// Install a global subscriber
///
/// `RUST_LOG` takes precedence over `config.level`. Fails if the level is
/// not a valid filter or a global subscriber is already set.
pub fn init_tracing(config: &LogConfig) -> Result<(), SdkError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| SdkError::Config(format!("invalid log level {:?}: {}", config.level, e)))?,
    };

    let json = config.json.then(|| fmt::layer().json());
    let text = (!config.json).then(fmt::layer);

    tracing_subscriber::registry()
        .with(json)
        .with(text)
        .with(filter)
        .try_init()
        .map_err(|e| SdkError::Config(e.to_string()))
}
