//! Tracing subscriber setup.
//!
//! Library code only emits `tracing` events; embedding applications call
//! [`init`] once to print them. `RUST_LOG` wins over the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Builds the env filter for `config`, preferring `RUST_LOG` when set.
#[must_use]
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Installs a global subscriber with a text or JSON fmt layer.
///
/// # Errors
///
/// Returns [`Error::Config`] if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let installed = if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.map_err(|e| Error::Config(format!("logging already initialized: {e}")))
}
