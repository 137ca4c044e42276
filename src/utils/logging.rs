//! # Logging
//!
//! Installs a `tracing-subscriber` fmt subscriber from [`LoggingConfig`].
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{CodecError, Result};

/// Initialize global logging.
///
/// Fails with [`CodecError::ConfigError`] if a global subscriber is already
/// installed; callers that may race with another initializer can ignore it.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.to_string().to_lowercase()))
        .map_err(|e| CodecError::ConfigError(format!("Invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.json_format {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };
    installed
        .map_err(|e| CodecError::ConfigError(format!("Failed to install subscriber: {e}")))?;

    tracing::info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        let config = LoggingConfig::default();
        let first = init_logging(&config);
        let second = init_logging(&config);
        // Another test may have installed a subscriber first; either way the
        // second call in this test cannot succeed.
        let _ = first;
        assert!(matches!(second, Err(CodecError::ConfigError(_))));
    }
}
