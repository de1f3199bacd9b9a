//! Tracing subscriber setup
//!
//! The `NOMINA_LOG` environment variable takes precedence over the configured
//! level and accepts any `EnvFilter` directive (`nomina_herald=debug,warn`).

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::NominaError;

pub const LOG_ENV_VAR: &str = "NOMINA_LOG";

/// Build the filter from `NOMINA_LOG`, falling back to the configured level
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, NominaError> {
    match std::env::var(LOG_ENV_VAR) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .map_err(|e| NominaError::Configuration(format!("Invalid {}: {}", LOG_ENV_VAR, e))),
        _ => EnvFilter::try_new(&config.level).map_err(|e| {
            NominaError::Configuration(format!("Invalid log level '{}': {}", config.level, e))
        }),
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init_logging(config: &LoggingConfig) -> Result<(), NominaError> {
    let filter = env_filter(config)?;

    let result = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already installed");
    }
    Ok(())
}
