//! Structured logging bootstrap with tracing
//!
//! Installs a global subscriber from [`LoggingConfig`]. The `ARBOR_LOG`
//! environment variable takes precedence over the configured level so a
//! deployment can raise verbosity without touching properties.

use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use arbor_domain::{Error, Result};

use crate::config::LoggingConfig;
use crate::constants::LOG_ENV_FILTER;

/// Initialize logging with the provided configuration
///
/// Installing a second global subscriber fails; callers that may run after
/// another init (tests, embedded hosts) should treat the error as benign.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_env(LOG_ENV_FILTER)
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = Registry::default().with(filter);
    let result = if config.json_format {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    match result {
        Ok(()) => {
            info!("Logging initialized with level: {}", level);
            Ok(())
        }
        Err(e) => Err(Error::configuration(format!(
            "failed to install tracing subscriber: {e}"
        ))),
    }
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "invalid log level: {level}"
        ))),
    }
}
