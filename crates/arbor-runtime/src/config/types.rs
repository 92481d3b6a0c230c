//! Core configuration types

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// The runtime's own configuration, read from the `arbor.core` subtree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Descriptor collection settings
    pub scan: ScanConfig,

    /// Logging settings
    pub log: LoggingConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            log: LoggingConfig::default(),
        }
    }
}

/// Descriptor collection settings
///
/// With scanning enabled every link-time descriptor is used. Disabled, only
/// descriptors reachable from the application root's declared dependencies
/// are retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Use the full link-time descriptor set
    pub enabled: bool,

    /// Source root recorded for diagnostics
    pub path: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_SCAN_ENABLED,
            path: DEFAULT_SCAN_PATH.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Install a global tracing subscriber at startup
    pub enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_LOG_ENABLED,
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
        }
    }
}
