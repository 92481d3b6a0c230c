//! Runtime constants
//!
//! Property paths, environment prefixes and configuration defaults used
//! across the orchestration layer.

/// Top-level key of the runtime's own properties in the merged tree
pub const PROPERTIES_NAMESPACE: &str = "arbor";

/// Dotted path of the core property subtree
pub const CORE_PROPERTIES_PATH: &str = "arbor.core";

/// Prefix for environment-variable overrides (e.g. `ARBOR_CORE_LOG_LEVEL`)
pub const ENV_PREFIX: &str = "ARBOR_";

/// Environment variable consulted for a tracing filter directive
pub const LOG_ENV_FILTER: &str = "ARBOR_LOG";

// ============================================================================
// CORE CONFIGURATION DEFAULTS
// ============================================================================

/// Scanning (link-time collection) enabled by default
pub const DEFAULT_SCAN_ENABLED: bool = true;

/// Default scan root, recorded for diagnostics
pub const DEFAULT_SCAN_PATH: &str = "src";

/// Logging enabled by default
pub const DEFAULT_LOG_ENABLED: bool = true;

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
