//! Merged property tree and typed core configuration
//!
//! Properties flow from four sources, later ones overriding earlier:
//! serialized defaults, an optional TOML file, `ARBOR_`-prefixed
//! environment variables, and `--dotted.path=value` command-line
//! overrides.

pub mod loader;
pub mod types;

pub use loader::{PropertiesHandler, PropertiesLoader};
pub use types::{CoreConfig, LoggingConfig, ScanConfig};
