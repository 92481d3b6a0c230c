//! Property loading and dotted-path lookup
//!
//! Uses figment to merge defaults, an optional TOML file, prefixed
//! environment variables and argv overrides into one tree. The runtime
//! reads its own settings from `arbor.core`; everything else belongs to
//! the host application.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde_json::{Map, Value};

use arbor_domain::{Error, Result};

use crate::config::types::CoreConfig;
use crate::constants::{CORE_PROPERTIES_PATH, ENV_PREFIX, PROPERTIES_NAMESPACE};

/// Builder for the merged property tree
#[derive(Clone)]
pub struct PropertiesLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
    args: Vec<String>,
}

impl PropertiesLoader {
    /// Create a loader with default settings and no argv overrides
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: ENV_PREFIX.to_string(),
            args: Vec::new(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Provide command-line arguments to scan for `--dotted.path=value`
    /// overrides
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Merge all sources into a property tree
    ///
    /// Precedence, lowest to highest: serialized defaults, TOML file,
    /// environment variables, argv overrides.
    pub fn load(&self) -> Result<PropertiesHandler> {
        let mut figment = Figment::new().merge(Serialized::defaults(default_tree()?));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
            }
        }

        // ARBOR_CORE_LOG_LEVEL lands at arbor.core.log.level: the stripped
        // prefix is re-added as the namespace segment before splitting
        figment = figment.merge(
            Env::prefixed(&self.env_prefix)
                .map(|key| format!("{}_{}", PROPERTIES_NAMESPACE, key.as_str()).into())
                .split("_"),
        );

        let overrides = argv_overrides(&self.args);
        if !overrides.is_empty() {
            figment = figment.merge(Serialized::defaults(Value::Object(overrides)));
        }

        let root: Value = figment
            .extract()
            .map_err(|e| Error::configuration_with("failed to merge configuration sources", e))?;

        Ok(PropertiesHandler { root })
    }
}

impl Default for PropertiesLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// The merged, hierarchical property tree
#[derive(Debug, Clone)]
pub struct PropertiesHandler {
    root: Value,
}

impl PropertiesHandler {
    /// Look up a subtree or scalar by dotted path
    pub fn properties(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Typed view of the runtime's own `arbor.core` subtree
    pub fn core(&self) -> Result<CoreConfig> {
        match self.properties(CORE_PROPERTIES_PATH) {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| Error::configuration_with("invalid arbor.core properties", e)),
            None => Ok(CoreConfig::default()),
        }
    }

    /// The whole merged tree
    pub fn root(&self) -> &Value {
        &self.root
    }
}

/// Serialized defaults for the runtime's own subtree
fn default_tree() -> Result<Value> {
    let core = serde_json::to_value(CoreConfig::default())
        .map_err(|e| Error::configuration_with("failed to serialize default configuration", e))?;
    let mut namespace = Map::new();
    namespace.insert("core".to_string(), core);
    let mut root = Map::new();
    root.insert(PROPERTIES_NAMESPACE.to_string(), Value::Object(namespace));
    Ok(Value::Object(root))
}

/// Collect `--dotted.path=value` overrides from argv
///
/// Arguments without the `--` prefix, without `=` or without a dot in the
/// key are ignored; they belong to whatever CLI surface the host has.
fn argv_overrides(args: &[String]) -> Map<String, Value> {
    let mut root = Map::new();
    for arg in args {
        let Some(rest) = arg.strip_prefix("--") else {
            continue;
        };
        let Some((key, raw)) = rest.split_once('=') else {
            continue;
        };
        if !key.contains('.') {
            continue;
        }
        insert_path(&mut root, key, parse_scalar(raw));
    }
    root
}

/// Scalar inference for override values: JSON parse, else a string
fn parse_scalar(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else {
        return;
    };

    let mut current = root;
    for segment in segments {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(map) = entry else {
            return;
        };
        current = map;
    }
    current.insert(last.to_string(), value);
}
