//! Error handling types
//!
//! Every failure surfaced by the runtime is one of these variants. Each
//! variant carries a stable code (see [`crate::messages`]) so hosts can
//! match on diagnostics without parsing display strings.

use std::sync::Arc;

use thiserror::Error;

use crate::messages;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// An error shared between every observer of a lifecycle outcome
///
/// Startup and destruction outcomes are recorded once and replayed to any
/// number of callers, so the error is reference-counted rather than cloned.
pub type SharedError = Arc<Error>;

/// Completion of a lifecycle signal, replayable to late subscribers
pub type SignalResult = std::result::Result<(), SharedError>;

/// Main error type for the arbor runtime
#[derive(Error, Debug)]
pub enum Error {
    /// Two distinct components registered under the same name
    #[error("Duplicate component: {name}")]
    DuplicateComponent {
        /// The contested component name
        name: String,
    },

    /// A declared dependency has no matching descriptor
    #[error("Unresolved dependency: {requester} requires {dependency}")]
    UnresolvedDependency {
        /// The missing component name
        dependency: String,
        /// The component that declared it
        requester: String,
    },

    /// The dependency graph contains a cycle
    #[error("Cyclic dependency: {}", cycle.join(" -> "))]
    CyclicDependency {
        /// The component sequence forming the closed walk, first repeated last
        cycle: Vec<String>,
    },

    /// Instance lookup by name missed
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// A configure hook errored; fatal to reaching Ready
    #[error("Configuration of component {component} failed")]
    ConfigurationFailed {
        /// The component whose hook errored
        component: String,
        /// The originating error
        #[source]
        source: Box<Error>,
    },

    /// A destroy hook errored; recorded but non-fatal to reaching Destroyed
    #[error("Destruction of component {component} failed")]
    DestructionFailed {
        /// The component whose hook errored
        component: String,
        /// The originating error
        #[source]
        source: Box<Error>,
    },

    /// Runtime configuration or properties error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error raised by component code inside a lifecycle hook
    #[error("{0}")]
    Component(String),
}

impl Error {
    /// Create a configuration error with a message
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error wrapping a source error
    pub fn configuration_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error for a named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a component-raised error for use inside lifecycle hooks
    pub fn component(message: impl Into<String>) -> Self {
        Self::Component(message.into())
    }

    /// Catalog text for this error's diagnostic code
    ///
    /// Logged next to the code so operators get the general failure class
    /// without parsing the display string.
    pub fn detail(&self) -> &'static str {
        messages::message(self.code()).unwrap_or_default()
    }

    /// Stable diagnostic code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateComponent { .. } => messages::codes::DUPLICATE_COMPONENT,
            Self::UnresolvedDependency { .. } => messages::codes::UNRESOLVED_DEPENDENCY,
            Self::CyclicDependency { .. } => messages::codes::CYCLIC_DEPENDENCY,
            Self::NotFound { .. } => messages::codes::NOT_FOUND,
            Self::ConfigurationFailed { .. } => messages::codes::CONFIGURATION_FAILED,
            Self::DestructionFailed { .. } => messages::codes::DESTRUCTION_FAILED,
            Self::Configuration { .. } => messages::codes::CONFIGURATION,
            Self::Component(_) => messages::codes::COMPONENT,
        }
    }
}
