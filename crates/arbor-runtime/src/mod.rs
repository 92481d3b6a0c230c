//! # Orchestration Layer
//!
//! Everything that turns registered descriptors into a running, queryable
//! context: registry collection, graph validation, ordered construction
//! and the two-phase lifecycle.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | Link-time and manual descriptor registration |
//! | [`graph`] | Dependency graph, topological order, cycle detection |
//! | [`factory`] | Ordered singleton construction with injection |
//! | [`orchestrator`] | Configure/destroy phases and the global state machine |
//! | [`context`] | Process-wide façade over the assembled runtime |
//! | [`config`] | Merged property tree and typed core configuration |
//! | [`logging`] | Structured logging bootstrap with tracing |
//! | [`constants`] | Property paths, prefixes and defaults |

pub mod config;
pub mod constants;
pub mod context;
pub mod factory;
pub mod graph;
pub mod logging;
pub mod orchestrator;
pub mod registry;

// Re-export commonly used types
pub use config::{CoreConfig, LoggingConfig, PropertiesHandler, ScanConfig};
pub use context::{CoreContext, CoreOptions};
pub use graph::DependencyGraph;
pub use orchestrator::LifecycleOrchestrator;
pub use registry::DescriptorRegistry;

// Domain types needed at registration sites (and by `register_component!`)
pub use arbor_domain::{
    Component, ComponentDescriptor, ComponentFactory, ComponentRole, Configurable, Error,
    Injector, LifecycleState, Registration, Result, SharedError, SignalResult,
};
