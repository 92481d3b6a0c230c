//! # arbor
//!
//! A process-wide component runtime: declaratively registered singletons,
//! dependency-ordered construction and a two-phase async lifecycle.
//!
//! Components declare a descriptor (name, role, dependencies, factory)
//! through [`register_component!`]; the runtime collects descriptors at
//! link time, validates the dependency graph, builds every singleton in
//! topological order, joins all configure signals before becoming ready,
//! and tears everything down in exact reverse order on [`CoreContext::destroy`].
//!
//! ## Example
//!
//! ```ignore
//! use arbor::{register_component, CoreContext, CoreOptions, Registration};
//!
//! struct Clock;
//! impl arbor::Component for Clock {}
//!
//! register_component! {
//!     CLOCK: "Clock" {
//!         role: Injectable,
//!         dependencies: [],
//!         factory: |_| Ok(Registration::of(Clock)),
//!     }
//! }
//!
//! # async fn run() -> Result<(), arbor::SharedError> {
//! let context = CoreContext::start(CoreOptions::from_env()).await?;
//! context.when_ready().await?;
//! let clock = context.instance::<Clock>("Clock").map_err(std::sync::Arc::new)?;
//! context.destroy().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - descriptors, traits, lifecycle states, the error taxonomy
//! - `runtime` - registry, graph, factory, orchestrator, context, config

/// Domain layer - core types and port traits
pub mod domain {
    pub use arbor_domain::*;
}

/// Orchestration layer - registry, graph, factory, lifecycle, context
pub mod runtime {
    pub use arbor_runtime::*;
}

// The common surface, flattened for host applications
pub use arbor_domain::{
    Component, ComponentDescriptor, ComponentFactory, ComponentRole, Configurable, Error,
    Injector, InstanceRegistry, LifecycleState, Registration, Result, SharedError, SignalResult,
};
pub use arbor_runtime::{
    register_component, CoreConfig, CoreContext, CoreOptions, DependencyGraph,
    DescriptorRegistry, LifecycleOrchestrator, LoggingConfig, PropertiesHandler, ScanConfig,
};
