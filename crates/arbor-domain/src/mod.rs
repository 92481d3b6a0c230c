//! # Domain Layer
//!
//! Core types of the arbor component runtime. This crate is pure: no I/O,
//! no async runtime, no global state. Everything the orchestration layer
//! manipulates is declared here.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`component`] | Component traits, roles and descriptors |
//! | [`error`] | Error taxonomy with stable codes |
//! | [`instance`] | Singleton instance registry and injector view |
//! | [`lifecycle`] | Global lifecycle state machine values |
//! | [`messages`] | Code to human-readable text catalog |

pub mod component;
pub mod error;
pub mod instance;
pub mod lifecycle;
pub mod messages;

// Re-export the types that make up the public surface
pub use component::{
    Component, ComponentDescriptor, ComponentFactory, ComponentRole, Configurable, Registration,
};
pub use error::{Error, Result, SharedError, SignalResult};
pub use instance::{Injector, InstanceRegistry};
pub use lifecycle::LifecycleState;
