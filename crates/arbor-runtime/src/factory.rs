//! Ordered singleton construction with injection
//!
//! Walks the construction order and runs each descriptor's factory against
//! an injector view of everything built so far. Dependencies are complete
//! at injection time, never lazy.

use std::sync::Arc;

use arbor_domain::{Configurable, Error, InstanceRegistry, Injector, Result};
use tracing::debug;

use crate::graph::DependencyGraph;
use crate::registry::DescriptorRegistry;

/// Output of the construction pass
pub struct BuiltComponents {
    /// Every singleton, keyed by name, in construction order
    pub instances: InstanceRegistry,
    /// Lifecycle-capable instances in construction order
    pub lifecycle: Vec<(String, Arc<dyn Configurable>)>,
}

impl std::fmt::Debug for BuiltComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltComponents")
            .field("instances", &self.instances.len())
            .field("lifecycle", &self.lifecycle.len())
            .finish()
    }
}

/// Instantiate every descriptor in construction order
///
/// A factory error aborts the pass; nothing after the failing component is
/// built and the partial registry is dropped with the error.
pub fn build_instances(
    registry: &DescriptorRegistry,
    graph: &DependencyGraph,
) -> Result<BuiltComponents> {
    let mut instances = InstanceRegistry::new();
    let mut lifecycle = Vec::new();

    for name in graph.construction_order() {
        let descriptor = registry
            .get(name)
            .ok_or_else(|| Error::not_found(name))?;

        let registration = {
            let injector = Injector::new(&instances);
            (descriptor.factory)(&injector)?
        };
        debug!(component = name, role = ?descriptor.role, "Constructed component");

        if descriptor.role.is_lifecycle() {
            let view = registration.lifecycle().ok_or_else(|| {
                Error::configuration(format!(
                    "component {name} has the configuration role but registered no lifecycle view"
                ))
            })?;
            lifecycle.push((name.to_string(), view));
        }

        instances.insert(name, registration.instance())?;
    }

    debug!(
        instances = instances.len(),
        lifecycle = lifecycle.len(),
        "Instantiation complete"
    );
    Ok(BuiltComponents {
        instances,
        lifecycle,
    })
}
