//! Singleton instance registry and injector view
//!
//! Exactly one instance per descriptor, inserted in construction order and
//! never replaced. After the runtime reaches Ready the registry is only
//! read.

use std::collections::HashMap;
use std::sync::Arc;

use crate::component::Component;
use crate::error::{Error, Result};

/// Mapping from component name to its constructed singleton
#[derive(Default)]
pub struct InstanceRegistry {
    by_name: HashMap<String, Arc<dyn Component>>,
    order: Vec<String>,
}

impl InstanceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a newly constructed singleton
    ///
    /// Entries are never replaced; a second insert under the same name is a
    /// duplicate-component error.
    pub fn insert(&mut self, name: &str, instance: Arc<dyn Component>) -> Result<()> {
        if self.by_name.contains_key(name) {
            return Err(Error::DuplicateComponent {
                name: name.to_string(),
            });
        }
        self.by_name.insert(name.to_string(), instance);
        self.order.push(name.to_string());
        Ok(())
    }

    /// Look up a singleton by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Component>> {
        self.by_name.get(name).cloned()
    }

    /// Look up a singleton by name and downcast it to a concrete type
    pub fn get_as<T: Component>(&self, name: &str) -> Result<Arc<T>> {
        let instance = self.get(name).ok_or_else(|| Error::not_found(name))?;
        instance
            .downcast_arc::<T>()
            .map_err(|_| Error::not_found(format!("{name} with the requested type")))
    }

    /// Component names in construction order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Number of constructed singletons
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no singleton was constructed yet
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether a singleton exists under the given name
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Snapshot of all singletons in construction order
    pub fn snapshot(&self) -> Vec<(String, Arc<dyn Component>)> {
        self.order
            .iter()
            .filter_map(|name| self.get(name).map(|instance| (name.clone(), instance)))
            .collect()
    }
}

/// Read-only view of already-built singletons, handed to factories
///
/// Construction order guarantees every declared dependency is present by
/// the time a factory runs; a miss here means the factory asked for a name
/// it never declared.
pub struct Injector<'a> {
    instances: &'a InstanceRegistry,
}

impl<'a> Injector<'a> {
    /// Wrap the registry of already-built singletons
    pub fn new(instances: &'a InstanceRegistry) -> Self {
        Self { instances }
    }

    /// Fetch a built dependency and downcast it to its concrete type
    pub fn get<T: Component>(&self, name: &str) -> Result<Arc<T>> {
        self.instances.get_as(name)
    }

    /// Fetch a built dependency as a trait object
    pub fn get_component(&self, name: &str) -> Result<Arc<dyn Component>> {
        self.instances
            .get(name)
            .ok_or_else(|| Error::not_found(name))
    }
}
