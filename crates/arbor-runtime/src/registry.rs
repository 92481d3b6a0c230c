//! Component descriptor registry
//!
//! Descriptors reach the registry two ways:
//!
//! - **Link-time**: `#[linkme::distributed_slice(COMPONENTS)]` statics,
//!   collected in link order; this is the declarative-annotation surface.
//!   The [`register_component!`] macro writes the boilerplate.
//! - **Manual**: explicit [`DescriptorRegistry::register`] calls, used by
//!   tests and by hosts that assemble a registry by hand.
//!
//! Registration order is preserved; it is the tie-break between components
//! with no ordering constraint.

use std::collections::{HashMap, HashSet, VecDeque};

use arbor_domain::{ComponentDescriptor, ComponentRole, Error, Result};
use tracing::debug;

/// Link-time component descriptors
///
/// Components anywhere in the dependency closure of the final binary land
/// here; no registration call runs at startup.
#[linkme::distributed_slice]
pub static COMPONENTS: [ComponentDescriptor] = [..];

/// Declare a component descriptor in the link-time registry.
///
/// The declaring crate needs `linkme` in its dependencies for the
/// distributed-slice attribute to resolve.
///
/// ```ignore
/// register_component! {
///     APP_ROOT: "Main" {
///         role: ApplicationRoot,
///         dependencies: ["Dependent"],
///         factory: |injector| {
///             let dependent = injector.get::<Dependent>("Dependent")?;
///             Ok(Registration::of(Main { dependent }))
///         },
///     }
/// }
/// ```
#[macro_export]
macro_rules! register_component {
    ($entry:ident: $name:literal { role: $role:ident, dependencies: [$($dep:expr),* $(,)?], factory: $factory:expr $(,)? }) => {
        #[linkme::distributed_slice($crate::registry::COMPONENTS)]
        static $entry: $crate::ComponentDescriptor = $crate::ComponentDescriptor {
            name: $name,
            role: $crate::ComponentRole::$role,
            dependencies: &[$($dep),*],
            factory: $factory,
        };
    };
}

/// Ordered set of component descriptors, keyed by name
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    descriptors: Vec<ComponentDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl DescriptorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every link-time descriptor, in link order
    pub fn from_linked() -> Result<Self> {
        let mut registry = Self::new();
        for descriptor in COMPONENTS {
            registry.register(*descriptor)?;
        }
        debug!(components = registry.len(), "Collected link-time descriptors");
        Ok(registry)
    }

    /// Record a descriptor
    ///
    /// Idempotent for the same descriptor; a different descriptor under an
    /// existing name is a duplicate-component error.
    pub fn register(&mut self, descriptor: ComponentDescriptor) -> Result<()> {
        if let Some(&existing) = self.index.get(descriptor.name) {
            if self.descriptors[existing].same_identity(&descriptor) {
                return Ok(());
            }
            return Err(Error::DuplicateComponent {
                name: descriptor.name.to_string(),
            });
        }
        self.index.insert(descriptor.name, self.descriptors.len());
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Look up a descriptor by name
    pub fn get(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.index.get(name).map(|&i| &self.descriptors[i])
    }

    /// Position of a name in registration order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Descriptors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.descriptors.iter()
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// The first registered application root, if any
    pub fn application_root(&self) -> Option<&ComponentDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.role == ComponentRole::ApplicationRoot)
    }

    /// Manual mode: keep only descriptors reachable from the application
    /// root's declared dependencies
    ///
    /// Names that resolve to nothing are left for the graph builder, which
    /// reports them with their requester. Registration order of the
    /// retained set is preserved.
    pub fn retain_reachable(&mut self) -> Result<()> {
        let root = self.application_root().ok_or_else(|| {
            Error::configuration("manual registration requires an application root component")
        })?;

        let mut keep: HashSet<&'static str> = HashSet::new();
        let mut queue: VecDeque<&'static str> = VecDeque::new();
        keep.insert(root.name);
        queue.push_back(root.name);

        while let Some(name) = queue.pop_front() {
            let Some(descriptor) = self.get(name) else {
                continue;
            };
            for dep in descriptor.dependencies {
                if keep.insert(dep) {
                    queue.push_back(dep);
                }
            }
        }

        let before = self.descriptors.len();
        self.descriptors.retain(|d| keep.contains(d.name));
        self.index = self
            .descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name, i))
            .collect();
        debug!(
            retained = self.descriptors.len(),
            dropped = before - self.descriptors.len(),
            "Filtered registry to the reachable set"
        );
        Ok(())
    }
}
