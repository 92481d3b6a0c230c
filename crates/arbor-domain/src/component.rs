//! Component traits, roles and descriptors
//!
//! A component is any singleton the runtime constructs and owns. Components
//! declare themselves through a [`ComponentDescriptor`]: a name, a role, the
//! names of the components they depend on, and a factory that receives every
//! dependency already built.
//!
//! Descriptors are const-constructible so they can live in link-time
//! distributed slices; the factory is therefore a plain function pointer.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use downcast_rs::{impl_downcast, DowncastSync};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::instance::Injector;

/// Marker trait for runtime-managed singletons
///
/// Downcast support lets [`Injector::get`] hand concrete types back to
/// factories and hosts without an `unsafe` in sight.
pub trait Component: DowncastSync {}
impl_downcast!(sync Component);

/// Lifecycle port for configuration-capable components
///
/// `configure` runs during the Configuring phase; the runtime joins every
/// outstanding configure future before transitioning to Ready. `destroy`
/// runs in exact reverse construction order during teardown and defaults
/// to a no-op.
#[async_trait]
pub trait Configurable: Component {
    /// Configure the component; completion gates the Ready transition
    async fn configure(&self) -> Result<()>;

    /// Release resources; errors are reported but do not block teardown
    async fn destroy(&self) -> Result<()> {
        Ok(())
    }
}

/// Role a component plays in the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentRole {
    /// The single entry-point component; its declared dependencies seed
    /// reachability when scanning is disabled
    ApplicationRoot,
    /// Runtime-internal component
    System,
    /// Participates in the configure/destroy lifecycle
    Configuration,
    /// Plain injectable singleton with no lifecycle hooks
    Injectable,
}

impl ComponentRole {
    /// Whether instances with this role run the configure/destroy phases
    pub fn is_lifecycle(self) -> bool {
        matches!(self, Self::Configuration)
    }
}

/// Factory signature stored in descriptors
///
/// Non-capturing so descriptors can be `static`. The injector only exposes
/// components that are already fully constructed.
pub type ComponentFactory = fn(&Injector<'_>) -> Result<Registration>;

/// Static metadata for one component
///
/// Created once at load time, immutable thereafter.
#[derive(Clone, Copy)]
pub struct ComponentDescriptor {
    /// Unique component name
    pub name: &'static str,
    /// Role of the component
    pub role: ComponentRole,
    /// Declared dependency names, in injection-point order
    pub dependencies: &'static [&'static str],
    /// Factory invoked once all dependencies are built
    pub factory: ComponentFactory,
}

impl ComponentDescriptor {
    /// Whether two descriptors describe the same component
    ///
    /// Re-registering the same descriptor is a no-op; a different descriptor
    /// under an existing name is a duplicate.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name
            && self.role == other.role
            && self.dependencies == other.dependencies
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Factory output: the constructed instance plus its optional lifecycle view
///
/// Both views point at the same allocation; the runtime stores the component
/// view in the instance registry and hands the lifecycle view to the
/// orchestrator.
pub struct Registration {
    instance: Arc<dyn Component>,
    lifecycle: Option<Arc<dyn Configurable>>,
}

impl Registration {
    /// Register a plain component with no lifecycle hooks
    pub fn of<T: Component>(value: T) -> Self {
        Self {
            instance: Arc::new(value),
            lifecycle: None,
        }
    }

    /// Register a configuration-capable component
    pub fn with_lifecycle<T: Configurable>(value: T) -> Self {
        let shared = Arc::new(value);
        let lifecycle: Arc<dyn Configurable> = shared.clone();
        Self {
            instance: shared,
            lifecycle: Some(lifecycle),
        }
    }

    /// The component view of the instance
    pub fn instance(&self) -> Arc<dyn Component> {
        self.instance.clone()
    }

    /// The lifecycle view of the instance, when one was registered
    pub fn lifecycle(&self) -> Option<Arc<dyn Configurable>> {
        self.lifecycle.clone()
    }
}
