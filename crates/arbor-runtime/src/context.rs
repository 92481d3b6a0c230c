//! Process-wide façade over the assembled runtime
//!
//! [`CoreContext`] is the composition root: it loads properties, collects
//! descriptors, validates the graph, builds every singleton and drives the
//! lifecycle. The first context started in a process is also reachable
//! through [`CoreContext::global`] for hosts that want the well-known
//! accessor; tests pass explicit contexts around instead.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use arbor_domain::{
    Component, Error, LifecycleState, Result, SharedError, SignalResult,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{PropertiesHandler, PropertiesLoader};
use crate::factory;
use crate::graph::DependencyGraph;
use crate::logging;
use crate::orchestrator::LifecycleOrchestrator;
use crate::registry::DescriptorRegistry;

static GLOBAL: OnceLock<Arc<CoreContext>> = OnceLock::new();

/// Startup options for a core context
#[derive(Default)]
pub struct CoreOptions {
    /// Arguments scanned for `--dotted.path=value` property overrides
    pub args: Vec<String>,

    /// Optional TOML configuration file
    pub config_path: Option<PathBuf>,

    /// Explicit descriptor registry; defaults to the link-time slice
    pub registry: Option<DescriptorRegistry>,
}

impl CoreOptions {
    /// Options with no overrides and the link-time registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture property overrides from the process arguments
    pub fn from_env() -> Self {
        Self {
            args: std::env::args().skip(1).collect(),
            ..Self::default()
        }
    }

    /// Provide argv-style property overrides
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Use a TOML configuration file
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Use an explicitly assembled registry instead of the link-time slice
    pub fn with_registry(mut self, registry: DescriptorRegistry) -> Self {
        self.registry = Some(registry);
        self
    }
}

/// The process-wide runtime façade
pub struct CoreContext {
    properties: PropertiesHandler,
    graph: DependencyGraph,
    instances: arbor_domain::InstanceRegistry,
    orchestrator: LifecycleOrchestrator,
}

impl CoreContext {
    /// Build the runtime and drive it to Ready
    ///
    /// Structural errors (duplicate, unresolved, cyclic) abort before any
    /// instance exists. A configure failure aborts the Ready transition but
    /// leaves the context reachable so the recorded outcome can replay.
    pub async fn start(options: CoreOptions) -> std::result::Result<Arc<Self>, SharedError> {
        let context = Arc::new(Self::assemble(options).map_err(Arc::new)?);
        let _ = GLOBAL.set(context.clone());

        context.orchestrator.configure_all().await?;
        Ok(context)
    }

    /// Synchronous structural phase: properties, registry, graph, instances
    fn assemble(options: CoreOptions) -> Result<Self> {
        let mut loader = PropertiesLoader::new().with_args(options.args);
        if let Some(path) = options.config_path {
            loader = loader.with_config_path(path);
        }
        let properties = loader.load()?;
        let core = properties.core()?;

        if core.log.enabled {
            // Benign when a subscriber is already installed
            let _ = logging::init_logging(&core.log);
        }

        let mut orchestrator = LifecycleOrchestrator::new();
        orchestrator.advance(LifecycleState::Scanning);

        let mut registry = match options.registry {
            Some(registry) => registry,
            None => DescriptorRegistry::from_linked()?,
        };
        if !core.scan.enabled {
            registry.retain_reachable()?;
        }
        info!(components = registry.len(), scan = core.scan.enabled, "Registry assembled");

        let graph = DependencyGraph::build(&registry)?;
        let built = factory::build_instances(&registry, &graph)?;
        orchestrator.install(built.lifecycle);
        debug!(instances = built.instances.len(), "Core context assembled");

        Ok(Self {
            properties,
            graph,
            instances: built.instances,
            orchestrator,
        })
    }

    /// The first context started in this process, if any
    pub fn global() -> Option<Arc<Self>> {
        GLOBAL.get().cloned()
    }

    /// Current global lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.orchestrator.state()
    }

    /// Look up a singleton and downcast it to its concrete type
    pub fn instance<T: Component>(&self, name: &str) -> Result<Arc<T>> {
        self.instances.get_as(name)
    }

    /// Look up a singleton as a trait object
    pub fn instance_by_name(&self, name: &str) -> Result<Arc<dyn Component>> {
        self.instances
            .get(name)
            .ok_or_else(|| Error::not_found(name))
    }

    /// One-shot readiness notification with replay
    pub async fn when_ready(&self) -> SignalResult {
        self.orchestrator.when_ready().await
    }

    /// Destroy the runtime; idempotent, hooks run at most once
    pub async fn destroy(&self) -> SignalResult {
        self.orchestrator.destroy().await
    }

    /// Snapshot of every constructed singleton, in construction order
    pub fn instances(&self) -> Vec<(String, Arc<dyn Component>)> {
        self.instances.snapshot()
    }

    /// Nested dependency-tree view, mirroring declared edges
    pub fn dependency_tree(&self) -> Value {
        self.graph.dependency_tree()
    }

    /// Read merged property values by dotted path
    pub fn properties(&self, path: &str) -> Option<&Value> {
        self.properties.properties(path)
    }

    /// The full properties handler, for hosts that need typed extraction
    pub fn properties_handler(&self) -> &PropertiesHandler {
        &self.properties
    }
}

impl std::fmt::Debug for CoreContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreContext")
            .field("state", &self.state())
            .field("instances", &self.instances.len())
            .finish_non_exhaustive()
    }
}
