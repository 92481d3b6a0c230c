//! Shared fixture components for the runtime tests
//!
//! A small service graph with one application root, three lifecycle-capable
//! services, a plain logger and an optional orphan nothing depends on:
//!
//! ```text
//! Main -> DependentServiceTest -> { DependencyAServiceTest -> DependencyBServiceTest,
//!                                   DependencyBServiceTest,
//!                                   Logger }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arbor_domain::{
    Component, ComponentDescriptor, ComponentRole, Configurable, Injector, Registration, Result,
};
use arbor_runtime::DescriptorRegistry;
use async_trait::async_trait;

/// Configure/destroy invocation counters embedded in fixture services
#[derive(Default)]
pub struct Hooks {
    pub configured: AtomicUsize,
    pub destroyed: AtomicUsize,
}

impl Hooks {
    pub fn configured_count(&self) -> usize {
        self.configured.load(Ordering::SeqCst)
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed.load(Ordering::SeqCst)
    }
}

pub struct Logger;
impl Component for Logger {}

pub struct DependencyB {
    pub hooks: Hooks,
}
impl Component for DependencyB {}

#[async_trait]
impl Configurable for DependencyB {
    async fn configure(&self) -> Result<()> {
        self.hooks.configured.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn destroy(&self) -> Result<()> {
        self.hooks.destroyed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct DependencyA {
    pub b: Arc<DependencyB>,
    pub hooks: Hooks,
}
impl Component for DependencyA {}

#[async_trait]
impl Configurable for DependencyA {
    async fn configure(&self) -> Result<()> {
        self.hooks.configured.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn destroy(&self) -> Result<()> {
        self.hooks.destroyed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct DependentService {
    pub a: Arc<DependencyA>,
    pub b: Arc<DependencyB>,
    pub logger: Arc<Logger>,
    pub hooks: Hooks,
}
impl Component for DependentService {}

#[async_trait]
impl Configurable for DependentService {
    async fn configure(&self) -> Result<()> {
        self.hooks.configured.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn destroy(&self) -> Result<()> {
        self.hooks.destroyed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct MainApp {
    pub dependent: Arc<DependentService>,
}
impl Component for MainApp {}

pub struct Orphan;
impl Component for Orphan {}

fn logger_factory(_: &Injector<'_>) -> Result<Registration> {
    Ok(Registration::of(Logger))
}

fn dependency_b_factory(_: &Injector<'_>) -> Result<Registration> {
    Ok(Registration::with_lifecycle(DependencyB {
        hooks: Hooks::default(),
    }))
}

fn dependency_a_factory(injector: &Injector<'_>) -> Result<Registration> {
    let b = injector.get::<DependencyB>("DependencyBServiceTest")?;
    Ok(Registration::with_lifecycle(DependencyA {
        b,
        hooks: Hooks::default(),
    }))
}

fn dependent_factory(injector: &Injector<'_>) -> Result<Registration> {
    let a = injector.get::<DependencyA>("DependencyAServiceTest")?;
    let b = injector.get::<DependencyB>("DependencyBServiceTest")?;
    let logger = injector.get::<Logger>("Logger")?;
    Ok(Registration::with_lifecycle(DependentService {
        a,
        b,
        logger,
        hooks: Hooks::default(),
    }))
}

fn main_factory(injector: &Injector<'_>) -> Result<Registration> {
    let dependent = injector.get::<DependentService>("DependentServiceTest")?;
    Ok(Registration::of(MainApp { dependent }))
}

fn orphan_factory(_: &Injector<'_>) -> Result<Registration> {
    Ok(Registration::of(Orphan))
}

/// The fixture service graph, registered in dependency-first order
pub fn fixture_registry(include_orphan: bool) -> DescriptorRegistry {
    let mut registry = DescriptorRegistry::new();
    let descriptors = [
        ComponentDescriptor {
            name: "DependencyBServiceTest",
            role: ComponentRole::Configuration,
            dependencies: &[],
            factory: dependency_b_factory,
        },
        ComponentDescriptor {
            name: "DependencyAServiceTest",
            role: ComponentRole::Configuration,
            dependencies: &["DependencyBServiceTest"],
            factory: dependency_a_factory,
        },
        ComponentDescriptor {
            name: "Logger",
            role: ComponentRole::Injectable,
            dependencies: &[],
            factory: logger_factory,
        },
        ComponentDescriptor {
            name: "DependentServiceTest",
            role: ComponentRole::Configuration,
            dependencies: &["DependencyAServiceTest", "DependencyBServiceTest", "Logger"],
            factory: dependent_factory,
        },
        ComponentDescriptor {
            name: "Main",
            role: ComponentRole::ApplicationRoot,
            dependencies: &["DependentServiceTest"],
            factory: main_factory,
        },
    ];
    for descriptor in descriptors {
        registry.register(descriptor).unwrap();
    }
    if include_orphan {
        registry
            .register(ComponentDescriptor {
                name: "Orphan",
                role: ComponentRole::Injectable,
                dependencies: &[],
                factory: orphan_factory,
            })
            .unwrap();
    }
    registry
}

/// Argv that keeps the logging bootstrap out of test output
pub fn quiet_args() -> Vec<String> {
    vec!["--arbor.core.log.enabled=false".to_string()]
}
