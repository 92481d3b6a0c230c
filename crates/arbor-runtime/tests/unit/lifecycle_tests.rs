//! Tests for the lifecycle orchestrator
//!
//! Drives configure/destroy joins, readiness replay and teardown
//! idempotence against probe components with controllable hooks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use arbor_domain::{Component, Configurable, Error, LifecycleState, Result};
use arbor_runtime::LifecycleOrchestrator;
use async_trait::async_trait;

/// Lifecycle hook probe with failure and latency knobs
#[derive(Default)]
struct Probe {
    configured: AtomicUsize,
    destroyed: AtomicUsize,
    fail_configure: bool,
    fail_destroy: bool,
    configure_delay_ms: u64,
}

impl Component for Probe {}

#[async_trait]
impl Configurable for Probe {
    async fn configure(&self) -> Result<()> {
        if self.configure_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.configure_delay_ms)).await;
        }
        self.configured.fetch_add(1, Ordering::SeqCst);
        if self.fail_configure {
            return Err(Error::component("configure probe failure"));
        }
        Ok(())
    }

    async fn destroy(&self) -> Result<()> {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
        if self.fail_destroy {
            return Err(Error::component("destroy probe failure"));
        }
        Ok(())
    }
}

/// Records its label on destroy; hooks never suspend, so the join polls
/// them in submission order and the log is deterministic
struct Recorder {
    label: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
}

impl Component for Recorder {}

#[async_trait]
impl Configurable for Recorder {
    async fn configure(&self) -> Result<()> {
        Ok(())
    }

    async fn destroy(&self) -> Result<()> {
        self.log.lock().unwrap().push(self.label);
        Ok(())
    }
}

fn orchestrator_with(lifecycle: Vec<(String, Arc<dyn Configurable>)>) -> LifecycleOrchestrator {
    let mut orchestrator = LifecycleOrchestrator::new();
    orchestrator.install(lifecycle);
    orchestrator
}

#[tokio::test]
async fn configure_all_reaches_ready() {
    let first = Arc::new(Probe::default());
    let second = Arc::new(Probe::default());
    let orchestrator = orchestrator_with(vec![
        ("First".to_string(), first.clone()),
        ("Second".to_string(), second.clone()),
    ]);

    orchestrator.configure_all().await.unwrap();

    assert_eq!(orchestrator.state(), LifecycleState::Ready);
    assert_eq!(first.configured.load(Ordering::SeqCst), 1);
    assert_eq!(second.configured.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn readiness_notifies_every_pending_waiter() {
    let probe = Arc::new(Probe {
        configure_delay_ms: 20,
        ..Probe::default()
    });
    let orchestrator = Arc::new(orchestrator_with(vec![("Probe".to_string(), probe)]));

    let waiters: Vec<_> = (0..3)
        .map(|_| {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move { orchestrator.when_ready().await })
        })
        .collect();
    // Let the waiters subscribe before the transition fires
    tokio::time::sleep(Duration::from_millis(5)).await;

    orchestrator.configure_all().await.unwrap();

    for waiter in waiters {
        waiter.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn readiness_replays_after_the_transition() {
    let orchestrator = orchestrator_with(vec![("Probe".to_string(), Arc::new(Probe::default()))]);
    orchestrator.configure_all().await.unwrap();

    orchestrator.when_ready().await.unwrap();
    orchestrator.when_ready().await.unwrap();
}

#[tokio::test]
async fn configure_failure_stays_short_of_ready_and_replays() {
    let failing = Arc::new(Probe {
        fail_configure: true,
        ..Probe::default()
    });
    let orchestrator = orchestrator_with(vec![("Broken".to_string(), failing)]);

    let err = orchestrator.configure_all().await.unwrap_err();
    assert_eq!(err.code(), "ARB-005");
    assert!(err.to_string().contains("Broken"));
    assert_eq!(orchestrator.state(), LifecycleState::Configuring);

    // Readiness callers observe the failure instead of hanging
    let replayed = orchestrator.when_ready().await.unwrap_err();
    assert_eq!(replayed.code(), "ARB-005");
}

#[tokio::test]
async fn configure_failure_does_not_cancel_siblings() {
    let slow = Arc::new(Probe {
        configure_delay_ms: 20,
        ..Probe::default()
    });
    let failing = Arc::new(Probe {
        fail_configure: true,
        ..Probe::default()
    });
    let orchestrator = orchestrator_with(vec![
        ("Failing".to_string(), failing),
        ("Slow".to_string(), slow.clone()),
    ]);

    let err = orchestrator.configure_all().await.unwrap_err();
    assert_eq!(err.code(), "ARB-005");
    // The join waited for the slow sibling even though another hook failed
    assert_eq!(slow.configured.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn destroy_runs_hooks_at_most_once() {
    let probe = Arc::new(Probe::default());
    let orchestrator = orchestrator_with(vec![("Probe".to_string(), probe.clone())]);
    orchestrator.configure_all().await.unwrap();

    orchestrator.destroy().await.unwrap();
    orchestrator.destroy().await.unwrap();

    assert_eq!(probe.destroyed.load(Ordering::SeqCst), 1);
    assert_eq!(orchestrator.state(), LifecycleState::Destroyed);
}

#[tokio::test]
async fn destroy_order_is_reverse_of_construction() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let lifecycle: Vec<(String, Arc<dyn Configurable>)> = ["A", "B", "C"]
        .into_iter()
        .map(|label| {
            (
                label.to_string(),
                Arc::new(Recorder {
                    label,
                    log: log.clone(),
                }) as Arc<dyn Configurable>,
            )
        })
        .collect();
    let orchestrator = orchestrator_with(lifecycle);
    orchestrator.configure_all().await.unwrap();

    orchestrator.destroy().await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["C", "B", "A"]);
}

#[tokio::test]
async fn destroy_error_is_terminal_and_replayed() {
    let failing = Arc::new(Probe {
        fail_destroy: true,
        ..Probe::default()
    });
    let orchestrator = orchestrator_with(vec![("Broken".to_string(), failing.clone())]);
    orchestrator.configure_all().await.unwrap();

    let err = orchestrator.destroy().await.unwrap_err();
    assert_eq!(err.code(), "ARB-006");
    assert_eq!(orchestrator.state(), LifecycleState::Destroyed);

    // The recorded outcome replays; the hook does not run again
    let replayed = orchestrator.destroy().await.unwrap_err();
    assert_eq!(replayed.code(), "ARB-006");
    assert_eq!(failing.destroyed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn state_never_regresses() {
    let orchestrator = LifecycleOrchestrator::new();
    orchestrator.advance(LifecycleState::Ready);
    orchestrator.advance(LifecycleState::Scanning);
    assert_eq!(orchestrator.state(), LifecycleState::Ready);
}
