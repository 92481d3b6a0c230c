//! Configure/destroy phases and the global state machine
//!
//! The orchestrator is the only writer of the global lifecycle state. Its
//! two suspension points are joins: every configure signal before Ready,
//! every destroy signal before Destroyed. Signals resolve in any order;
//! the join waits for all of them and propagates the first error without
//! cancelling siblings.

use std::sync::Arc;

use arbor_domain::{Configurable, Error, LifecycleState, SignalResult};
use futures::future::join_all;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

/// Drives lifecycle-capable instances through configure and destroy
pub struct LifecycleOrchestrator {
    state_tx: watch::Sender<LifecycleState>,
    startup_tx: watch::Sender<Option<SignalResult>>,
    /// Recorded terminal outcome; present once teardown completed
    teardown: Mutex<Option<SignalResult>>,
    /// Lifecycle-capable instances in construction order
    lifecycle: Vec<(String, Arc<dyn Configurable>)>,
}

impl LifecycleOrchestrator {
    /// Create an orchestrator in the Bootstrapping state
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(LifecycleState::Bootstrapping);
        let (startup_tx, _) = watch::channel(None);
        Self {
            state_tx,
            startup_tx,
            teardown: Mutex::new(None),
            lifecycle: Vec::new(),
        }
    }

    /// Hand over the constructed lifecycle set, in construction order
    pub fn install(&mut self, lifecycle: Vec<(String, Arc<dyn Configurable>)>) {
        self.lifecycle = lifecycle;
    }

    /// Current global lifecycle state
    pub fn state(&self) -> LifecycleState {
        *self.state_tx.borrow()
    }

    /// Advance the global state; regressions are ignored
    pub fn advance(&self, state: LifecycleState) {
        let moved = self.state_tx.send_if_modified(|current| {
            if state > *current {
                *current = state;
                true
            } else {
                false
            }
        });
        if moved {
            debug!(%state, "Lifecycle state advanced");
        }
    }

    /// Run every configure hook and join their completion signals
    ///
    /// Transitions to Ready only after all signals resolved successfully.
    /// On error the state stays short of Ready and the recorded outcome
    /// replays to every readiness caller; completed siblings are left in
    /// place.
    pub async fn configure_all(&self) -> SignalResult {
        self.advance(LifecycleState::Configuring);

        let signals = self.lifecycle.iter().map(|(name, component)| {
            let name = name.clone();
            let component = component.clone();
            async move { (name, component.configure().await) }
        });
        let results = join_all(signals).await;

        let mut first: Option<Error> = None;
        for (name, result) in results {
            if let Err(cause) = result {
                error!(
                    component = %name,
                    code = %cause.code(),
                    detail = cause.detail(),
                    "Configure hook failed"
                );
                if first.is_none() {
                    first = Some(Error::ConfigurationFailed {
                        component: name,
                        source: Box::new(cause),
                    });
                }
            }
        }

        let outcome = match first {
            Some(err) => Err(Arc::new(err)),
            None => {
                self.advance(LifecycleState::Ready);
                info!(components = self.lifecycle.len(), "Runtime ready");
                Ok(())
            }
        };
        self.startup_tx.send_replace(Some(outcome.clone()));
        outcome
    }

    /// One-shot readiness notification with replay
    ///
    /// Callers pending before the transition wake on it; callers arriving
    /// after it observe the recorded outcome immediately. A configure
    /// failure resolves here too instead of leaving waiters pending.
    pub async fn when_ready(&self) -> SignalResult {
        let mut rx = self.startup_tx.subscribe();
        loop {
            if let Some(outcome) = rx.borrow_and_update().clone() {
                return outcome;
            }
            if rx.changed().await.is_err() {
                return Err(Arc::new(Error::configuration(
                    "runtime dropped before becoming ready",
                )));
            }
        }
    }

    /// Run every destroy hook in exact reverse construction order
    ///
    /// Idempotent: the terminal outcome is recorded once and replayed to
    /// any later call; hooks run at most once each. Hook errors are
    /// reported but do not prevent the Destroyed state.
    pub async fn destroy(&self) -> SignalResult {
        let mut slot = self.teardown.lock().await;
        if let Some(outcome) = slot.as_ref() {
            debug!("Destroy already completed; replaying recorded outcome");
            return outcome.clone();
        }

        self.advance(LifecycleState::DestructionStarted);
        info!(
            components = self.lifecycle.len(),
            "Destroying components in reverse construction order"
        );

        let signals = self.lifecycle.iter().rev().map(|(name, component)| {
            let name = name.clone();
            let component = component.clone();
            async move { (name, component.destroy().await) }
        });
        let results = join_all(signals).await;

        let mut first: Option<Error> = None;
        for (name, result) in results {
            if let Err(cause) = result {
                warn!(
                    component = %name,
                    code = %cause.code(),
                    detail = cause.detail(),
                    "Destroy hook failed"
                );
                if first.is_none() {
                    first = Some(Error::DestructionFailed {
                        component: name,
                        source: Box::new(cause),
                    });
                }
            }
        }

        // Terminal state is reached even when hooks errored; teardown is
        // best-effort so resources never outlive the process silently
        self.advance(LifecycleState::Destroyed);
        let outcome = match first {
            Some(err) => Err(Arc::new(err)),
            None => Ok(()),
        };
        *slot = Some(outcome.clone());
        info!("Runtime destroyed");
        outcome
    }
}

impl Default for LifecycleOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LifecycleOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleOrchestrator")
            .field("state", &self.state())
            .field("lifecycle", &self.lifecycle.len())
            .finish()
    }
}
