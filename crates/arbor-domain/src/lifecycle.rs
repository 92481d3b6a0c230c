//! Global lifecycle state machine values
//!
//! The runtime owns a single, process-wide state that moves strictly
//! forward. The variant order matters: monotonic transitions are enforced
//! with the derived `Ord`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Global lifecycle state of the runtime
///
/// Transitions are one-directional. The only repeatable observation is
/// `Destroyed`: destroy requests after the terminal state replay the
/// recorded outcome without re-running any hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleState {
    /// Registry population has begun
    Bootstrapping,
    /// Descriptors are being collected and filtered
    Scanning,
    /// Configure hooks are running; their join gates the Ready transition
    Configuring,
    /// Every configure hook completed; the context is queryable
    Ready,
    /// Destroy hooks are running in reverse construction order
    DestructionStarted,
    /// Terminal state; the recorded outcome replays to later destroy calls
    Destroyed,
}

impl LifecycleState {
    /// Whether the runtime finished startup
    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }

    /// Whether the runtime reached its terminal state
    pub fn is_destroyed(self) -> bool {
        self == Self::Destroyed
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bootstrapping => "bootstrapping",
            Self::Scanning => "scanning",
            Self::Configuring => "configuring",
            Self::Ready => "ready",
            Self::DestructionStarted => "destruction-started",
            Self::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}
