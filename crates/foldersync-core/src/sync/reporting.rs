//! Action and failure reporting
//!
//! The reconciler reports through an injected trait object rather than a
//! process-wide logger, so tests capture events directly instead of
//! parsing log output.

use tracing::{info, warn};

use super::actions::SyncAction;
use crate::error::SyncError;

/// Sink for per-action progress lines and per-failure diagnostics
pub trait Reporter {
    /// Called once, synchronously, for each applied action
    fn action(&mut self, action: &SyncAction);

    /// Called once for each failure that was skipped over
    fn failure(&mut self, error: &SyncError);
}

/// Reporter that forwards to the active `tracing` subscriber
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn action(&mut self, action: &SyncAction) {
        info!("{action}");
    }

    fn failure(&mut self, error: &SyncError) {
        warn!("{error}");
    }
}

/// Reporter that records events in memory
#[derive(Debug, Default)]
pub struct CollectingReporter {
    /// Applied actions, in apply order
    pub actions: Vec<SyncAction>,
    /// Rendered failure messages, in report order
    pub failures: Vec<String>,
}

impl Reporter for CollectingReporter {
    fn action(&mut self, action: &SyncAction) {
        self.actions.push(action.clone());
    }

    fn failure(&mut self, error: &SyncError) {
        self.failures.push(error.to_string());
    }
}
