//! One-way tree reconciliation
//!
//! This module applies the partition produced by [`crate::comparison`]
//! to the replica tree: source-only entries are copied in, replica-only
//! entries are deleted, and modified common files are overwritten.
//! Every mutation flows through an injected [`Reporter`].

mod actions;
mod executor;
mod orchestrator;
mod reporting;

pub use actions::{ActionPlanner, SyncAction};
pub use orchestrator::Reconciler;
pub use reporting::{CollectingReporter, Reporter, TracingReporter};

use crate::error::SyncError;

/// Totals for one reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Files copied into the replica
    pub files_created: usize,
    /// Directory subtrees copied into the replica
    pub dirs_created: usize,
    /// Files removed from the replica
    pub files_deleted: usize,
    /// Directory subtrees removed from the replica
    pub dirs_deleted: usize,
    /// Files overwritten with new content
    pub files_updated: usize,
    /// Failures skipped over during the pass
    pub errors: Vec<String>,
}

impl SyncReport {
    /// Total number of replica mutations performed
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.files_created
            + self.dirs_created
            + self.files_deleted
            + self.dirs_deleted
            + self.files_updated
    }

    /// Whether the pass completed without skipped failures
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn record(&mut self, action: &SyncAction) {
        match action {
            SyncAction::CreateFile { .. } => self.files_created += 1,
            SyncAction::CreateDirectory { .. } | SyncAction::MakeDirectory { .. } => {
                self.dirs_created += 1;
            }
            SyncAction::DeleteFile { .. } => self.files_deleted += 1,
            SyncAction::DeleteDirectory { .. } => self.dirs_deleted += 1,
            SyncAction::UpdateFile { .. } => self.files_updated += 1,
        }
    }

    pub(crate) fn record_failure(&mut self, error: &SyncError) {
        self.errors.push(error.to_string());
    }
}
