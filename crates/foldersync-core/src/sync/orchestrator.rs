//! Reconciliation of a replica tree against its source

use std::fs;
use std::path::{Path, PathBuf};

use super::SyncReport;
use super::actions::{ActionPlanner, SyncAction};
use super::executor::ActionExecutor;
use super::reporting::Reporter;
use crate::comparison::DirectoryComparator;
use crate::error::{Result, SyncError};

/// One-way reconciler: mutates the replica tree to match the source
///
/// Processing is single-threaded, depth-first and top-down: each
/// directory pair is fully reconciled before any of its common
/// subdirectories, so creations and deletions at a level always precede
/// work at deeper levels. Pending pairs live on an explicit work stack,
/// so traversal depth is bounded by tree depth, not the call stack.
pub struct Reconciler;

impl Reconciler {
    /// Run one full reconciliation pass over the tree pair
    ///
    /// Per-entry and per-subtree failures are reported and tallied in the
    /// returned [`SyncReport`], never fatal; a failed subtree does not
    /// stop its siblings. Running a second pass over a converged pair
    /// performs zero actions.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::SourceMissing`] if `source` is not a
    /// directory. This is the only hard error.
    pub fn reconcile(
        source: &Path,
        replica: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<SyncReport> {
        if !source.is_dir() {
            return Err(SyncError::SourceMissing {
                path: source.to_path_buf(),
            });
        }

        let mut report = SyncReport::default();

        // The replica root is created on demand; deeper levels always
        // exist by the time traversal reaches them.
        if !replica.exists() {
            match fs::create_dir_all(replica) {
                Ok(()) => {
                    let action = SyncAction::MakeDirectory {
                        path: replica.to_path_buf(),
                    };
                    reporter.action(&action);
                    report.record(&action);
                }
                Err(e) => {
                    let err = SyncError::Copy {
                        from: source.to_path_buf(),
                        to: replica.to_path_buf(),
                        source: e,
                    };
                    reporter.failure(&err);
                    report.record_failure(&err);
                    return Ok(report);
                }
            }
        }

        let mut pending = vec![(source.to_path_buf(), replica.to_path_buf())];
        while let Some((source_dir, replica_dir)) = pending.pop() {
            Self::reconcile_level(&source_dir, &replica_dir, reporter, &mut report, &mut pending);
        }

        Ok(report)
    }

    /// Reconcile one directory pair and queue its common subdirectories
    fn reconcile_level(
        source: &Path,
        replica: &Path,
        reporter: &mut dyn Reporter,
        report: &mut SyncReport,
        pending: &mut Vec<(PathBuf, PathBuf)>,
    ) {
        let partition = match DirectoryComparator::compare(source, replica) {
            Ok(partition) => partition,
            Err(err) => {
                // Skip this subtree for the cycle; siblings continue.
                reporter.failure(&err);
                report.record_failure(&err);
                return;
            }
        };

        for err in &partition.read_failures {
            reporter.failure(err);
            report.record_failure(err);
        }

        for action in ActionPlanner::plan(source, replica, &partition) {
            match ActionExecutor::execute(&action) {
                Ok(()) => {
                    reporter.action(&action);
                    report.record(&action);
                }
                Err(err) => {
                    reporter.failure(&err);
                    report.record_failure(&err);
                }
            }
        }

        // Reversed so popping preserves the sorted listing order
        for name in partition.common_dirs.iter().rev() {
            pending.push((source.join(name), replica.join(name)));
        }
    }
}
