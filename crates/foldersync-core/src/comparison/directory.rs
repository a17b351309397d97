//! Single-level directory comparison
//!
//! Partitions the immediate entries of a source/replica directory pair
//! into disjoint sets. Recursion into common subdirectories is driven by
//! the reconciler, one level at a time, so this module never walks more
//! than a single directory depth per call.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use super::hash::FileHasher;
use crate::error::{Result, SyncError};

/// Result of comparing the immediate entries of one directory pair
///
/// Every immediate child name of either directory lands in exactly one
/// set. Names are kept in listing order (sorted, via `BTreeMap`), so a
/// pass over the same trees produces the same partition.
#[derive(Debug, Default)]
pub struct EntryPartition {
    /// Entries present only in the source (to be created in the replica)
    pub source_only: Vec<OsString>,
    /// Entries present only in the replica (to be deleted)
    pub replica_only: Vec<OsString>,
    /// Common files with equal content digests (no action)
    pub files_identical: Vec<OsString>,
    /// Common files whose content digests differ (to be overwritten)
    pub files_modified: Vec<OsString>,
    /// Names that are directories on both sides (recursed into)
    pub common_dirs: Vec<OsString>,
    /// Names that are a file on one side and a directory on the other
    pub type_mismatch: Vec<OsString>,
    /// Common files that could not be hashed this pass
    ///
    /// Each entry is skipped for the cycle and surfaced to the reporter;
    /// the next cycle re-reads it from scratch.
    pub read_failures: Vec<SyncError>,
}

impl EntryPartition {
    /// Whether the pair needs no actions at this level
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.source_only.is_empty()
            && self.replica_only.is_empty()
            && self.files_modified.is_empty()
            && self.type_mismatch.is_empty()
    }

    /// Number of entries requiring an action at this level
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.source_only.len()
            + self.replica_only.len()
            + self.files_modified.len()
            + self.type_mismatch.len()
    }
}

/// Directory comparator for one level of a tree pair
pub struct DirectoryComparator;

impl DirectoryComparator {
    /// Partition the immediate entries of `source` and `replica`
    ///
    /// `source` must be a readable directory. `replica` may be absent;
    /// it is then treated as having zero entries, classifying every
    /// source entry as `source_only`.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Listing`] if either directory cannot be
    /// enumerated (permission denied, vanished mid-scan). A hash failure
    /// on a single common file is not an error for the whole level; it
    /// is recorded in [`EntryPartition::read_failures`] instead.
    pub fn compare(source: &Path, replica: &Path) -> Result<EntryPartition> {
        let source_entries = Self::list_entries(source)?;
        let replica_entries = if replica.exists() {
            Self::list_entries(replica)?
        } else {
            BTreeMap::new()
        };

        let mut partition = EntryPartition::default();

        for (name, &source_is_dir) in &source_entries {
            match replica_entries.get(name) {
                None => partition.source_only.push(name.clone()),
                Some(&replica_is_dir) => match (source_is_dir, replica_is_dir) {
                    (true, true) => partition.common_dirs.push(name.clone()),
                    (false, false) => {
                        match FileHasher::contents_differ(&source.join(name), &replica.join(name)) {
                            Ok(true) => partition.files_modified.push(name.clone()),
                            Ok(false) => partition.files_identical.push(name.clone()),
                            Err(err) => partition.read_failures.push(err),
                        }
                    }
                    _ => partition.type_mismatch.push(name.clone()),
                },
            }
        }

        for name in replica_entries.keys() {
            if !source_entries.contains_key(name) {
                partition.replica_only.push(name.clone());
            }
        }

        Ok(partition)
    }

    /// List immediate entries of a directory as name -> is_directory
    fn list_entries(dir: &Path) -> Result<BTreeMap<OsString, bool>> {
        let listing_err = |source| SyncError::Listing {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = BTreeMap::new();
        for entry in fs::read_dir(dir).map_err(listing_err)? {
            let entry = entry.map_err(listing_err)?;
            let file_type = entry.file_type().map_err(listing_err)?;
            entries.insert(entry.file_name(), file_type.is_dir());
        }
        Ok(entries)
    }
}
