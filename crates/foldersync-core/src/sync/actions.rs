//! Reconciliation action vocabulary and per-level planning

use std::fmt;
use std::path::{Path, PathBuf};

use crate::comparison::EntryPartition;

/// A single replica mutation, carrying full paths for audit logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Copy a source-only file into the replica
    CreateFile {
        /// Source file path
        source: PathBuf,
        /// Replica file path
        dest: PathBuf,
    },
    /// Copy a source-only directory subtree into the replica
    CreateDirectory {
        /// Source directory path
        source: PathBuf,
        /// Replica directory path
        dest: PathBuf,
    },
    /// Create a missing replica directory without copying any contents
    MakeDirectory {
        /// Replica directory path
        path: PathBuf,
    },
    /// Delete a replica-only file
    DeleteFile {
        /// Replica file path
        path: PathBuf,
    },
    /// Delete a replica-only directory and all its contents
    DeleteDirectory {
        /// Replica directory path
        path: PathBuf,
    },
    /// Overwrite a common file whose content differs
    UpdateFile {
        /// Source file path
        source: PathBuf,
        /// Replica file path
        dest: PathBuf,
    },
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateFile { source, dest } => {
                write!(f, "Copied file: {} -> {}", source.display(), dest.display())
            }
            Self::CreateDirectory { source, dest } => {
                write!(
                    f,
                    "Copied directory: {} -> {}",
                    source.display(),
                    dest.display()
                )
            }
            Self::MakeDirectory { path } => write!(f, "Created directory: {}", path.display()),
            Self::DeleteFile { path } => write!(f, "Removed file: {}", path.display()),
            Self::DeleteDirectory { path } => write!(f, "Removed directory: {}", path.display()),
            Self::UpdateFile { source, dest } => {
                write!(
                    f,
                    "Updated file: {} -> {}",
                    source.display(),
                    dest.display()
                )
            }
        }
    }
}

/// Expands one level's entry partition into an ordered action list
pub struct ActionPlanner;

impl ActionPlanner {
    /// Plan the mutations for one directory pair, in apply order
    ///
    /// Creations come first, then deletions, then updates. An entry
    /// whose type differs between the trees expands to a deletion of the
    /// stale-typed replica entry followed by a creation of the
    /// correctly-typed source entry.
    #[must_use]
    pub fn plan(
        source_dir: &Path,
        replica_dir: &Path,
        partition: &EntryPartition,
    ) -> Vec<SyncAction> {
        let mut actions = Vec::with_capacity(partition.change_count());

        for name in &partition.source_only {
            actions.push(Self::creation(source_dir.join(name), replica_dir.join(name)));
        }

        for name in &partition.replica_only {
            actions.push(Self::deletion(replica_dir.join(name)));
        }

        for name in &partition.files_modified {
            actions.push(SyncAction::UpdateFile {
                source: source_dir.join(name),
                dest: replica_dir.join(name),
            });
        }

        for name in &partition.type_mismatch {
            actions.push(Self::deletion(replica_dir.join(name)));
            actions.push(Self::creation(source_dir.join(name), replica_dir.join(name)));
        }

        actions
    }

    fn creation(source: PathBuf, dest: PathBuf) -> SyncAction {
        if source.is_dir() {
            SyncAction::CreateDirectory { source, dest }
        } else {
            SyncAction::CreateFile { source, dest }
        }
    }

    fn deletion(path: PathBuf) -> SyncAction {
        if path.is_dir() {
            SyncAction::DeleteDirectory { path }
        } else {
            SyncAction::DeleteFile { path }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use crate::comparison::DirectoryComparator;

    #[test]
    fn test_plan_orders_creations_before_deletions_before_updates() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir(&src).unwrap();
        fs::create_dir(&dst).unwrap();

        fs::write(src.join("added.txt"), "a").unwrap();
        fs::write(dst.join("stale.txt"), "b").unwrap();
        fs::write(src.join("changed.txt"), "one").unwrap();
        fs::write(dst.join("changed.txt"), "two").unwrap();

        let partition = DirectoryComparator::compare(&src, &dst).unwrap();
        let actions = ActionPlanner::plan(&src, &dst, &partition);

        assert_eq!(actions.len(), 3);
        assert!(matches!(actions[0], SyncAction::CreateFile { .. }));
        assert!(matches!(actions[1], SyncAction::DeleteFile { .. }));
        assert!(matches!(actions[2], SyncAction::UpdateFile { .. }));
    }

    #[test]
    fn test_plan_type_mismatch_deletes_then_creates() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir(&src).unwrap();
        fs::create_dir(&dst).unwrap();

        // File in source, directory in replica
        fs::write(src.join("entry"), "now a file").unwrap();
        fs::create_dir(dst.join("entry")).unwrap();

        let partition = DirectoryComparator::compare(&src, &dst).unwrap();
        let actions = ActionPlanner::plan(&src, &dst, &partition);

        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], SyncAction::DeleteDirectory { .. }));
        assert!(matches!(actions[1], SyncAction::CreateFile { .. }));
    }

    #[test]
    fn test_make_directory_display_claims_no_copy() {
        let action = SyncAction::MakeDirectory {
            path: PathBuf::from("/dst/replica"),
        };
        assert_eq!(action.to_string(), "Created directory: /dst/replica");
    }

    #[test]
    fn test_action_display_names_both_paths() {
        let action = SyncAction::CreateFile {
            source: PathBuf::from("/src/a.txt"),
            dest: PathBuf::from("/dst/a.txt"),
        };
        let line = action.to_string();
        assert!(line.contains("/src/a.txt"));
        assert!(line.contains("/dst/a.txt"));
        assert!(line.starts_with("Copied file"));
    }
}
