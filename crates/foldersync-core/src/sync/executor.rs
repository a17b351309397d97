//! Filesystem operations behind each sync action

use std::fs;
use std::io;
use std::path::Path;

use filetime::FileTime;
use walkdir::WalkDir;

use super::actions::SyncAction;
use crate::error::{Result, SyncError};

/// Applies sync actions to the replica tree
pub struct ActionExecutor;

impl ActionExecutor {
    /// Apply a single action
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Copy`] or [`SyncError::Delete`] naming the
    /// paths involved; the caller decides whether to continue with the
    /// remaining actions.
    pub fn execute(action: &SyncAction) -> Result<()> {
        match action {
            SyncAction::CreateFile { source, dest } | SyncAction::UpdateFile { source, dest } => {
                Self::copy_file(source, dest)
            }
            SyncAction::CreateDirectory { source, dest } => Self::copy_tree(source, dest),
            SyncAction::MakeDirectory { path } => {
                fs::create_dir_all(path).map_err(|source| SyncError::Copy {
                    from: path.clone(),
                    to: path.clone(),
                    source,
                })
            }
            SyncAction::DeleteFile { path } => {
                fs::remove_file(path).map_err(|source| SyncError::Delete {
                    path: path.clone(),
                    source,
                })
            }
            SyncAction::DeleteDirectory { path } => {
                fs::remove_dir_all(path).map_err(|source| SyncError::Delete {
                    path: path.clone(),
                    source,
                })
            }
        }
    }

    /// Copy one file, carrying over its modification time
    ///
    /// `fs::copy` preserves permissions; the mtime is restored afterwards
    /// so the replica mirrors the source's metadata where the platform
    /// allows. A failed mtime restore does not fail the copy.
    fn copy_file(source: &Path, dest: &Path) -> Result<()> {
        let copy_err = |e| SyncError::Copy {
            from: source.to_path_buf(),
            to: dest.to_path_buf(),
            source: e,
        };

        fs::copy(source, dest).map_err(copy_err)?;

        if let Ok(metadata) = fs::metadata(source) {
            let mtime = FileTime::from_last_modification_time(&metadata);
            let _ = filetime::set_file_mtime(dest, mtime);
        }

        Ok(())
    }

    /// Copy a whole subtree into the replica
    ///
    /// Directories are yielded before their contents, so every file's
    /// parent exists by the time it is copied.
    fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
        for entry in WalkDir::new(source) {
            let entry = entry.map_err(|e| SyncError::Copy {
                from: source.to_path_buf(),
                to: dest.to_path_buf(),
                source: io::Error::other(e),
            })?;

            let rel = entry.path().strip_prefix(source).unwrap();
            let target = dest.join(rel);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| SyncError::Copy {
                    from: entry.path().to_path_buf(),
                    to: target.clone(),
                    source: e,
                })?;
            } else {
                Self::copy_file(entry.path(), &target)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_action(source: PathBuf, dest: PathBuf) -> SyncAction {
        SyncAction::CreateDirectory { source, dest }
    }

    #[test]
    fn test_copy_tree_basic() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");

        fs::create_dir(&src).unwrap();
        fs::write(src.join("file1.txt"), "content1").unwrap();
        fs::write(src.join("file2.txt"), "content2").unwrap();

        ActionExecutor::execute(&create_action(src, dst.clone())).unwrap();

        assert_eq!(fs::read_to_string(dst.join("file1.txt")).unwrap(), "content1");
        assert_eq!(fs::read_to_string(dst.join("file2.txt")).unwrap(), "content2");
    }

    #[test]
    fn test_copy_tree_nested() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");

        fs::create_dir(&src).unwrap();
        fs::create_dir(src.join("subdir")).unwrap();
        fs::write(src.join("root.txt"), "root").unwrap();
        fs::write(src.join("subdir/nested.txt"), "nested").unwrap();

        ActionExecutor::execute(&create_action(src, dst.clone())).unwrap();

        assert!(dst.join("root.txt").exists());
        assert_eq!(
            fs::read_to_string(dst.join("subdir/nested.txt")).unwrap(),
            "nested"
        );
    }

    #[test]
    fn test_copy_tree_empty_directory() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");

        fs::create_dir(&src).unwrap();

        ActionExecutor::execute(&create_action(src, dst.clone())).unwrap();

        assert!(dst.is_dir());
    }

    #[test]
    fn test_copy_file_preserves_mtime() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        let dst = tmp.path().join("dst.txt");

        fs::write(&src, "content").unwrap();
        let past = FileTime::from_unix_time(1_500_000_000, 0);
        filetime::set_file_mtime(&src, past).unwrap();

        ActionExecutor::execute(&SyncAction::CreateFile {
            source: src,
            dest: dst.clone(),
        })
        .unwrap();

        let copied = FileTime::from_last_modification_time(&fs::metadata(&dst).unwrap());
        assert_eq!(copied, past);
    }

    #[test]
    fn test_make_directory_creates_missing_parents() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b/c");

        ActionExecutor::execute(&SyncAction::MakeDirectory { path: dir.clone() }).unwrap();

        assert!(dir.is_dir());
    }

    #[test]
    fn test_delete_file_and_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("gone.txt");
        let dir = tmp.path().join("gone_dir");

        fs::write(&file, "x").unwrap();
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("inner.txt"), "y").unwrap();

        ActionExecutor::execute(&SyncAction::DeleteFile { path: file.clone() }).unwrap();
        ActionExecutor::execute(&SyncAction::DeleteDirectory { path: dir.clone() }).unwrap();

        assert!(!file.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn test_delete_missing_file_is_delete_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.txt");

        let err = ActionExecutor::execute(&SyncAction::DeleteFile { path: missing }).unwrap_err();
        assert!(matches!(err, SyncError::Delete { .. }));
    }

    #[test]
    fn test_copy_missing_source_is_copy_error() {
        let tmp = TempDir::new().unwrap();

        let err = ActionExecutor::execute(&SyncAction::CreateFile {
            source: tmp.path().join("missing.txt"),
            dest: tmp.path().join("dst.txt"),
        })
        .unwrap_err();
        assert!(matches!(err, SyncError::Copy { .. }));
    }
}
