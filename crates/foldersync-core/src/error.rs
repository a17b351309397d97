//! Typed errors for reconciliation failures
//!
//! Every variant names the path and the action that failed, so one
//! reported line per error is enough to audit it after the fact.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the core library
pub type Result<T> = std::result::Result<T, SyncError>;

/// A synchronization failure tied to a specific path and action
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source directory does not exist or is not a directory
    #[error("source directory does not exist: {path}")]
    SourceMissing {
        /// Path that was expected to be a readable directory
        path: PathBuf,
    },

    /// A directory's immediate entries could not be enumerated
    #[error("failed to list directory {path}: {source}")]
    Listing {
        /// Directory that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A file could not be opened or read for hashing
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A file or directory subtree could not be copied into the replica
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        /// Source path being copied
        from: PathBuf,
        /// Replica path being written
        to: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A replica entry could not be removed
    #[error("failed to delete {path}: {source}")]
    Delete {
        /// Replica path that could not be removed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}
