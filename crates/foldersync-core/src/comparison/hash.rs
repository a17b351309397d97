//! File hashing for content comparison using SHA-256
//!
//! Digests are recomputed from scratch on every comparison; nothing is
//! cached across reconciliation cycles. Equal digests are taken as
//! "files identical" rather than falling back to a byte-by-byte check.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, SyncError};

/// Digest of a file's full byte content
pub type FileDigest = [u8; 32];

/// Streaming file hasher
pub struct FileHasher;

impl FileHasher {
    /// Compute the SHA-256 digest of a file by streaming its contents
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Read`] if the file cannot be opened or read.
    pub fn hash(path: &Path) -> Result<FileDigest> {
        let file = File::open(path).map_err(|source| SyncError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = BufReader::new(file);
        let mut hasher = Sha256::new();
        let mut buffer = [0; 8192]; // 8KB buffer for streaming

        loop {
            let bytes_read = reader.read(&mut buffer).map_err(|source| SyncError::Read {
                path: path.to_path_buf(),
                source,
            })?;

            if bytes_read == 0 {
                break;
            }

            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize().into())
    }

    /// Whether two files' content digests differ
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Read`] if either file cannot be read, for
    /// example when it was deleted between listing and hashing.
    pub fn contents_differ(a: &Path, b: &Path) -> Result<bool> {
        Ok(Self::hash(a)? != Self::hash(b)?)
    }
}
