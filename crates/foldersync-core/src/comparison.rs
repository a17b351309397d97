//! Directory and file content comparison
//!
//! This module provides the read-only half of a reconciliation pass:
//! - Single-level partitioning of a directory pair's immediate entries
//! - Content equality via streaming SHA-256 digests
//!
//! Nothing here mutates the filesystem; applying the partition is the
//! job of the [`crate::sync`] module.

mod directory;
mod hash;

pub use directory::{DirectoryComparator, EntryPartition};
pub use hash::{FileDigest, FileHasher};
