//! # foldersync-core
//!
//! Core library for one-way periodic folder synchronization.
//!
//! The source tree is read-only ground truth; the replica tree is fully
//! owned mutable state. Each reconciliation pass re-derives everything
//! from the filesystem: entries present only in the source are copied
//! into the replica, entries present only in the replica are deleted,
//! and common files whose content digests differ are overwritten.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comparison;
pub mod error;
pub mod sync;
