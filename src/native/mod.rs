//! Native Module
//!
//! The narrow boundary to the embedded storage engine.
//!
//! ## Responsibilities
//! - Wrap every engine object in an owning handle whose `Drop` is its destructor
//! - Report failures as a message string and nothing else
//! - Count live handles so tests can prove nothing leaks
//!
//! ## Handles
//! ```text
//! ┌────────────────────┬──────────────────────────────────────────────┐
//! │ Handle             │ Lifetime                                     │
//! ├────────────────────┼──────────────────────────────────────────────┤
//! │ OpenOptionsHandle  │ one open / destroy / repair call             │
//! │ ReadOptionsHandle  │ one get, or one iterator construction        │
//! │ WriteOptionsHandle │ one put / delete, or a Batch's whole life    │
//! │ DbHandle           │ Store open → close (or Store drop)           │
//! │ WriteBatchHandle   │ the owning Batch                             │
//! │ IteratorHandle     │ the owning StoreIterator                     │
//! └────────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Engine objects are not `Send`, so neither is any handle.

mod db;
mod handles;
mod iter;
mod options;

use std::fmt;

pub(crate) use db::{destroy_db, repair_db, DbHandle, WriteBatchHandle};
pub use handles::{live_handles, HandleCounts, HandleKind};
pub(crate) use iter::IteratorHandle;
pub(crate) use options::{OpenOptionsHandle, ReadOptionsHandle, WriteOptionsHandle};

/// A failure reported across the engine boundary
///
/// The engine's only error channel is a message; having one means the call
/// failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeError {
    message: String,
}

impl NativeError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Reported for any call made through a store that has been closed
    pub(crate) fn closed() -> Self {
        Self::new("store is closed")
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for NativeError {}

impl From<rusty_leveldb::Status> for NativeError {
    fn from(status: rusty_leveldb::Status) -> Self {
        Self::new(status.to_string())
    }
}

impl From<std::io::Error> for NativeError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

pub(crate) type NativeResult<T> = std::result::Result<T, NativeError>;
