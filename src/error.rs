//! Error types for StrataKV
//!
//! Every failure reported by the engine is a message string. The access layer
//! tags that message with the operation that produced it and hands it to the
//! caller unchanged; nothing is retried.

use thiserror::Error;

use crate::native::NativeError;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for StrataKV operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Engine Errors
    // -------------------------------------------------------------------------
    #[error("Open error: {0}")]
    Open(String),

    #[error("Read error: {0}")]
    Read(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("Batch error: {0}")]
    Batch(String),

    #[error("Iterator error: {0}")]
    Iterator(String),

    /// Destroy / repair failures
    #[error("Admin error: {0}")]
    Admin(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Invalid option `{key}`: expected {expected}")]
    InvalidOption { key: String, expected: &'static str },
}

impl StoreError {
    pub(crate) fn open(e: NativeError) -> Self {
        StoreError::Open(e.into_message())
    }

    pub(crate) fn read(e: NativeError) -> Self {
        StoreError::Read(e.into_message())
    }

    pub(crate) fn write(e: NativeError) -> Self {
        StoreError::Write(e.into_message())
    }

    pub(crate) fn batch(e: NativeError) -> Self {
        StoreError::Batch(e.into_message())
    }

    pub(crate) fn iterator(e: NativeError) -> Self {
        StoreError::Iterator(e.into_message())
    }

    pub(crate) fn admin(e: NativeError) -> Self {
        StoreError::Admin(e.into_message())
    }

    /// The engine message carried by this error, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            StoreError::Open(m)
            | StoreError::Read(m)
            | StoreError::Write(m)
            | StoreError::Batch(m)
            | StoreError::Iterator(m)
            | StoreError::Admin(m) => Some(m),
            StoreError::InvalidOption { .. } => None,
        }
    }
}
