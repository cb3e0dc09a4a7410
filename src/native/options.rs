//! Engine option handles
//!
//! The engine only has a native object for open-time options. Read and write
//! options are plain values in the engine API, but they get the same handle
//! discipline here so every call site treats all three alike.

use rusty_leveldb::{CompressionType, Options};

use super::handles::{HandleKind, Live};

/// Engine open-options
pub(crate) struct OpenOptionsHandle {
    inner: Options,
    _live: Live,
}

impl OpenOptionsHandle {
    /// Engine defaults: no create, no exists check, Snappy compression
    pub(crate) fn create() -> Self {
        Self {
            inner: Options::default(),
            _live: Live::acquire(HandleKind::OpenOptions),
        }
    }

    pub(crate) fn set_create_if_missing(&mut self, v: bool) {
        self.inner.create_if_missing = v;
    }

    pub(crate) fn set_error_if_exists(&mut self, v: bool) {
        self.inner.error_if_exists = v;
    }

    pub(crate) fn set_compression(&mut self, enabled: bool) {
        self.inner.compression_type = if enabled {
            CompressionType::CompressionSnappy
        } else {
            CompressionType::CompressionNone
        };
    }

    pub(crate) fn set_paranoid_checks(&mut self, v: bool) {
        self.inner.paranoid_checks = v;
    }

    pub(crate) fn set_write_buffer_size(&mut self, bytes: usize) {
        self.inner.write_buffer_size = bytes;
    }

    pub(crate) fn set_max_open_files(&mut self, count: usize) {
        self.inner.max_open_files = count;
    }

    pub(crate) fn set_block_size(&mut self, bytes: usize) {
        self.inner.block_size = bytes;
    }

    pub(crate) fn create_if_missing(&self) -> bool {
        self.inner.create_if_missing
    }

    pub(crate) fn error_if_exists(&self) -> bool {
        self.inner.error_if_exists
    }

    /// The engine consumes its options by value on open
    pub(crate) fn engine_options(&self) -> Options {
        self.inner.clone()
    }
}

/// Engine read-options
#[derive(Debug)]
pub(crate) struct ReadOptionsHandle {
    verify_checksums: bool,
    fill_cache: bool,
    _live: Live,
}

impl ReadOptionsHandle {
    pub(crate) fn create() -> Self {
        Self {
            verify_checksums: false,
            fill_cache: true,
            _live: Live::acquire(HandleKind::ReadOptions),
        }
    }

    pub(crate) fn set_verify_checksums(&mut self, v: bool) {
        self.verify_checksums = v;
    }

    pub(crate) fn set_fill_cache(&mut self, v: bool) {
        self.fill_cache = v;
    }

    pub(crate) fn verify_checksums(&self) -> bool {
        self.verify_checksums
    }

    pub(crate) fn fill_cache(&self) -> bool {
        self.fill_cache
    }
}

/// Engine write-options
#[derive(Debug)]
pub(crate) struct WriteOptionsHandle {
    sync: bool,
    _live: Live,
}

impl WriteOptionsHandle {
    pub(crate) fn create() -> Self {
        Self {
            sync: false,
            _live: Live::acquire(HandleKind::WriteOptions),
        }
    }

    pub(crate) fn set_sync(&mut self, v: bool) {
        self.sync = v;
    }

    pub(crate) fn sync(&self) -> bool {
        self.sync
    }
}
