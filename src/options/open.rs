//! Open-time options

use crate::config::Config;
use crate::error::Result;
use crate::native::OpenOptionsHandle;

/// Options used when opening, destroying or repairing a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOptions {
    /// Create a new store at the path if none exists
    pub create_if_missing: bool,

    /// Fail if a store already exists at the path
    pub error_if_exists: bool,

    /// Snappy block compression
    pub compression: bool,

    /// Aggressive consistency checking while opening
    pub paranoid_checks: bool,

    /// Memtable size before it is written out (engine default when unset)
    pub write_buffer_size: Option<usize>,

    pub max_open_files: Option<usize>,

    /// Approximate uncompressed data block size (engine default when unset)
    pub block_size: Option<usize>,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            create_if_missing: false,
            error_if_exists: false,
            compression: true,
            paranoid_checks: false,
            write_buffer_size: None,
            max_open_files: None,
            block_size: None,
        }
    }
}

impl OpenOptions {
    pub const CREATE_IF_MISSING: &'static str = "create_if_missing";
    pub const ERROR_IF_EXISTS: &'static str = "error_if_exists";
    pub const COMPRESSION: &'static str = "compression";
    pub const PARANOID_CHECKS: &'static str = "paranoid_checks";
    pub const WRITE_BUFFER_SIZE: &'static str = "write_buffer_size";
    pub const MAX_OPEN_FILES: &'static str = "max_open_files";
    pub const BLOCK_SIZE: &'static str = "block_size";

    const KEYS: [&'static str; 7] = [
        Self::CREATE_IF_MISSING,
        Self::ERROR_IF_EXISTS,
        Self::COMPRESSION,
        Self::PARANOID_CHECKS,
        Self::WRITE_BUFFER_SIZE,
        Self::MAX_OPEN_FILES,
        Self::BLOCK_SIZE,
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a config map; unknown keys are ignored
    pub fn from_config(config: &Config) -> Result<Self> {
        config.trace_ignored("open", &Self::KEYS);
        let defaults = Self::default();
        Ok(Self {
            create_if_missing: config
                .get_bool(Self::CREATE_IF_MISSING, defaults.create_if_missing)?,
            error_if_exists: config.get_bool(Self::ERROR_IF_EXISTS, defaults.error_if_exists)?,
            compression: config.get_bool(Self::COMPRESSION, defaults.compression)?,
            paranoid_checks: config.get_bool(Self::PARANOID_CHECKS, defaults.paranoid_checks)?,
            write_buffer_size: config.get_usize(Self::WRITE_BUFFER_SIZE)?,
            max_open_files: config.get_usize(Self::MAX_OPEN_FILES)?,
            block_size: config.get_usize(Self::BLOCK_SIZE)?,
        })
    }

    pub fn create_if_missing(mut self, v: bool) -> Self {
        self.create_if_missing = v;
        self
    }

    pub fn error_if_exists(mut self, v: bool) -> Self {
        self.error_if_exists = v;
        self
    }

    pub fn compression(mut self, v: bool) -> Self {
        self.compression = v;
        self
    }

    pub fn paranoid_checks(mut self, v: bool) -> Self {
        self.paranoid_checks = v;
        self
    }

    pub fn write_buffer_size(mut self, bytes: usize) -> Self {
        self.write_buffer_size = Some(bytes);
        self
    }

    pub fn max_open_files(mut self, count: usize) -> Self {
        self.max_open_files = Some(count);
        self
    }

    pub fn block_size(mut self, bytes: usize) -> Self {
        self.block_size = Some(bytes);
        self
    }

    /// Build the short-lived engine handle for one call
    pub(crate) fn to_native(&self) -> OpenOptionsHandle {
        let mut handle = OpenOptionsHandle::create();
        handle.set_create_if_missing(self.create_if_missing);
        handle.set_error_if_exists(self.error_if_exists);
        handle.set_compression(self.compression);
        handle.set_paranoid_checks(self.paranoid_checks);
        if let Some(bytes) = self.write_buffer_size {
            handle.set_write_buffer_size(bytes);
        }
        if let Some(count) = self.max_open_files {
            handle.set_max_open_files(count);
        }
        if let Some(bytes) = self.block_size {
            handle.set_block_size(bytes);
        }
        handle
    }
}
