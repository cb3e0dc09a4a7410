//! Read-time options

use crate::config::Config;
use crate::error::Result;
use crate::native::ReadOptionsHandle;

/// Options for `get` and iterator construction
///
/// Both flags are carried to the engine handle as in the LevelDB read-options
/// API. The bundled engine has no per-read knobs, so today they do not change
/// what a read returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub verify_checksums: bool,
    pub fill_cache: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            verify_checksums: false,
            fill_cache: true,
        }
    }
}

impl ReadOptions {
    pub const VERIFY_CHECKSUMS: &'static str = "verify_checksums";
    pub const FILL_CACHE: &'static str = "fill_cache";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.trace_ignored("read", &[Self::VERIFY_CHECKSUMS, Self::FILL_CACHE]);
        let defaults = Self::default();
        Ok(Self {
            verify_checksums: config
                .get_bool(Self::VERIFY_CHECKSUMS, defaults.verify_checksums)?,
            fill_cache: config.get_bool(Self::FILL_CACHE, defaults.fill_cache)?,
        })
    }

    pub fn verify_checksums(mut self, v: bool) -> Self {
        self.verify_checksums = v;
        self
    }

    pub fn fill_cache(mut self, v: bool) -> Self {
        self.fill_cache = v;
        self
    }

    pub(crate) fn to_native(self) -> ReadOptionsHandle {
        let mut handle = ReadOptionsHandle::create();
        handle.set_verify_checksums(self.verify_checksums);
        handle.set_fill_cache(self.fill_cache);
        handle
    }
}
