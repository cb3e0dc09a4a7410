//! Write-time options

use crate::config::Config;
use crate::error::Result;
use crate::native::WriteOptionsHandle;

/// Options for `put`, `delete` and batch commits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Flush the engine's log to disk before the write returns
    pub sync: bool,
}

impl WriteOptions {
    pub const SYNC: &'static str = "sync";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.trace_ignored("write", &[Self::SYNC]);
        Ok(Self {
            sync: config.get_bool(Self::SYNC, false)?,
        })
    }

    pub fn sync(mut self, v: bool) -> Self {
        self.sync = v;
        self
    }

    pub(crate) fn to_native(self) -> WriteOptionsHandle {
        let mut handle = WriteOptionsHandle::create();
        handle.set_sync(self.sync);
        handle
    }
}
