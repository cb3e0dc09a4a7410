//! Batch Module
//!
//! Accumulates puts and deletes and commits them to the store in one atomic
//! engine write.
//!
//! ## Semantics
//! - Operations are kept in program order; for the same key the last one wins
//! - Nothing reaches the store until [`Batch::write`]
//! - `write` does not clear the batch, so writing again re-applies the same
//!   operations. Use [`Batch::clear`] to start over.
//! - The batch owns its write-options for its whole life

use crate::error::{Result, StoreError};
use crate::native::{WriteBatchHandle, WriteOptionsHandle};
use crate::store::Store;

/// A pending group of writes bound to one store
///
/// Not `Send`: a batch is owned by one caller on the store's thread.
pub struct Batch<'s> {
    store: &'s Store,
    handle: WriteBatchHandle,
    options: WriteOptionsHandle,
}

impl<'s> Batch<'s> {
    pub(crate) fn new(store: &'s Store, options: WriteOptionsHandle) -> Self {
        Self {
            store,
            handle: WriteBatchHandle::create(),
            options,
        }
    }

    /// Queue a put of `value` under `key`
    pub fn put(&mut self, key: &[u8], value: &[u8]) -> &mut Self {
        self.handle.put(key, value);
        self
    }

    /// Queue a delete of `key`
    pub fn delete(&mut self, key: &[u8]) -> &mut Self {
        self.handle.delete(key);
        self
    }

    /// Apply every queued operation atomically
    ///
    /// On failure the engine guarantees none of the operations were applied.
    pub fn write(&self) -> Result<()> {
        self.store
            .apply_batch(&self.options, &self.handle)
            .map_err(|e| {
                tracing::warn!(
                    "Batch of {} operations failed on {}: {}",
                    self.handle.count(),
                    self.store.path().display(),
                    e
                );
                StoreError::write(e)
            })?;
        tracing::debug!(
            "Committed batch of {} operations (sync={})",
            self.handle.count(),
            self.options.sync()
        );
        Ok(())
    }

    /// Number of queued operations
    pub fn len(&self) -> usize {
        self.handle.count()
    }

    pub fn is_empty(&self) -> bool {
        self.handle.count() == 0
    }

    /// Drop every queued operation
    pub fn clear(&mut self) {
        self.handle.clear();
    }
}

impl std::fmt::Debug for Batch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Batch")
            .field("store", &self.store.path())
            .field("operations", &self.handle.count())
            .field("sync", &self.options.sync())
            .finish()
    }
}
