//! Store Module
//!
//! The owning wrapper around an open engine database.
//!
//! ## Responsibilities
//! - Own the engine handle from `open` until `close` or drop
//! - Translate each call's config into a native options handle and release it
//!   when the call returns
//! - Hand out `Batch` and `StoreIterator` objects that borrow the store
//!
//! ## Concurrency Model
//!
//! Every call is synchronous and blocks on the engine. The engine handle is
//! not `Send`, so a `Store` stays on the thread that opened it. Batches and
//! iterators borrow the store, which means:
//! - they cannot outlive it
//! - `close` (which takes `&mut self`) cannot run while any of them exist
//!
//! No locking is added on top of what the engine already does.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::batch::Batch;
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::iterator::StoreIterator;
use crate::native::{DbHandle, NativeError, NativeResult, WriteBatchHandle, WriteOptionsHandle};
use crate::options::{OpenOptions, ReadOptions, WriteOptions};
use crate::{Key, Value};

/// An open key-value store
pub struct Store {
    /// Location of the store on disk
    path: PathBuf,

    /// Engine handle; `None` once closed
    db: RefCell<Option<DbHandle>>,
}

impl Store {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open the store at `path`
    ///
    /// Recognized keys: `create_if_missing`, `error_if_exists`, `compression`,
    /// plus the tuning keys of [`OpenOptions`].
    pub fn open(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let options = OpenOptions::from_config(config)?;
        Self::open_with(path, &options)
    }

    /// Open the store at `path` with typed options
    pub fn open_with(path: impl AsRef<Path>, options: &OpenOptions) -> Result<Self> {
        let path = path.as_ref();
        let native_options = options.to_native();
        let db = DbHandle::open(path, &native_options).map_err(|e| {
            tracing::warn!("Failed to open store at {}: {}", path.display(), e);
            StoreError::open(e)
        })?;
        drop(native_options);

        tracing::debug!(
            "Opened store at {} (create_if_missing={}, error_if_exists={}, compression={})",
            path.display(),
            options.create_if_missing,
            options.error_if_exists,
            options.compression
        );

        Ok(Self {
            path: path.to_path_buf(),
            db: RefCell::new(Some(db)),
        })
    }

    /// Release the engine handle
    ///
    /// On-disk state is kept. Closing an already closed store does nothing.
    pub fn close(&mut self) {
        if let Some(db) = self.db.get_mut().take() {
            drop(db);
            tracing::debug!("Closed store at {}", self.path.display());
        }
    }

    pub fn is_closed(&self) -> bool {
        self.db.borrow().is_none()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Point Operations
    // =========================================================================

    /// Look up `key`
    ///
    /// `Ok(None)` means the key is absent. A key stored with an empty value
    /// comes back as `Ok(Some(vec![]))`.
    pub fn get(&self, key: &[u8], config: &Config) -> Result<Option<Value>> {
        let options = ReadOptions::from_config(config)?;
        self.get_with(key, &options)
    }

    pub fn get_with(&self, key: &[u8], options: &ReadOptions) -> Result<Option<Value>> {
        let native_options = options.to_native();
        let value = self
            .with_db(|db| db.get(&native_options, key))
            .map_err(|e| {
                tracing::warn!("Get failed on {}: {}", self.path.display(), e);
                StoreError::read(e)
            })?;
        tracing::trace!(
            "get {} bytes -> {}",
            key.len(),
            if value.is_some() { "found" } else { "absent" }
        );
        Ok(value)
    }

    /// Store `value` under `key`
    ///
    /// Recognized keys: `sync`.
    pub fn put(&self, key: &[u8], value: &[u8], config: &Config) -> Result<()> {
        let options = WriteOptions::from_config(config)?;
        self.put_with(key, value, &options)
    }

    pub fn put_with(&self, key: &[u8], value: &[u8], options: &WriteOptions) -> Result<()> {
        let native_options = options.to_native();
        self.with_db(|db| db.put(&native_options, key, value))
            .map_err(|e| {
                tracing::warn!("Put failed on {}: {}", self.path.display(), e);
                StoreError::write(e)
            })?;
        tracing::trace!("put {} bytes key, {} bytes value", key.len(), value.len());
        Ok(())
    }

    /// Remove `key`; removing an absent key succeeds
    pub fn delete(&self, key: &[u8], config: &Config) -> Result<()> {
        let options = WriteOptions::from_config(config)?;
        self.delete_with(key, &options)
    }

    pub fn delete_with(&self, key: &[u8], options: &WriteOptions) -> Result<()> {
        let native_options = options.to_native();
        self.with_db(|db| db.delete(&native_options, key))
            .map_err(|e| {
                tracing::warn!("Delete failed on {}: {}", self.path.display(), e);
                StoreError::write(e)
            })?;
        tracing::trace!("delete {} bytes key", key.len());
        Ok(())
    }

    // =========================================================================
    // Factories
    // =========================================================================

    /// Start an empty batch that commits with write-options built from `config`
    pub fn batch(&self, config: &Config) -> Result<Batch<'_>> {
        let options = WriteOptions::from_config(config)?;
        self.batch_with(&options)
    }

    pub fn batch_with(&self, options: &WriteOptions) -> Result<Batch<'_>> {
        if self.is_closed() {
            return Err(StoreError::batch(NativeError::closed()));
        }
        Ok(Batch::new(self, options.to_native()))
    }

    /// Create an unpositioned iterator over the whole key space
    pub fn iterator(&self, config: &Config) -> Result<StoreIterator<'_>> {
        let options = ReadOptions::from_config(config)?;
        self.iterator_with(&options)
    }

    pub fn iterator_with(&self, options: &ReadOptions) -> Result<StoreIterator<'_>> {
        // The read-options handle is released as soon as the iterator exists
        let handle = {
            let native_options = options.to_native();
            self.with_db(|db| db.create_iterator(&native_options))
                .map_err(StoreError::iterator)?
        };
        Ok(StoreIterator::new(self, handle))
    }

    /// Collect every entry in key order
    pub fn entries(&self) -> Result<Vec<(Key, Value)>> {
        Ok(self.iterator_with(&ReadOptions::default())?.collect())
    }

    // =========================================================================
    // Crate-internal Access
    // =========================================================================

    /// Commit a batch's operations with the batch's own write-options
    pub(crate) fn apply_batch(
        &self,
        options: &WriteOptionsHandle,
        batch: &WriteBatchHandle,
    ) -> NativeResult<()> {
        self.with_db(|db| db.apply(options, batch))
    }

    /// Run `f` against the engine handle, or fail if the store is closed
    fn with_db<T>(&self, f: impl FnOnce(&mut DbHandle) -> NativeResult<T>) -> NativeResult<T> {
        match self.db.borrow_mut().as_mut() {
            Some(db) => f(db),
            None => Err(NativeError::closed()),
        }
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("closed", &self.is_closed())
            .finish()
    }
}
