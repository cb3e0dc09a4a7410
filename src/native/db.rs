//! Engine database and write-batch handles
//!
//! Single puts and deletes go through the engine as one-entry batches so the
//! write-options `sync` flag applies to every write path.

use std::fs;
use std::path::Path;

use rusty_leveldb::{WriteBatch, DB};

use super::handles::{HandleKind, Live};
use super::iter::IteratorHandle;
use super::options::{OpenOptionsHandle, ReadOptionsHandle, WriteOptionsHandle};
use super::{NativeError, NativeResult};

/// An open engine database
pub(crate) struct DbHandle {
    db: DB,
    _live: Live,
}

impl DbHandle {
    /// Open the database at `path`
    ///
    /// The engine creates the directory and its info log before it looks for
    /// an existing store, so both existence checks happen here first. A
    /// rejected open leaves nothing on disk.
    pub(crate) fn open(path: &Path, options: &OpenOptionsHandle) -> NativeResult<Self> {
        let exists = store_exists(path);
        if exists && options.error_if_exists() {
            return Err(NativeError::new(format!(
                "{}: database already exists (error_if_exists is true)",
                path.display()
            )));
        }
        if !exists && !options.create_if_missing() {
            return Err(NativeError::new(format!(
                "{}: database does not exist (create_if_missing is false)",
                path.display()
            )));
        }

        let mut engine_options = options.engine_options();
        engine_options.error_if_exists = false;

        let name = path.to_string_lossy();
        let db = DB::open(&*name, engine_options)?;
        Ok(Self {
            db,
            _live: Live::acquire(HandleKind::Database),
        })
    }

    /// `Ok(None)` when the key is absent; a stored empty value is `Some(vec![])`
    pub(crate) fn get(
        &mut self,
        options: &ReadOptionsHandle,
        key: &[u8],
    ) -> NativeResult<Option<Vec<u8>>> {
        tracing::trace!(
            "engine get ({} bytes, verify_checksums={}, fill_cache={})",
            key.len(),
            options.verify_checksums(),
            options.fill_cache()
        );
        Ok(self.db.get(key).map(|v| v.to_vec()))
    }

    pub(crate) fn put(
        &mut self,
        options: &WriteOptionsHandle,
        key: &[u8],
        value: &[u8],
    ) -> NativeResult<()> {
        let mut batch = WriteBatch::new();
        batch.put(key, value);
        self.db.write(batch, options.sync())?;
        Ok(())
    }

    pub(crate) fn delete(&mut self, options: &WriteOptionsHandle, key: &[u8]) -> NativeResult<()> {
        let mut batch = WriteBatch::new();
        batch.delete(key);
        self.db.write(batch, options.sync())?;
        Ok(())
    }

    /// Apply every operation in `batch` atomically, in order
    pub(crate) fn apply(
        &mut self,
        options: &WriteOptionsHandle,
        batch: &WriteBatchHandle,
    ) -> NativeResult<()> {
        self.db.write(batch.to_engine_batch(), options.sync())?;
        Ok(())
    }

    /// The read-options are only consulted while the iterator is built
    pub(crate) fn create_iterator(
        &mut self,
        _options: &ReadOptionsHandle,
    ) -> NativeResult<IteratorHandle> {
        let iter = self.db.new_iter()?;
        Ok(IteratorHandle::new(iter))
    }
}

// =============================================================================
// Write Batch
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum BatchOp {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

/// Ordered log of pending puts and deletes
///
/// The engine's batch is consumed when applied, so the handle keeps the log
/// and builds a fresh engine batch on every apply. That makes re-applying the
/// same handle possible.
#[derive(Debug)]
pub(crate) struct WriteBatchHandle {
    ops: Vec<BatchOp>,
    _live: Live,
}

impl WriteBatchHandle {
    pub(crate) fn create() -> Self {
        Self {
            ops: Vec::new(),
            _live: Live::acquire(HandleKind::WriteBatch),
        }
    }

    pub(crate) fn put(&mut self, key: &[u8], value: &[u8]) {
        self.ops.push(BatchOp::Put {
            key: key.to_vec(),
            value: value.to_vec(),
        });
    }

    pub(crate) fn delete(&mut self, key: &[u8]) {
        self.ops.push(BatchOp::Delete { key: key.to_vec() });
    }

    pub(crate) fn clear(&mut self) {
        self.ops.clear();
    }

    pub(crate) fn count(&self) -> usize {
        self.ops.len()
    }

    fn to_engine_batch(&self) -> WriteBatch {
        let mut batch = WriteBatch::new();
        for op in &self.ops {
            match op {
                BatchOp::Put { key, value } => batch.put(key, value),
                BatchOp::Delete { key } => batch.delete(key),
            }
        }
        batch
    }
}

// =============================================================================
// Administrative Calls
// =============================================================================

/// Remove every engine file under `path`, then the directory if it is empty
///
/// A path that does not exist is already destroyed. The caller must not hold
/// an open store on `path`.
pub(crate) fn destroy_db(path: &Path, _options: &OpenOptionsHandle) -> NativeResult<()> {
    if !path.exists() {
        return Ok(());
    }
    if !path.is_dir() {
        return Err(NativeError::new(format!(
            "{}: not a store directory",
            path.display()
        )));
    }

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if entry.path().is_file() && is_engine_file(&name) {
            fs::remove_file(entry.path())?;
        }
    }

    if fs::read_dir(path)?.next().is_none() {
        fs::remove_dir(path)?;
    }
    Ok(())
}

/// Reopen the store without creating it so the engine replays its logs
pub(crate) fn repair_db(path: &Path, options: &OpenOptionsHandle) -> NativeResult<()> {
    if !store_exists(path) {
        return Err(NativeError::new(format!(
            "{}: no store to repair",
            path.display()
        )));
    }
    let mut engine_options = options.engine_options();
    engine_options.create_if_missing = false;
    engine_options.error_if_exists = false;
    engine_options.paranoid_checks = false;

    let name = path.to_string_lossy();
    let db = DB::open(&*name, engine_options)?;
    drop(db);
    Ok(())
}

/// A store exists once the engine has written its `CURRENT` pointer
fn store_exists(path: &Path) -> bool {
    path.join("CURRENT").is_file()
}

/// Names the engine gives its own files
fn is_engine_file(name: &str) -> bool {
    matches!(name, "CURRENT" | "LOCK" | "LOG" | "LOG.old")
        || name.starts_with("MANIFEST-")
        || [".log", ".ldb", ".sst", ".dbtmp"]
            .iter()
            .any(|ext| name.ends_with(ext))
}
