//! Administrative operations on stores that are not open.
//!
//! Both calls build a short-lived open-options handle from the config and
//! surface any failure as [`StoreError::Admin`].

use std::path::Path;

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::native;
use crate::options::OpenOptions;

/// Delete all on-disk state of the store at `path`
///
/// A path with no store is not an error. Files the engine did not create are
/// left alone, and the directory is removed only when nothing else is in it.
/// No `Store` may be open on `path` while this runs.
pub fn destroy_store(path: impl AsRef<Path>, config: &Config) -> Result<()> {
    let path = path.as_ref();
    let options = OpenOptions::from_config(config)?.to_native();
    native::destroy_db(path, &options).map_err(|e| {
        tracing::warn!("Destroy failed for {}: {}", path.display(), e);
        StoreError::admin(e)
    })?;
    tracing::info!("Destroyed store at {}", path.display());
    Ok(())
}

/// Try to bring a damaged store back to an openable state
///
/// The engine has no separate repair routine; this opens the store without
/// creating it, which replays its logs into fresh tables, and closes it again.
pub fn repair_store(path: impl AsRef<Path>, config: &Config) -> Result<()> {
    let path = path.as_ref();
    let options = OpenOptions::from_config(config)?.to_native();
    native::repair_db(path, &options).map_err(|e| {
        tracing::warn!("Repair failed for {}: {}", path.display(), e);
        StoreError::admin(e)
    })?;
    tracing::info!("Repaired store at {}", path.display());
    Ok(())
}
