//! # StrataKV
//!
//! A safe access layer over an embedded, ordered, LevelDB-style key-value
//! engine:
//! - Open / close a store with deterministic release of the engine handle
//! - Point reads, writes and deletes
//! - Atomic multi-operation batches
//! - Ordered forward and backward iteration
//! - Per-call option objects built from a configuration map
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Caller / CLI                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  Config maps, byte-string keys/values
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                          Store                              │
//! │            (owns the engine handle until close)             │
//! └──────┬──────────────────────┬──────────────────────┬────────┘
//!        │                      │                      │
//!        ▼                      ▼                      ▼
//!  ┌───────────┐         ┌─────────────┐        ┌───────────────┐
//!  │  Options  │         │    Batch    │        │ StoreIterator │
//!  │ (per call)│         │ (borrows    │        │ (borrows      │
//!  └─────┬─────┘         │  the store) │        │  the store)   │
//!        │               └──────┬──────┘        └───────┬───────┘
//!        └──────────────────────┼───────────────────────┘
//!                               ▼
//!                     ┌───────────────────┐
//!                     │  native boundary  │
//!                     │ (handles, errors) │
//!                     └─────────┬─────────┘
//!                               ▼
//!                        embedded engine
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use stratakv::{Config, Store};
//!
//! # fn main() -> stratakv::Result<()> {
//! let store = Store::open("/tmp/demo", &Config::new().set("create_if_missing", true))?;
//! store.put(b"a", b"1", &Config::new())?;
//! assert_eq!(store.get(b"a", &Config::new())?, Some(b"1".to_vec()));
//!
//! let mut batch = store.batch(&Config::new())?;
//! batch.put(b"b", b"2").delete(b"a");
//! batch.write()?;
//!
//! for (key, value) in store.iterator(&Config::new())? {
//!     println!("{:?} = {:?}", key, value);
//! }
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod native;
pub mod options;

pub mod store;
pub mod batch;
pub mod iterator;
pub mod admin;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::{Config, ConfigValue};
pub use options::{OpenOptions, ReadOptions, WriteOptions};
pub use store::Store;
pub use batch::Batch;
pub use iterator::{IteratorState, StoreIterator};
pub use admin::{destroy_store, repair_store};
pub use native::{live_handles, HandleCounts, HandleKind};

/// Raw key bytes
pub type Key = Vec<u8>;

/// Raw value bytes
pub type Value = Vec<u8>;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of StrataKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
