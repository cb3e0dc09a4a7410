//! Resource accounting tests
//!
//! Every engine handle is counted while alive. These tests check that each
//! handle is released exactly when its owner says it should be, on success
//! and failure paths alike.
//!
//! Counts are per thread, so every test body runs on a thread of its own.

use stratakv::{destroy_store, live_handles, repair_store, Config, HandleCounts, HandleKind, Store};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn on_fresh_thread<F: FnOnce() + Send + 'static>(f: F) {
    std::thread::spawn(f).join().unwrap();
}

fn create_config() -> Config {
    Config::new().set("create_if_missing", true)
}

fn only_database() -> HandleCounts {
    HandleCounts {
        database: 1,
        ..HandleCounts::default()
    }
}

// =============================================================================
// Store Lifecycle
// =============================================================================

#[test]
fn test_open_releases_open_options() {
    on_fresh_thread(|| {
        let temp_dir = TempDir::new().unwrap();
        assert!(live_handles().is_empty());

        let store = Store::open(temp_dir.path().join("db"), &create_config()).unwrap();
        assert_eq!(live_handles(), only_database());

        drop(store);
        assert!(live_handles().is_empty());
    });
}

#[test]
fn test_failed_open_releases_everything() {
    on_fresh_thread(|| {
        let temp_dir = TempDir::new().unwrap();

        let result = Store::open(temp_dir.path().join("missing"), &Config::new());

        assert!(result.is_err());
        assert!(live_handles().is_empty());
    });
}

#[test]
fn test_invalid_config_creates_nothing() {
    on_fresh_thread(|| {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new().set("create_if_missing", 5u64);

        assert!(Store::open(temp_dir.path().join("db"), &config).is_err());
        assert!(live_handles().is_empty());
    });
}

#[test]
fn test_close_releases_database_once() {
    on_fresh_thread(|| {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open(temp_dir.path().join("db"), &create_config()).unwrap();

        store.close();
        assert!(live_handles().is_empty());

        store.close();
        drop(store);
        assert_eq!(live_handles().get(HandleKind::Database), 0);
    });
}

// =============================================================================
// Point Operations
// =============================================================================

#[test]
fn test_point_operations_release_options() {
    on_fresh_thread(|| {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path().join("db"), &create_config()).unwrap();

        store.put(b"k", b"v", &Config::new()).unwrap();
        assert_eq!(live_handles(), only_database());

        store.get(b"k", &Config::new()).unwrap();
        store.get(b"missing", &Config::new()).unwrap();
        assert_eq!(live_handles(), only_database());

        store.delete(b"k", &Config::new()).unwrap();
        assert_eq!(live_handles(), only_database());
    });
}

#[test]
fn test_failed_operations_release_options() {
    on_fresh_thread(|| {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open(temp_dir.path().join("db"), &create_config()).unwrap();
        store.close();

        assert!(store.get(b"k", &Config::new()).is_err());
        assert!(store.put(b"k", b"v", &Config::new()).is_err());
        assert!(store.delete(b"k", &Config::new()).is_err());
        assert!(store.iterator(&Config::new()).is_err());
        assert!(store.batch(&Config::new()).is_err());

        assert!(live_handles().is_empty());
    });
}

// =============================================================================
// Batch and Iterator
// =============================================================================

#[test]
fn test_batch_holds_write_options_for_its_lifetime() {
    on_fresh_thread(|| {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path().join("db"), &create_config()).unwrap();

        let mut batch = store.batch(&Config::new()).unwrap();
        batch.put(b"a", b"1");
        let during = live_handles();
        assert_eq!(during.write_options, 1);
        assert_eq!(during.write_batch, 1);

        batch.write().unwrap();
        assert_eq!(live_handles(), during);

        drop(batch);
        assert_eq!(live_handles(), only_database());
    });
}

#[test]
fn test_iterator_releases_read_options_at_construction() {
    on_fresh_thread(|| {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open(temp_dir.path().join("db"), &create_config()).unwrap();
        store.put(b"a", b"1", &Config::new()).unwrap();

        let mut iter = store.iterator(&Config::new()).unwrap();
        let during = live_handles();
        assert_eq!(during.iterator, 1);
        assert_eq!(during.read_options, 0);

        iter.seek_to_first();
        assert!(iter.advance().is_some());
        assert!(iter.advance().is_none());

        drop(iter);
        assert_eq!(live_handles(), only_database());
    });
}

#[test]
fn test_many_objects_all_released() {
    on_fresh_thread(|| {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = Store::open(temp_dir.path().join("db"), &create_config()).unwrap();
            let batches: Vec<_> = (0..5).map(|_| store.batch(&Config::new()).unwrap()).collect();
            let iterators: Vec<_> = (0..5)
                .map(|_| store.iterator(&Config::new()).unwrap())
                .collect();

            let during = live_handles();
            assert_eq!(during.write_batch, 5);
            assert_eq!(during.write_options, 5);
            assert_eq!(during.iterator, 5);
            assert_eq!(during.total(), 16);

            drop(iterators);
            drop(batches);
        }
        assert!(live_handles().is_empty());
    });
}

// =============================================================================
// Administrative Calls
// =============================================================================

#[test]
fn test_admin_calls_release_options() {
    on_fresh_thread(|| {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db");
        drop(Store::open(&path, &create_config()).unwrap());

        repair_store(&path, &Config::new()).unwrap();
        assert!(live_handles().is_empty());

        destroy_store(&path, &Config::new()).unwrap();
        assert!(live_handles().is_empty());

        assert!(repair_store(temp_dir.path().join("never"), &Config::new()).is_err());
        assert!(live_handles().is_empty());
    });
}
