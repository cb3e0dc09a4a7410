//! Tests for Config and the option types
//!
//! These tests verify:
//! - Defaults when a key is unset
//! - Translation of recognized keys
//! - Unrecognized keys are ignored
//! - Type mismatches are reported
//! - key=value parsing used by the CLI

use stratakv::config::parse_pair;
use stratakv::{Config, ConfigValue, OpenOptions, ReadOptions, StoreError, WriteOptions};

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_set_and_get() {
    let config = Config::new().set("a", true).set("b", 7u64);

    assert_eq!(config.get("a"), Some(ConfigValue::Bool(true)));
    assert_eq!(config.get("b"), Some(ConfigValue::Int(7)));
    assert_eq!(config.get("c"), None);
    assert!(!config.is_empty());
}

#[test]
fn test_config_set_replaces() {
    let config = Config::new().set("sync", true).set("sync", false);

    assert!(!config.get_bool("sync", true).unwrap());
}

#[test]
fn test_config_from_iterator() {
    let config: Config = vec![("sync", true), ("fill_cache", false)].into_iter().collect();

    assert_eq!(config.get("sync"), Some(ConfigValue::Bool(true)));
    assert_eq!(config.get("fill_cache"), Some(ConfigValue::Bool(false)));
}

#[test]
fn test_config_display_is_sorted() {
    let config = Config::new().set("z", 1u64).set("a", true);

    assert_eq!(config.to_string(), "a=true,z=1");
}

#[test]
fn test_config_value_from_str() {
    assert_eq!("true".parse::<ConfigValue>(), Ok(ConfigValue::Bool(true)));
    assert_eq!("false".parse::<ConfigValue>(), Ok(ConfigValue::Bool(false)));
    assert_eq!("4096".parse::<ConfigValue>(), Ok(ConfigValue::Int(4096)));
    assert!("yes".parse::<ConfigValue>().is_err());
    assert!("-1".parse::<ConfigValue>().is_err());
}

#[test]
fn test_parse_pair() {
    assert_eq!(
        parse_pair("block_size=8192"),
        Ok(("block_size".to_string(), ConfigValue::Int(8192)))
    );
    assert_eq!(
        parse_pair(" sync =true"),
        Ok(("sync".to_string(), ConfigValue::Bool(true)))
    );
    assert!(parse_pair("sync").is_err());
    assert!(parse_pair("=true").is_err());
    assert!(parse_pair("sync=maybe").is_err());
}

#[test]
fn test_insert_pair() {
    let mut config = Config::new();
    config.insert_pair("max_open_files=100").unwrap();

    assert_eq!(config.get_usize("max_open_files").unwrap(), Some(100));
    assert!(config.insert_pair("bogus").is_err());
}

#[test]
fn test_get_usize_rejects_bool() {
    let config = Config::new().set("block_size", true);

    let err = config.get_usize("block_size").unwrap_err();

    assert!(matches!(err, StoreError::InvalidOption { ref key, .. } if key == "block_size"));
    assert_eq!(err.message(), None);
}

// =============================================================================
// OpenOptions Tests
// =============================================================================

#[test]
fn test_open_options_defaults() {
    let options = OpenOptions::from_config(&Config::new()).unwrap();

    assert_eq!(options, OpenOptions::default());
    assert!(!options.create_if_missing);
    assert!(!options.error_if_exists);
    assert!(options.compression);
    assert!(!options.paranoid_checks);
    assert_eq!(options.write_buffer_size, None);
}

#[test]
fn test_open_options_from_config() {
    let config = Config::new()
        .set(OpenOptions::CREATE_IF_MISSING, true)
        .set(OpenOptions::ERROR_IF_EXISTS, true)
        .set(OpenOptions::COMPRESSION, false)
        .set(OpenOptions::PARANOID_CHECKS, true)
        .set(OpenOptions::WRITE_BUFFER_SIZE, 1usize << 20)
        .set(OpenOptions::MAX_OPEN_FILES, 64u64)
        .set(OpenOptions::BLOCK_SIZE, 8192u64);

    let options = OpenOptions::from_config(&config).unwrap();

    let expected = OpenOptions::new()
        .create_if_missing(true)
        .error_if_exists(true)
        .compression(false)
        .paranoid_checks(true)
        .write_buffer_size(1 << 20)
        .max_open_files(64)
        .block_size(8192);
    assert_eq!(options, expected);
}

#[test]
fn test_open_options_ignore_unknown_keys() {
    let config = Config::new()
        .set("create_if_missing", true)
        .set("sync", true)
        .set("totally_unknown", 3u64);

    let options = OpenOptions::from_config(&config).unwrap();

    assert_eq!(options, OpenOptions::new().create_if_missing(true));
}

#[test]
fn test_open_options_type_mismatch() {
    let config = Config::new().set("compression", 1u64);

    let err = OpenOptions::from_config(&config).unwrap_err();

    assert_eq!(
        err,
        StoreError::InvalidOption {
            key: "compression".to_string(),
            expected: "a boolean",
        }
    );
}

// =============================================================================
// Read / Write Options Tests
// =============================================================================

#[test]
fn test_read_options() {
    assert_eq!(
        ReadOptions::from_config(&Config::new()).unwrap(),
        ReadOptions::default()
    );
    assert!(ReadOptions::default().fill_cache);
    assert!(!ReadOptions::default().verify_checksums);

    let config = Config::new()
        .set(ReadOptions::VERIFY_CHECKSUMS, true)
        .set(ReadOptions::FILL_CACHE, false)
        .set("create_if_missing", true);
    let options = ReadOptions::from_config(&config).unwrap();

    assert_eq!(options, ReadOptions::new().verify_checksums(true).fill_cache(false));
}

#[test]
fn test_write_options() {
    assert!(!WriteOptions::from_config(&Config::new()).unwrap().sync);

    let options = WriteOptions::from_config(&Config::new().set(WriteOptions::SYNC, true)).unwrap();
    assert_eq!(options, WriteOptions::new().sync(true));

    let err = WriteOptions::from_config(&Config::new().set("sync", 1u64)).unwrap_err();
    assert!(matches!(err, StoreError::InvalidOption { .. }));
}
