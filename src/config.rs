//! Configuration map for StrataKV
//!
//! Callers describe each operation's options as a small map of named values.
//! The option types in [`crate::options`] read the keys they recognize out of
//! it and ignore the rest.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StoreError};

/// A single configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    Int(u64),
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        ConfigValue::Bool(v)
    }
}

impl From<u64> for ConfigValue {
    fn from(v: u64) -> Self {
        ConfigValue::Int(v)
    }
}

impl From<usize> for ConfigValue {
    fn from(v: usize) -> Self {
        ConfigValue::Int(v as u64)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Int(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for ConfigValue {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "true" => Ok(ConfigValue::Bool(true)),
            "false" => Ok(ConfigValue::Bool(false)),
            other => other
                .parse::<u64>()
                .map(ConfigValue::Int)
                .map_err(|_| format!("`{other}` is neither a boolean nor an unsigned integer")),
        }
    }
}

/// Caller-supplied configuration map
///
/// Keys are kept in sorted order so that logging and `Display` are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    values: BTreeMap<String, ConfigValue>,
}

impl Config {
    /// Create an empty config (every option at its default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing any previous value
    pub fn set(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Insert a key in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Parse a `key=value` pair and insert it
    pub fn insert_pair(&mut self, pair: &str) -> std::result::Result<(), String> {
        let (key, value) = parse_pair(pair)?;
        self.values.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        self.values.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Read a boolean option, falling back to `default` when unset
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        match self.values.get(key) {
            None => Ok(default),
            Some(ConfigValue::Bool(b)) => Ok(*b),
            Some(ConfigValue::Int(_)) => Err(StoreError::InvalidOption {
                key: key.to_string(),
                expected: "a boolean",
            }),
        }
    }

    /// Read a size option; `None` when unset
    pub fn get_usize(&self, key: &str) -> Result<Option<usize>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ConfigValue::Int(n)) => usize::try_from(*n).map(Some).map_err(|_| {
                StoreError::InvalidOption {
                    key: key.to_string(),
                    expected: "an integer that fits in usize",
                }
            }),
            Some(ConfigValue::Bool(_)) => Err(StoreError::InvalidOption {
                key: key.to_string(),
                expected: "an unsigned integer",
            }),
        }
    }

    /// Log every key not listed in `known`
    pub(crate) fn trace_ignored(&self, kind: &str, known: &[&str]) {
        for key in self.keys().filter(|k| !known.contains(k)) {
            tracing::debug!("Ignoring unrecognized {} option `{}`", kind, key);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Config
where
    K: Into<String>,
    V: Into<ConfigValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, v) in &self.values {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{k}={v}")?;
            first = false;
        }
        Ok(())
    }
}

/// Split `key=value` into its parts
pub fn parse_pair(pair: &str) -> std::result::Result<(String, ConfigValue), String> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{pair}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty option name in `{pair}`"));
    }
    Ok((key.to_string(), value.parse()?))
}
