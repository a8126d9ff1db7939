//! Configuration Module
//!
//! Handles loading store configuration from environment variables or any
//! serde-compatible source.

use std::env;

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Environment variable holding the byte capacity.
pub const MAX_BYTES_ENV: &str = "LRU_MAX_BYTES";

/// Default capacity when nothing is configured (64 MiB).
pub const DEFAULT_MAX_BYTES: i64 = 64 * 1024 * 1024;

/// Store configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Byte capacity of the store; zero or negative means unbounded
    #[serde(default = "default_max_bytes")]
    pub max_bytes: i64,
}

fn default_max_bytes() -> i64 {
    DEFAULT_MAX_BYTES
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    ///
    /// # Environment Variables
    /// - `LRU_MAX_BYTES` - Byte capacity, `<= 0` for unbounded (default: 64 MiB)
    pub fn from_env() -> Self {
        Self {
            max_bytes: env::var(MAX_BYTES_ENV)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_BYTES),
        }
    }

    /// Like [`Config::from_env`], but rejects a value that is present and
    /// not an integer instead of silently using the default.
    pub fn try_from_env() -> Result<Self> {
        match env::var(MAX_BYTES_ENV) {
            Ok(raw) => Self::parse_max_bytes(&raw).map(|max_bytes| Self { max_bytes }),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse_max_bytes(raw: &str) -> Result<i64> {
        raw.trim().parse().map_err(|_| {
            CacheError::InvalidConfig(format!("{}={:?} is not an integer", MAX_BYTES_ENV, raw))
        })
    }

    /// Returns true when the configured capacity is unbounded.
    pub fn is_unbounded(&self) -> bool {
        self.max_bytes <= 0
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}
