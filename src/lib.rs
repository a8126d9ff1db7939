//! Byte LRU - A byte-bounded in-process LRU store
//!
//! Provides O(1) lookup, insert, update and eviction with byte-accounted
//! capacity and an optional eviction callback.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{ByteSize, CacheStats, EvictionCallback, LruStore};
pub use config::Config;
pub use error::{CacheError, Result};
