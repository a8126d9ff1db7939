//! Cache Module
//!
//! Provides a byte-bounded in-memory store with LRU eviction.

mod entry;
mod lru;
mod size;
mod stats;
mod store;


// Re-export public types
pub(crate) use entry::Entry;
pub(crate) use lru::{NodeId, RecencyList};
pub use size::ByteSize;
pub use stats::CacheStats;
pub use store::{EvictionCallback, LruStore};
