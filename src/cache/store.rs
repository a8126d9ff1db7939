//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with an arena-backed recency
//! list and byte-accounted capacity.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::cache::{ByteSize, CacheStats, Entry, NodeId, RecencyList};
use crate::config::Config;

/// Callback invoked with the key and value of every evicted entry.
pub type EvictionCallback<V> = Box<dyn FnMut(&str, &V)>;

// == Cache Store ==
/// Byte-bounded key-value store with least-recently-used eviction.
///
/// Each entry is charged `key.len() + value.size()` bytes. When a bounded
/// store goes over capacity, entries are evicted from the least recently
/// used end until it fits again. A single entry larger than the whole
/// capacity is still accepted; everything else is evicted and it stays
/// alone over budget.
///
/// The store is not synchronized. Every mutating operation takes
/// `&mut self`, so sharing it across threads requires an outer lock.
pub struct LruStore<V> {
    /// Key to recency-list handle
    index: HashMap<String, NodeId>,
    /// Owns the entries, front = most recently used
    order: RecencyList<Entry<V>>,
    /// Sum of accounted sizes of all stored entries; wide enough that
    /// adding any number of `u64` sizes cannot overflow
    current_bytes: u128,
    /// Capacity in bytes, None = unbounded
    max_bytes: Option<u64>,
    /// Optional eviction hook
    on_evicted: Option<EvictionCallback<V>>,
    /// Performance statistics
    stats: CacheStats,
}

impl<V: ByteSize> LruStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `max_bytes` - Byte capacity; zero or negative means unbounded
    /// * `on_evicted` - Optional callback run for each evicted entry
    pub fn new(max_bytes: i64, on_evicted: Option<EvictionCallback<V>>) -> Self {
        Self {
            index: HashMap::new(),
            order: RecencyList::new(),
            current_bytes: 0,
            max_bytes: u64::try_from(max_bytes).ok().filter(|&max| max > 0),
            on_evicted,
            stats: CacheStats::new(),
        }
    }

    /// Creates a store that never evicts on its own.
    pub fn unbounded() -> Self {
        Self::new(0, None)
    }

    /// Creates a store sized from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_bytes, None)
    }

    /// Installs (or replaces) the eviction callback.
    pub fn with_eviction_callback<F>(mut self, on_evicted: F) -> Self
    where
        F: FnMut(&str, &V) + 'static,
    {
        self.on_evicted = Some(Box::new(on_evicted));
        self
    }

    // == Add ==
    /// Inserts or updates a key, marking it most recently used.
    ///
    /// Updating an existing key replaces its value and adjusts the byte
    /// count by the size difference. Afterwards, least recently used
    /// entries are evicted one at a time while the store is over capacity.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let slot = self.index.get(&key).copied();

        match slot.and_then(|id| self.order.get_mut(id).map(|entry| (id, entry))) {
            Some((id, entry)) => {
                let old_size = entry.replace(value);
                let new_size = entry.accounted_size();
                self.current_bytes = self.current_bytes - u128::from(old_size)
                    + u128::from(new_size);
                trace!(key = %key, old_size, new_size, "updated entry");
                self.order.move_to_front(id);
            }
            None => {
                debug_assert!(slot.is_none(), "index points at a freed node");
                let entry = Entry::new(key.clone(), value);
                let size = entry.accounted_size();
                trace!(key = %key, size, "inserted entry");
                let id = self.order.push_front(entry);
                self.index.insert(key, id);
                self.current_bytes += u128::from(size);
            }
        }

        self.enforce_capacity();
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// A miss leaves the byte count and recency order untouched.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };
        self.stats.record_hit();
        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    // == Peek ==
    /// Retrieves a value without touching recency or statistics.
    pub fn peek(&self, key: &str) -> Option<&V> {
        let id = self.index.get(key)?;
        self.order.get(*id).map(|entry| &entry.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry, if any.
    ///
    /// The entry is fully removed before the eviction callback runs. No
    /// capacity check is done here; exactly one entry is evicted whenever
    /// the store is non-empty. The evicted pair is returned to the caller.
    pub fn remove_oldest(&mut self) -> Option<(String, V)> {
        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);

        let size = entry.accounted_size();
        self.current_bytes -= u128::from(size);
        self.stats.record_eviction();
        debug!(key = %entry.key, bytes = size, "evicted least recently used entry");

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(&entry.key, &entry.value);
        }
        Some(entry.into_parts())
    }

    // == Remove ==
    /// Removes an entry by key.
    ///
    /// This is a deletion, not an eviction: the eviction callback is not
    /// invoked and the eviction counter is left alone.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.order.remove(id)?;
        self.current_bytes -= u128::from(entry.accounted_size());
        Some(entry.value)
    }

    // == Clear ==
    /// Drops every entry without invoking the eviction callback.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
        self.current_bytes = 0;
    }

    // == Accessors ==
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the accounted bytes currently stored, saturating at `u64::MAX`.
    pub fn current_bytes(&self) -> u64 {
        u64::try_from(self.current_bytes).unwrap_or(u64::MAX)
    }

    /// Returns the capacity, or None when unbounded.
    pub fn max_bytes(&self) -> Option<u64> {
        self.max_bytes
    }

    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(|entry| entry.key.as_str())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_usage(self.len(), self.current_bytes());
        stats
    }

    // == Capacity Enforcement ==
    fn enforce_capacity(&mut self) {
        let Some(max_bytes) = self.max_bytes else {
            return;
        };
        let limit = u128::from(max_bytes);
        // The most recently added entry always survives, even when it alone
        // exceeds capacity.
        while self.current_bytes > limit && self.order.len() > 1 {
            self.remove_oldest();
        }
        if self.current_bytes > limit {
            debug!(
                bytes = self.current_bytes(),
                max_bytes, "single entry exceeds store capacity"
            );
        }
    }

    /// Panics if the index, list and byte count disagree.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.index.len(), self.order.len(), "index/list size mismatch");
        for entry in self.order.iter() {
            let id = self.index.get(&entry.key).copied();
            assert!(id.is_some(), "key {:?} missing from index", entry.key);
            assert_eq!(
                id.and_then(|id| self.order.get(id)).map(|e| e.key.as_str()),
                Some(entry.key.as_str()),
                "index points at wrong node"
            );
        }
        let total: u128 = self
            .order
            .iter()
            .map(|entry| u128::from(entry.accounted_size()))
            .sum();
        assert_eq!(self.current_bytes, total, "byte accounting drifted");
        if let Some(max_bytes) = self.max_bytes {
            assert!(
                self.current_bytes <= u128::from(max_bytes) || self.order.len() == 1,
                "over capacity with {} entries",
                self.order.len()
            );
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for LruStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruStore")
            .field("len", &self.order.len())
            .field("current_bytes", &self.current_bytes)
            .field("max_bytes", &self.max_bytes)
            .field("has_eviction_callback", &self.on_evicted.is_some())
            .field("stats", &self.stats)
            .finish()
    }
}
