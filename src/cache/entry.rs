//! Cache Entry Module
//!
//! Defines the key/value pair held by the recency list.

use crate::cache::ByteSize;

// == Cache Entry ==
/// A single stored key/value pair.
///
/// The accounted size is computed when the value is stored and kept with
/// the entry, so later removal subtracts exactly what was added even if the
/// value reports a different size by then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    /// The key, immutable once stored
    pub key: String,
    /// The stored value
    pub value: V,
    /// Bytes charged against capacity when the value was stored
    size: u64,
}

impl<V: ByteSize> Entry<V> {
    // == Constructor ==
    pub fn new(key: String, value: V) -> Self {
        let size = accounted_size(&key, &value);
        Self { key, value, size }
    }

    // == Replace Value ==
    /// Swaps in a new value and returns the previously accounted size.
    pub fn replace(&mut self, value: V) -> u64 {
        let new_size = accounted_size(&self.key, &value);
        self.value = value;
        std::mem::replace(&mut self.size, new_size)
    }
}

impl<V> Entry<V> {
    // == Accounted Size ==
    /// Returns the bytes charged against capacity: key length plus value size,
    /// as measured when the value was stored.
    pub fn accounted_size(&self) -> u64 {
        self.size
    }

    // == Into Parts ==
    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

// == Utility Functions ==
/// Returns the accounted size of a key/value pair, saturating at `u64::MAX`.
pub fn accounted_size<V: ByteSize + ?Sized>(key: &str, value: &V) -> u64 {
    (key.len() as u64).saturating_add(value.size() as u64)
}
