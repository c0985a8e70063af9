//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

// == Cache Entry ==
/// A key paired with its stored value.
///
/// The entry keeps its own copy of the key so that evicting from the order
/// list yields the key to remove from the index and to report to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    /// The key identifying this entry
    pub key: K,
    /// The stored value
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new cache entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    // == Replace Value ==
    /// Overwrites the stored value, returning the previous one.
    pub fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    /// Splits the entry into its key and value.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}
