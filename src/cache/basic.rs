//! Basic Cache Module
//!
//! Unbounded cache: every put is stored, nothing is ever evicted.

use std::hash::Hash;

use tracing::debug;

use crate::cache::store::{CacheStore, End};
use crate::cache::{CachePolicy, CacheStats, PolicyKind};

// == Basic Cache ==
/// Cache without a capacity limit. The last put for a key wins.
#[derive(Debug)]
pub struct BasicCache<K, V> {
    store: CacheStore<K, V>,
    stats: CacheStats,
}

impl<K, V> BasicCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty unbounded cache.
    pub fn new() -> Self {
        Self {
            store: CacheStore::new(),
            stats: CacheStats::new(),
        }
    }
}

impl<K, V> Default for BasicCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CachePolicy<K, V> for BasicCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn kind(&self) -> PolicyKind {
        PolicyKind::Basic
    }

    fn put(&mut self, key: K, value: V) {
        let updated = self.store.upsert(key, value, End::Back).is_some();
        debug!(policy = "basic", updated, entries = self.store.len(), "put");
        self.stats.set_total_entries(self.store.len());
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let value = self.store.get(key);
        self.stats.record_lookup(value.is_some());
        value
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn capacity(&self) -> Option<usize> {
        None
    }

    fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    fn keys(&self) -> Vec<&K> {
        self.store.keys()
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        self.store.iter().map(|entry| (&entry.key, &entry.value)).collect()
    }

    fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.store.len());
        stats
    }

    fn record_ignored_put(&mut self) {
        self.stats.record_ignored_put();
    }

    fn clear(&mut self) {
        self.store.clear();
        self.stats.set_total_entries(0);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MAX_ITEMS;

    #[test]
    fn test_basic_put_and_get() {
        let mut cache = BasicCache::new();
        cache.put("A", "Hello");
        cache.put("B", "World");

        assert_eq!(cache.get(&"A"), Some(&"Hello"));
        assert_eq!(cache.get(&"B"), Some(&"World"));
        assert_eq!(cache.get(&"C"), None);
        assert_eq!(cache.capacity(), None);
    }

    #[test]
    fn test_basic_never_evicts() {
        let mut cache = BasicCache::new();
        for i in 0..(MAX_ITEMS * 10) {
            cache.put(i, i * 2);
        }

        assert_eq!(cache.len(), MAX_ITEMS * 10);
        assert_eq!(cache.stats().evictions, 0);
        for i in 0..(MAX_ITEMS * 10) {
            assert_eq!(cache.get(&i), Some(&(i * 2)));
        }
    }

    #[test]
    fn test_basic_last_put_wins() {
        let mut cache = BasicCache::new();
        cache.put("A", 1);
        cache.put("A", 2);
        cache.put("A", 3);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"A"), Some(&3));
    }

    #[test]
    fn test_basic_missing_inputs_are_ignored() {
        let mut cache: BasicCache<&str, &str> = BasicCache::new();
        cache.put_maybe(None, Some("value"));
        cache.put_maybe(Some("key"), None);

        assert!(cache.is_empty());
        assert_eq!(cache.get_maybe(None), None);
        assert_eq!(cache.stats().ignored_puts, 2);
    }

    #[test]
    fn test_basic_stats() {
        let mut cache = BasicCache::new();
        cache.put("A", 1);
        cache.get(&"A");
        cache.get(&"missing");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_basic_clear() {
        let mut cache = BasicCache::new();
        cache.put("A", 1);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get(&"A"), None);
    }
}
