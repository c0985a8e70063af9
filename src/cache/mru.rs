//! MRU Cache Module
//!
//! Bounded cache that evicts the **most** recently used key when a new key
//! arrives at capacity. Inserts, updates and successful lookups all move a
//! key to the head of the recency order.
//!
//! ```text
//!   head (MRU, EVICT)                    tail (least recent, keep)
//!   [D] ◄──► [C] ◄──► [B] ◄──► [A]
//!
//!   get(A):  A moves to head        -> [A] [D] [C] [B]
//!   put(E):  A discarded            -> [E] [D] [C] [B]
//! ```

use std::fmt;
use std::hash::Hash;

use tracing::debug;

use crate::cache::policy::validate_capacity;
use crate::cache::store::{CacheStore, End};
use crate::cache::{CachePolicy, CacheStats, EvictionListener, LogNotifier, PolicyKind, MAX_ITEMS};
use crate::error::Result;

// == MRU Cache ==
/// Most-recently-used cache.
pub struct MruCache<K, V> {
    /// Entries in recency order, most recent at the front
    store: CacheStore<K, V>,
    capacity: usize,
    listener: Box<dyn EvictionListener<K>>,
    stats: CacheStats,
}

impl<K, V> MruCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Display + 'static,
{
    // == Constructor ==
    /// Creates an empty cache holding at most [`MAX_ITEMS`] entries.
    pub fn new() -> Self {
        Self::from_parts(MAX_ITEMS, Box::new(LogNotifier))
    }

    /// Creates an empty cache with a custom capacity. Zero is rejected.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_and_listener(capacity, Box::new(LogNotifier))
    }
}

impl<K, V> Default for MruCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Display + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn with_capacity_and_listener(
        capacity: usize,
        listener: Box<dyn EvictionListener<K>>,
    ) -> Result<Self> {
        let capacity = validate_capacity(capacity)?;
        Ok(Self::from_parts(capacity, listener))
    }

    fn from_parts(capacity: usize, listener: Box<dyn EvictionListener<K>>) -> Self {
        Self {
            store: CacheStore::with_capacity(capacity),
            capacity,
            listener,
            stats: CacheStats::new(),
        }
    }

    // == Listener ==
    /// Replaces the eviction listener.
    pub fn with_listener<L>(mut self, listener: L) -> Self
    where
        L: EvictionListener<K> + 'static,
    {
        self.listener = Box::new(listener);
        self
    }

    /// Looks up `key` without marking it as used.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.store.get(key)
    }

    /// The key the next eviction would discard.
    pub fn next_victim(&self) -> Option<&K> {
        self.store.peek(End::Front)
    }

    /// Checks the store and the capacity bound.
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        self.store.debug_validate_invariants();
        assert!(self.store.len() <= self.capacity);
    }

    fn evict(&mut self) {
        if let Some(entry) = self.store.pop(End::Front) {
            self.stats.record_eviction();
            debug!(policy = "mru", entries = self.store.len(), "evicted most recently used entry");
            self.listener.on_discard(&entry.key);
        }
    }
}

impl<K, V> CachePolicy<K, V> for MruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn kind(&self) -> PolicyKind {
        PolicyKind::Mru
    }

    fn put(&mut self, key: K, value: V) {
        // Existing keys are updated in place, never evict
        if !self.store.contains(&key) && self.store.len() >= self.capacity {
            self.evict();
        }

        let updated = self.store.upsert(key, value, End::Front).is_some();
        debug!(policy = "mru", updated, entries = self.store.len(), "put");
        self.stats.set_total_entries(self.store.len());
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let hit = self.store.promote(key, End::Front);
        self.stats.record_lookup(hit);
        self.store.get(key)
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity)
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

impl<K, V> fmt::Debug for MruCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MruCache")
            .field("store", &self.store)
            .field("capacity", &self.capacity)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
