//! LIFO Cache Module
//!
//! Bounded cache that evicts the most recently inserted **or updated** key
//! when a new key arrives at capacity.
//!
//! ```text
//!   front (oldest touch)                 back (newest touch, EVICT)
//!   [A] ◄──► [B] ◄──► [C] ◄──► [D]
//!
//!   put(E):  D discarded            -> [A] [B] [C] [E]
//!   put(A):  update, no eviction    -> [B] [C] [E] [A]
//!   put(F):  A discarded            -> [B] [C] [E] [F]
//! ```
//!
//! Lookups never reorder.

use std::fmt;
use std::hash::Hash;

use tracing::debug;

use crate::cache::policy::validate_capacity;
use crate::cache::store::{CacheStore, End};
use crate::cache::{CachePolicy, CacheStats, EvictionListener, LogNotifier, PolicyKind, MAX_ITEMS};
use crate::error::Result;

// == LIFO Cache ==
/// Last-in, first-out cache over insertion/update order.
pub struct LifoCache<K, V> {
    /// Entries ordered by last insert or update, newest at the back
    store: CacheStore<K, V>,
    /// Maximum number of entries
    capacity: usize,
    /// Observer for discarded keys
    listener: Box<dyn EvictionListener<K>>,
    stats: CacheStats,
}

impl<K, V> LifoCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Display + 'static,
{
    // == Constructor ==
    /// Creates an empty cache holding at most [`MAX_ITEMS`] entries.
    ///
    /// Evictions are reported through [`LogNotifier`].
    pub fn new() -> Self {
        Self::from_parts(MAX_ITEMS, Box::new(LogNotifier))
    }

    /// Creates an empty cache with a custom capacity.
    ///
    /// Fails with [`CacheError::InvalidCapacity`](crate::error::CacheError)
    /// when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_and_listener(capacity, Box::new(LogNotifier))
    }
}

impl<K, V> Default for LifoCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Display + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> LifoCache<K, V>
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

    /// The key the next eviction would discard.
    pub fn next_victim(&self) -> Option<&K> {
        self.store.peek(End::Back)
    }

    /// Checks the store and the capacity bound.
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        self.store.debug_validate_invariants();
        assert!(self.store.len() <= self.capacity);
    }

    fn evict(&mut self) {
        if let Some(entry) = self.store.pop(End::Back) {
            self.stats.record_eviction();
            debug!(policy = "lifo", entries = self.store.len(), "evicted newest entry");
            self.listener.on_discard(&entry.key);
        }
    }
}

impl<K, V> CachePolicy<K, V> for LifoCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lifo
    }

    fn put(&mut self, key: K, value: V) {
        if !self.store.contains(&key) && self.store.len() >= self.capacity {
            self.evict();
        }

        // Updates count as the newest touch too
        let updated = self.store.upsert(key, value, End::Back).is_some();
        debug!(policy = "lifo", updated, entries = self.store.len(), "put");
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

impl<K, V> fmt::Debug for LifoCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifoCache")
            .field("store", &self.store)
            .field("capacity", &self.capacity)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
