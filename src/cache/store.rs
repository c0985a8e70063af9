//! Cache Store Module
//!
//! Backing storage shared by every policy: a HashMap index from key to slot
//! plus an [`OrderList`] of entries recording insertion or recency order.
//! The store has no eviction rule of its own; policies decide which end of
//! the order to insert at and which end to evict from.

use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::order::{OrderList, SlotId};
use crate::cache::CacheEntry;

// == End ==
/// One end of the ordering sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    Front,
    Back,
}

// == Cache Store ==
/// Key/value storage with an explicit ordering sequence.
///
/// The index and the order list always hold the same key set.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key to slot mapping
    index: HashMap<K, SlotId>,
    /// Entries in insertion/recency order
    order: OrderList<CacheEntry<K, V>>,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            order: OrderList::new(),
        }
    }

    /// Creates an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            order: OrderList::with_capacity(capacity),
        }
    }

    // == Get ==
    /// Returns the value stored for `key` without touching the order.
    pub fn get(&self, key: &K) -> Option<&V> {
        let id = self.index.get(key)?;
        self.order.get(*id).map(|entry| &entry.value)
    }

    // == Contains ==
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    // == Upsert ==
    /// Inserts or overwrites `key` and moves it to `end`.
    ///
    /// Returns the previous value when the key already existed.
    pub fn upsert(&mut self, key: K, value: V, end: End) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let old = self
                .order
                .get_mut(id)
                .map(|entry| entry.replace_value(value));
            self.move_slot(id, end);
            return old;
        }

        let entry = CacheEntry::new(key.clone(), value);
        let id = match end {
            End::Front => self.order.push_front(entry),
            End::Back => self.order.push_back(entry),
        };
        self.index.insert(key, id);
        None
    }

    // == Promote ==
    /// Moves an existing key to `end`. Returns false if the key is absent.
    pub fn promote(&mut self, key: &K, end: End) -> bool {
        match self.index.get(key) {
            Some(&id) => self.move_slot(id, end),
            None => false,
        }
    }

    // == Pop ==
    /// Removes and returns the entry at `end`.
    pub fn pop(&mut self, end: End) -> Option<CacheEntry<K, V>> {
        let entry = match end {
            End::Front => self.order.pop_front(),
            End::Back => self.order.pop_back(),
        }?;
        self.index.remove(&entry.key);
        Some(entry)
    }

    // == Peek ==
    /// Returns the key at `end` without removing it.
    pub fn peek(&self, end: End) -> Option<&K> {
        let entry = match end {
            End::Front => self.order.front(),
            End::Back => self.order.back(),
        }?;
        Some(&entry.key)
    }

    // == Iteration ==
    /// Iterates entries from front to back.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry<K, V>> {
        self.order.iter()
    }

    /// Keys from front to back.
    pub fn keys(&self) -> Vec<&K> {
        self.order.iter().map(|entry| &entry.key).collect()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn move_slot(&mut self, id: SlotId, end: End) -> bool {
        match end {
            End::Front => self.order.move_to_front(id),
            End::Back => self.order.move_to_back(id),
        }
    }

    /// Checks that index and order list agree on the key set.
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        self.order.debug_validate_invariants();
        assert_eq!(self.index.len(), self.order.len());
        for (key, id) in &self.index {
            let entry = self.order.get(*id).expect("indexed slot must be live");
            assert!(&entry.key == key, "slot holds a different key");
        }
    }
}

impl<K, V> Default for CacheStore<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
