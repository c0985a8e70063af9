//! Shared Cache Module
//!
//! Thread-safe handle over any policy. A single exclusive lock guards the
//! map and the ordering sequence together, since an MRU lookup mutates both.
//! Eviction listeners run while that lock is held and must not call back
//! into the same handle.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{CachePolicy, CacheStats, PolicyKind};

// == Shared Cache ==
/// Cloneable, thread-safe cache handle.
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<Box<dyn CachePolicy<K, V> + Send>>>,
}

impl<K, V> SharedCache<K, V> {
    /// Wraps a policy for shared use.
    pub fn new<P>(policy: P) -> Self
    where
        P: CachePolicy<K, V> + Send + 'static,
    {
        Self::from_boxed(Box::new(policy))
    }

    pub fn from_boxed(policy: Box<dyn CachePolicy<K, V> + Send>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(policy)),
        }
    }

    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    pub fn put_maybe(&self, key: Option<K>, value: Option<V>) {
        self.inner.lock().put_maybe(key, value);
    }

    /// Looks up `key` and clones the value out from under the lock.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn get_maybe(&self, key: Option<&K>) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get_maybe(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn kind(&self) -> PolicyKind {
        self.inner.lock().kind()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.inner.lock().capacity()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Keys in ordering sequence, front to back.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.lock().keys().into_iter().cloned().collect()
    }

    /// Runs `f` with the policy locked, for multi-step reads.
    pub fn with_policy<R>(&self, f: impl FnOnce(&mut dyn CachePolicy<K, V>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut **guard)
    }
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{BasicCache, LifoCache, MruCache, RecordingNotifier};
    use std::thread;

    #[test]
    fn test_shared_put_and_get() {
        let cache: SharedCache<String, i32> = SharedCache::new(MruCache::new());
        cache.put("A".to_string(), 1);

        assert_eq!(cache.get(&"A".to_string()), Some(1));
        assert_eq!(cache.get_maybe(None), None);
        assert_eq!(cache.kind(), PolicyKind::Mru);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_shared_clone_sees_same_policy() {
        let cache: SharedCache<u32, &str> = SharedCache::new(LifoCache::new());
        let other = cache.clone();
        other.put(1u32, "one");

        assert_eq!(cache.get(&1), Some("one"));
        assert_eq!(cache.keys(), vec![1]);
    }

    #[test]
    fn test_shared_capacity_across_threads() {
        let recorder: RecordingNotifier<u64> = RecordingNotifier::new();
        let cache: SharedCache<u64, u64> = SharedCache::new(
            LifoCache::with_capacity(8)
                .unwrap()
                .with_listener(recorder.clone()),
        );

        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..50u64 {
                        cache.put(t * 1000 + i, i);
                        let _ = cache.get(&(t * 1000 + i));
                        assert!(cache.len() <= 8);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 8);
        assert_eq!(recorder.discarded().len(), 200 - 8);
        assert_eq!(cache.stats().evictions, 192);
    }

    #[test]
    fn test_listener_forwards_to_another_cache() {
        let overflow: SharedCache<u32, u32> = SharedCache::new(BasicCache::new());
        let sink = overflow.clone();
        let cache: SharedCache<u32, u32> = SharedCache::new(
            LifoCache::with_capacity(2)
                .unwrap()
                .with_listener(move |key: &u32| sink.put(*key, *key)),
        );

        for key in 0..5u32 {
            cache.put(key, key);
        }

        assert_eq!(cache.keys(), vec![0, 4]);
        assert_eq!(overflow.keys(), vec![1, 2, 3]);
    }

    #[test]
    fn test_with_policy_sees_consistent_state() {
        let cache: SharedCache<&str, i32> = SharedCache::new(MruCache::new());
        cache.put("a", 1);
        cache.put("b", 2);

        let (len, keys) = cache.with_policy(|policy| {
            let keys: Vec<&str> = policy.keys().into_iter().copied().collect();
            (policy.len(), keys)
        });
        assert_eq!(len, 2);
        assert_eq!(keys, vec!["b", "a"]);
    }
}
