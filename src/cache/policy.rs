//! Cache Policy Module
//!
//! The capability shared by every eviction policy, plus the policy selector
//! used by configuration to build a boxed policy at runtime.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::Serialize;
use tracing::trace;

use crate::cache::{BasicCache, CacheStats, EvictionListener, LifoCache, MruCache};
use crate::error::{CacheError, Result};

// == Cache Policy Trait ==
/// Common `put`/`get` surface implemented by every policy.
pub trait CachePolicy<K, V> {
    /// Which eviction rule this cache applies.
    fn kind(&self) -> PolicyKind;

    /// Inserts or overwrites `key`, evicting first if the policy requires it.
    fn put(&mut self, key: K, value: V);

    /// Looks up `key`. MRU marks a hit as most recently used.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Number of entries currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries, or `None` when unbounded.
    fn capacity(&self) -> Option<usize>;

    fn contains(&self, key: &K) -> bool;

    /// Keys in the policy's ordering sequence, front to back.
    fn keys(&self) -> Vec<&K>;

    /// Entries in the policy's ordering sequence, front to back.
    fn entries(&self) -> Vec<(&K, &V)>;

    fn stats(&self) -> CacheStats;

    /// Counts a put that was dropped for a missing key or value.
    fn record_ignored_put(&mut self);

    /// Drops every entry without notifying listeners.
    fn clear(&mut self);

    // == Optional Inputs ==
    /// Like [`put`](Self::put), but a missing key or value is a silent no-op.
    fn put_maybe(&mut self, key: Option<K>, value: Option<V>) {
        match (key, value) {
            (Some(key), Some(value)) => self.put(key, value),
            _ => {
                trace!(policy = %self.kind(), "ignoring put with missing key or value");
                self.record_ignored_put();
            }
        }
    }

    /// Like [`get`](Self::get), but a missing key is always not-found.
    fn get_maybe(&mut self, key: Option<&K>) -> Option<&V> {
        match key {
            Some(key) => self.get(key),
            None => None,
        }
    }
}

// == Policy Kind ==
/// Selects an eviction policy by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Unbounded, never evicts
    Basic,
    /// Evicts the most recently inserted or updated key
    Lifo,
    /// Evicts the most recently used key
    Mru,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Basic, PolicyKind::Lifo, PolicyKind::Mru];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Basic => "basic",
            PolicyKind::Lifo => "lifo",
            PolicyKind::Mru => "mru",
        }
    }

    /// Whether this policy enforces a capacity.
    pub fn is_bounded(self) -> bool {
        !matches!(self, PolicyKind::Basic)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" | "unbounded" => Ok(PolicyKind::Basic),
            "lifo" => Ok(PolicyKind::Lifo),
            "mru" => Ok(PolicyKind::Mru),
            _ => Err(CacheError::UnknownPolicy(s.to_string())),
        }
    }
}

// == Capacity Validation ==
/// Rejects capacities that leave no room for an entry.
pub fn validate_capacity(capacity: usize) -> Result<usize> {
    if capacity == 0 {
        return Err(CacheError::InvalidCapacity(capacity));
    }
    Ok(capacity)
}

// == Builder ==
/// Builds a boxed policy of the given kind.
///
/// `capacity` is validated for every kind so a bad configuration fails the
/// same way regardless of policy; the basic cache then ignores it.
pub fn build_policy<K, V>(
    kind: PolicyKind,
    capacity: usize,
    listener: Box<dyn EvictionListener<K>>,
) -> Result<Box<dyn CachePolicy<K, V> + Send>>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Send + 'static,
{
    validate_capacity(capacity)?;
    let policy: Box<dyn CachePolicy<K, V> + Send> = match kind {
        PolicyKind::Basic => Box::new(BasicCache::new()),
        PolicyKind::Lifo => Box::new(LifoCache::with_capacity_and_listener(capacity, listener)?),
        PolicyKind::Mru => Box::new(MruCache::with_capacity_and_listener(capacity, listener)?),
    };
    Ok(policy)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{LogNotifier, RecordingNotifier, MAX_ITEMS};

    #[test]
    fn test_policy_kind_parse() {
        assert_eq!("lifo".parse::<PolicyKind>().unwrap(), PolicyKind::Lifo);
        assert_eq!(" MRU ".parse::<PolicyKind>().unwrap(), PolicyKind::Mru);
        assert_eq!("Basic".parse::<PolicyKind>().unwrap(), PolicyKind::Basic);
        assert_eq!("unbounded".parse::<PolicyKind>().unwrap(), PolicyKind::Basic);
        assert_eq!(
            "lru".parse::<PolicyKind>(),
            Err(CacheError::UnknownPolicy("lru".to_string()))
        );
    }

    #[test]
    fn test_policy_kind_display_roundtrip() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.to_string().parse::<PolicyKind>().unwrap(), kind);
        }
        assert!(!PolicyKind::Basic.is_bounded());
        assert!(PolicyKind::Lifo.is_bounded());
    }

    #[test]
    fn test_validate_capacity() {
        assert_eq!(validate_capacity(0), Err(CacheError::InvalidCapacity(0)));
        assert_eq!(validate_capacity(1), Ok(1));
    }

    #[test]
    fn test_build_policy_each_kind() {
        for kind in PolicyKind::ALL {
            let cache: Box<dyn CachePolicy<String, u32> + Send> =
                build_policy(kind, MAX_ITEMS, Box::new(LogNotifier)).unwrap();
            assert_eq!(cache.kind(), kind);
            assert!(cache.is_empty());
            let expected = if kind.is_bounded() { Some(MAX_ITEMS) } else { None };
            assert_eq!(cache.capacity(), expected);
        }
    }

    #[test]
    fn test_build_policy_zero_capacity() {
        let result = build_policy::<String, u32>(PolicyKind::Mru, 0, Box::new(LogNotifier));
        assert!(matches!(result, Err(CacheError::InvalidCapacity(0))));
    }

    #[test]
    fn test_put_maybe_ignores_missing_parts() {
        let recorder: RecordingNotifier<&str> = RecordingNotifier::new();
        let mut cache: Box<dyn CachePolicy<&str, &str> + Send> =
            build_policy(PolicyKind::Lifo, 1, Box::new(recorder.clone())).unwrap();

        cache.put_maybe(Some("a"), Some("1"));
        cache.put_maybe(None, Some("2"));
        cache.put_maybe(Some("b"), None);
        cache.put_maybe(None, None);

        assert_eq!(cache.keys(), vec![&"a"]);
        assert_eq!(cache.stats().ignored_puts, 3);
        assert!(recorder.discarded().is_empty());
        assert_eq!(cache.get_maybe(None), None);
        assert_eq!(cache.get_maybe(Some(&"a")), Some(&"1"));
    }
}
