//! Cache snapshot and listing
//!
//! Point-in-time views of a cache: the human-readable listing and a
//! serializable snapshot for JSON output.

use std::fmt::{self, Write};

use serde::Serialize;

use crate::cache::{CachePolicy, CacheStats, PolicyKind};

/// One `key: value` pair rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry {
    pub key: String,
    pub value: String,
}

/// Serializable view of a cache's contents and counters.
#[derive(Debug, Clone, Serialize)]
pub struct CacheSnapshot {
    /// Policy name
    pub policy: PolicyKind,
    /// Maximum entries, absent for unbounded caches
    pub capacity: Option<usize>,
    /// Entries in the policy's ordering sequence
    pub entries: Vec<SnapshotEntry>,
    pub stats: CacheStats,
    pub hit_rate: f64,
    /// Capture time in RFC 3339 format
    pub taken_at: String,
}

impl CacheSnapshot {
    /// Captures the current state without touching the ordering sequence.
    pub fn capture<K, V>(cache: &dyn CachePolicy<K, V>) -> Self
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        let stats = cache.stats();
        Self {
            policy: cache.kind(),
            capacity: cache.capacity(),
            entries: cache
                .entries()
                .into_iter()
                .map(|(key, value)| SnapshotEntry {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            hit_rate: stats.hit_rate(),
            stats,
            taken_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Renders `Current cache:` followed by one `key: value` line per entry,
/// sorted by key.
pub fn render_listing<K, V>(cache: &dyn CachePolicy<K, V>) -> String
where
    K: Ord + fmt::Display,
    V: fmt::Display,
{
    let mut entries = cache.entries();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::from("Current cache:\n");
    for (key, value) in entries {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{}: {}", key, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{BasicCache, LifoCache, MruCache};

    #[test]
    fn test_render_listing_sorted_by_key() {
        let mut cache: MruCache<&str, &str> = MruCache::new();
        cache.put("C", "Holberton");
        cache.put("A", "Hello");
        cache.put("B", "World");

        assert_eq!(
            render_listing(&cache),
            "Current cache:\nA: Hello\nB: World\nC: Holberton\n"
        );
    }

    #[test]
    fn test_render_listing_empty() {
        let cache: BasicCache<String, String> = BasicCache::new();
        assert_eq!(render_listing(&cache), "Current cache:\n");
    }

    #[test]
    fn test_snapshot_capture() {
        let mut cache: LifoCache<&str, i32> = LifoCache::new();
        cache.put("A", 1);
        cache.put("B", 2);
        cache.get(&"A");

        let snapshot = CacheSnapshot::capture(&cache);
        assert_eq!(snapshot.policy, PolicyKind::Lifo);
        assert_eq!(snapshot.capacity, Some(4));
        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.entries[0].key, "A");
        assert_eq!(snapshot.stats.hits, 1);
        assert_eq!(snapshot.hit_rate, 1.0);
    }

    #[test]
    fn test_snapshot_serialize() {
        let mut cache: BasicCache<i32, &str> = BasicCache::new();
        cache.put(1, "one");

        let json = serde_json::to_value(CacheSnapshot::capture(&cache)).unwrap();
        assert_eq!(json["policy"], "basic");
        assert!(json["capacity"].is_null());
        assert_eq!(json["entries"][0]["key"], "1");
        assert_eq!(json["entries"][0]["value"], "one");
        assert!(json["taken_at"].is_string());
    }
}
