//! Eviction Notifier Module
//!
//! Listeners that observe the key discarded by an eviction. A listener is
//! called synchronously from inside the `put` that triggered the eviction,
//! after the entry has already been removed.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

// == Eviction Listener ==
/// Observer for keys discarded on eviction.
///
/// Implementations must not panic; the notification is fire-and-forget and
/// has no way to fail the surrounding `put`.
///
/// Listeners must not re-enter the cache that evicted. Behind a
/// [`SharedCache`](crate::cache::SharedCache) the listener runs with the
/// cache lock held, and the lock is not reentrant, so calling back into the
/// same handle deadlocks. Forwarding to a different cache is fine.
pub trait EvictionListener<K>: Send {
    fn on_discard(&mut self, key: &K);
}

impl<K, F> EvictionListener<K> for F
where
    F: FnMut(&K) + Send,
{
    fn on_discard(&mut self, key: &K) {
        self(key)
    }
}

// == Discard Line ==
/// Renders the `DISCARD: <key>` line reported for an evicted key.
pub fn discard_line<K: fmt::Display>(key: &K) -> String {
    format!("DISCARD: {}", key)
}

// == Log Notifier ==
/// Emits a `DISCARD: <key>` tracing event. Default listener for all policies.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl<K: fmt::Display> EvictionListener<K> for LogNotifier {
    fn on_discard(&mut self, key: &K) {
        info!(target: "policy_cache::evict", "{}", discard_line(key));
    }
}

// == Stdout Notifier ==
/// Prints `DISCARD: <key>` on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutNotifier;

impl<K: fmt::Display> EvictionListener<K> for StdoutNotifier {
    fn on_discard(&mut self, key: &K) {
        println!("{}", discard_line(key));
    }
}

// == Recording Notifier ==
/// Collects discarded keys in eviction order.
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// other to a cache.
#[derive(Debug)]
pub struct RecordingNotifier<K> {
    discarded: Arc<Mutex<Vec<K>>>,
}

impl<K> RecordingNotifier<K> {
    pub fn new() -> Self {
        Self {
            discarded: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the keys discarded so far, oldest first.
    pub fn discarded(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.discarded.lock().clone()
    }

    /// Drains the recorded keys.
    pub fn take(&self) -> Vec<K> {
        std::mem::take(&mut *self.discarded.lock())
    }
}

impl<K> Clone for RecordingNotifier<K> {
    fn clone(&self) -> Self {
        Self {
            discarded: Arc::clone(&self.discarded),
        }
    }
}

impl<K> Default for RecordingNotifier<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Send> EvictionListener<K> for RecordingNotifier<K> {
    fn on_discard(&mut self, key: &K) {
        self.discarded.lock().push(key.clone());
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_buffer() {
        let recorder = RecordingNotifier::new();
        let mut handle = recorder.clone();

        handle.on_discard(&"a");
        handle.on_discard(&"b");

        assert_eq!(recorder.discarded(), vec!["a", "b"]);
        assert_eq!(recorder.take(), vec!["a", "b"]);
        assert!(recorder.discarded().is_empty());
    }

    #[test]
    fn test_closure_listener() {
        let mut seen = Vec::new();
        {
            let mut listener = |key: &u32| seen.push(*key);
            EvictionListener::<u32>::on_discard(&mut listener, &7);
        }
        assert_eq!(seen, vec![7]);
    }

    #[test]
    fn test_discard_line_uses_display() {
        assert_eq!(discard_line(&"A".to_string()), "DISCARD: A");
        assert_eq!(discard_line(&"A"), "DISCARD: A");
        assert_eq!(discard_line(&42u32), "DISCARD: 42");
    }

    #[test]
    fn test_log_notifier_emits_discard_line() {
        use std::io;
        use tracing_subscriber::fmt::MakeWriter;

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        impl<'a> MakeWriter<'a> for Capture {
            type Writer = Capture;

            fn make_writer(&'a self) -> Self::Writer {
                self.clone()
            }
        }

        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut notifier = LogNotifier;
            EvictionListener::<String>::on_discard(&mut notifier, &"A".to_string());
        });

        let out = String::from_utf8(capture.0.lock().clone()).unwrap();
        assert!(out.contains("DISCARD: A"), "unexpected log line: {}", out);
        assert!(!out.contains("\"A\""));
    }

    #[test]
    fn test_log_notifier_does_not_panic() {
        let mut notifier = LogNotifier;
        EvictionListener::<&str>::on_discard(&mut notifier, &"key");
    }
}
