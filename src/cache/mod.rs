//! Cache Module
//!
//! Provides bounded in-memory caching with interchangeable eviction policies.

mod basic;
mod entry;
mod lifo;
mod mru;
mod notifier;
mod order;
mod policy;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use basic::BasicCache;
pub use entry::CacheEntry;
pub use lifo::LifoCache;
pub use mru::MruCache;
pub use notifier::{
    discard_line, EvictionListener, LogNotifier, RecordingNotifier, StdoutNotifier,
};
pub use order::{OrderList, SlotId};
pub use policy::{build_policy, validate_capacity, CachePolicy, PolicyKind};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::{CacheStore, End};

// == Public Constants ==
/// Default capacity of the bounded policies
pub const MAX_ITEMS: usize = 4;
