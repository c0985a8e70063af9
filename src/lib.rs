//! Policy Cache - A bounded in-memory key/value cache
//!
//! Provides interchangeable eviction policies (basic, LIFO, MRU) behind one
//! `CachePolicy` trait, with injectable eviction listeners.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use cache::{
    BasicCache, CachePolicy, EvictionListener, LifoCache, MruCache, PolicyKind, SharedCache,
    MAX_ITEMS,
};
pub use config::Config;
pub use error::{CacheError, Result};
