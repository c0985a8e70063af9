//! Views and inputs around a cache
//!
//! Snapshots for reporting a cache's state and the operation model used to
//! drive a cache from text.

pub mod operation;
pub mod snapshot;

// Re-export commonly used types
pub use operation::{reference_workload, Operation, Outcome};
pub use snapshot::{render_listing, CacheSnapshot, SnapshotEntry};
