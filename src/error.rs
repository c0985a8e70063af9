//! Error types for the cache library
//!
//! Provides unified error handling using thiserror. Normal `put`/`get`
//! traffic never produces an error; these cover construction and
//! configuration only.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Bounded policies need room for at least one entry
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Policy name did not match any known policy
    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),

    /// A workload operation could not be parsed
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;
