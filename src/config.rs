//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;

use crate::cache::{validate_capacity, PolicyKind, MAX_ITEMS};
use crate::error::Result;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Policy name (`basic`, `lifo` or `mru`)
    pub policy: String,
    /// Maximum number of entries for bounded policies
    pub capacity: usize,
    /// Default log filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_POLICY` - Eviction policy (default: lifo)
    /// - `CACHE_CAPACITY` - Maximum entries for bounded policies (default: 4)
    /// - `CACHE_LOG` - Fallback log filter (default: policy_cache=info)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup, falling back to
    /// defaults for unset or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            policy: lookup("CACHE_POLICY").unwrap_or(defaults.policy),
            capacity: lookup("CACHE_CAPACITY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity),
            log_filter: lookup("CACHE_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Checks the policy name and capacity, returning the parsed policy.
    pub fn validate(&self) -> Result<PolicyKind> {
        let kind = self.policy.parse::<PolicyKind>()?;
        validate_capacity(self.capacity)?;
        Ok(kind)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Lifo.to_string(),
            capacity: MAX_ITEMS,
            log_filter: "policy_cache=info".to_string(),
        }
    }
}
