//! Workload operations
//!
//! Parses the command-line operations driven through a cache by the demo
//! binary.
//!
//! | Text            | Operation                          |
//! |-----------------|------------------------------------|
//! | `put:KEY=VALUE` | put KEY with VALUE                 |
//! | `put:KEY`       | put with a missing value (ignored) |
//! | `put:=VALUE`    | put with a missing key (ignored)   |
//! | `get:KEY`       | get KEY                            |
//! | `get:`          | get with a missing key             |

use std::str::FromStr;

use crate::cache::CachePolicy;
use crate::error::{CacheError, Result};

/// A single cache operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Put {
        key: Option<String>,
        value: Option<String>,
    },
    Get {
        key: Option<String>,
    },
}

/// Outcome of applying an [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Stored,
    Found { key: Option<String>, value: Option<String> },
}

impl Operation {
    /// Applies this operation to `cache`.
    pub fn apply(&self, cache: &mut dyn CachePolicy<String, String>) -> Outcome {
        match self {
            Operation::Put { key, value } => {
                cache.put_maybe(key.clone(), value.clone());
                Outcome::Stored
            }
            Operation::Get { key } => Outcome::Found {
                key: key.clone(),
                value: cache.get_maybe(key.as_ref()).cloned(),
            },
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

impl FromStr for Operation {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        let (verb, rest) = s
            .split_once(':')
            .ok_or_else(|| CacheError::InvalidOperation(s.to_string()))?;

        match verb.to_ascii_lowercase().as_str() {
            "put" => {
                let (key, value) = match rest.split_once('=') {
                    Some((key, value)) => (non_empty(key), non_empty(value)),
                    None => (non_empty(rest), None),
                };
                Ok(Operation::Put { key, value })
            }
            "get" => Ok(Operation::Get {
                key: non_empty(rest),
            }),
            _ => Err(CacheError::InvalidOperation(s.to_string())),
        }
    }
}

/// Operations used when no arguments are given: fill a cache of four and
/// push one more key through it.
pub fn reference_workload() -> Vec<Operation> {
    let put = |key: &str, value: &str| Operation::Put {
        key: Some(key.to_string()),
        value: Some(value.to_string()),
    };
    vec![
        put("A", "Hello"),
        put("B", "World"),
        put("C", "Holberton"),
        put("D", "School"),
        Operation::Get {
            key: Some("A".to_string()),
        },
        put("E", "Battery"),
        Operation::Get {
            key: Some("E".to_string()),
        },
        Operation::Put {
            key: None,
            value: Some("Ignored".to_string()),
        },
    ]
}
