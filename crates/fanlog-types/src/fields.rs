//! Key/value annotations attached to individual log calls.

use serde_json::Value;
use std::fmt;

/// A single structured annotation on a log entry.
///
/// Fields are immutable once built. Use the builders in `fanlog_core::field`
/// rather than constructing values by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    key: String,
    value: Value,
}

impl Field {
    /// Create a field from an already encoded value.
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// The field key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The encoded field value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
