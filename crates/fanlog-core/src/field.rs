//! Field builders.
//!
//! Fields attach typed key/value annotations to a single log call. Record
//! values are encoded through [`ObjectMarshaler`], which the caller
//! implements by listing each member explicitly.

use chrono::NaiveDate;
use fanlog_types::Field;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::time::format_date;

/// Wrap an arbitrary serializable value.
///
/// A value that fails to serialize is replaced by the error text.
pub fn field(key: impl Into<String>, value: impl Serialize) -> Field {
    let value = serde_json::to_value(value).unwrap_or_else(|e| Value::String(e.to_string()));
    Field::new(key, value)
}

/// A field keyed `cause` holding the error's message.
pub fn error_field<E>(err: &E) -> Field
where
    E: std::error::Error + ?Sized,
{
    field("cause", err.to_string())
}

/// Encode a record value as a nested object.
pub fn object_field(key: impl Into<String>, value: &impl ObjectMarshaler) -> Field {
    let mut encoder = ObjectEncoder::new();
    value.marshal(&mut encoder);
    Field::new(key, encoder.finish())
}

/// Types that know how to describe themselves to an [`ObjectEncoder`].
pub trait ObjectMarshaler {
    /// Add every member worth logging to `encoder`.
    fn marshal(&self, encoder: &mut ObjectEncoder);
}

impl<F> ObjectMarshaler for F
where
    F: Fn(&mut ObjectEncoder),
{
    fn marshal(&self, encoder: &mut ObjectEncoder) {
        self(encoder)
    }
}

/// Collects typed members of a record.
#[derive(Debug, Default)]
pub struct ObjectEncoder {
    members: Map<String, Value>,
}

impl ObjectEncoder {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text member.
    pub fn add_string(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.members.insert(key.to_string(), Value::String(value.into()));
        self
    }

    /// Add an integer member.
    pub fn add_int(&mut self, key: &str, value: i64) -> &mut Self {
        self.members.insert(key.to_string(), Value::from(value));
        self
    }

    /// Add a floating point member. Non-finite values are encoded as null.
    pub fn add_float(&mut self, key: &str, value: f64) -> &mut Self {
        self.members.insert(key.to_string(), Value::from(value));
        self
    }

    /// Add a boolean member.
    pub fn add_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.members.insert(key.to_string(), Value::Bool(value));
        self
    }

    /// Add a date member as `YYYY-MM-DD`, or `nil` when absent.
    pub fn add_date(&mut self, key: &str, value: Option<NaiveDate>) -> &mut Self {
        self.members.insert(key.to_string(), Value::String(format_date(value)));
        self
    }

    /// The encoded object.
    pub fn finish(self) -> Value {
        Value::Object(self.members)
    }
}
