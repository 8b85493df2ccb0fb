//! Typed values extracted from live records.
//!
//! A record hands the binder one [`FieldValue`] per field: a present scalar
//! [`Value`], an explicit null, or `Unknown` for a field name the record does
//! not recognize. Null and Unknown bind differently (null becomes SQL NULL,
//! Unknown is a structured error), so the three-way split is load-bearing.

use chrono::{DateTime, Utc};

/// A scalar value read from a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean, bound as a 0/1 integer.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// UTF-8 text.
    Text(String),
    /// UTC timestamp, bound as RFC 3339 text.
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Short name of the value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::DateTime(_) => "datetime",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v)
    }
}

/// Outcome of reading one named field from a record.
///
/// # Examples
///
/// ```
/// use rowmap_core::{FieldValue, Value};
///
/// assert_eq!(FieldValue::present(7), FieldValue::Present(Value::Int(7)));
/// assert_eq!(FieldValue::opt(None::<String>), FieldValue::Null);
/// assert_eq!(
///     FieldValue::opt(Some("hi")),
///     FieldValue::Present(Value::Text("hi".to_string()))
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The field holds this value.
    Present(Value),
    /// The field is explicitly null.
    Null,
    /// The record does not recognize the field name.
    Unknown,
}

impl FieldValue {
    /// Wraps a present scalar.
    pub fn present(value: impl Into<Value>) -> Self {
        Self::Present(value.into())
    }

    /// Maps `Some` to a present scalar and `None` to null.
    pub fn opt(value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => Self::Present(v.into()),
            None => Self::Null,
        }
    }
}
