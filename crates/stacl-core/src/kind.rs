//! # JSON Value Classification
//!
//! Coarse type labels for extension-field summaries. Arrays carry their
//! length so the report can print `array[N]`.

use std::fmt;

use serde_json::Value;

/// Tagged classification of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Any JSON number, integer or float.
    Number,
    /// A JSON string.
    String,
    /// A JSON array with the given number of elements.
    Array(usize),
    /// A JSON object.
    Object,
}

impl ValueKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(items) => Self::Array(items.len()),
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool => f.write_str("boolean"),
            Self::Number => f.write_str("number"),
            Self::String => f.write_str("string"),
            Self::Array(len) => write!(f, "array[{len}]"),
            Self::Object => f.write_str("object"),
        }
    }
}
