//! JSON value kinds
//!
//! Payloads are decoded into `serde_json::Value`, which is already a tagged
//! union (null/bool/number/string/array/object). [`JsonKind`] names the tag
//! without carrying the data, so errors can report what was found instead
//! of what was expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type tag of a decoded JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonKind {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any JSON number
    Number,
    /// A JSON string
    String,
    /// A JSON array
    Array,
    /// A JSON object
    Object,
}

impl JsonKind {
    /// Classify a decoded value
    pub fn of(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonKind::Null,
            serde_json::Value::Bool(_) => JsonKind::Boolean,
            serde_json::Value::Number(_) => JsonKind::Number,
            serde_json::Value::String(_) => JsonKind::String,
            serde_json::Value::Array(_) => JsonKind::Array,
            serde_json::Value::Object(_) => JsonKind::Object,
        }
    }

    /// Lower-case name used in messages and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Boolean => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
