#![deny(missing_docs)]

//! # Type Mapping
//!
//! Maps a sampled JSON value onto the closed set of schema primitives the
//! generated documents use.

use serde_json::Value;
use std::fmt::Display;

/// Schema primitive emitted for a sampled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    /// Any number (floats are not distinguished) or boolean.
    Integer,
    /// Strings, and `null` samples.
    String,
    /// JSON objects.
    Object,
    /// JSON arrays.
    Array,
}

impl SchemaType {
    /// The OpenAPI `type` keyword value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Integer => "integer",
            SchemaType::String => "string",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
        }
    }
}

impl Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&Value> for SchemaType {
    fn from(value: &Value) -> Self {
        map_value(value)
    }
}

/// Maps a sampled value to its schema primitive.
///
/// `null` maps to `string`; existing documents depend on it.
pub fn map_value(value: &Value) -> SchemaType {
    match value {
        Value::Null | Value::String(_) => SchemaType::String,
        Value::Number(_) | Value::Bool(_) => SchemaType::Integer,
        Value::Object(_) => SchemaType::Object,
        Value::Array(_) => SchemaType::Array,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primitive_mapping() {
        assert_eq!(map_value(&json!(1)), SchemaType::Integer);
        assert_eq!(map_value(&json!("x")), SchemaType::String);
        assert_eq!(map_value(&json!({})), SchemaType::Object);
        assert_eq!(map_value(&json!([])), SchemaType::Array);
    }

    #[test]
    fn test_null_falls_back_to_string() {
        assert_eq!(map_value(&Value::Null), SchemaType::String);
    }

    #[test]
    fn test_floats_are_not_distinguished() {
        assert_eq!(map_value(&json!(1.5)), SchemaType::Integer);
        assert_eq!(SchemaType::from(&json!(-3.25)).to_string(), "integer");
    }
}
