#![deny(missing_docs)]

//! # Schema Generator
//!
//! Infers schema nodes from sample JSON bodies.
//!
//! Only the first element of an array is sampled, and the example value is
//! attached at the body root only, never on nested nodes.

use crate::type_mapping::{map_value, SchemaType};
use serde_json::{json, Map, Value};

/// Infers the schema tree for a sampled value.
///
/// Objects recurse key by key. Arrays sample their first element: an object
/// element becomes the `items` schema directly, an empty array yields empty
/// `items`, anything else yields `{type: <primitive>}`.
pub fn infer_schema(value: &Value) -> Value {
    match value {
        Value::Object(map) => infer_object(map),
        Value::Array(items) => infer_array(items),
        other => json!({ "type": map_value(other).as_str() }),
    }
}

fn infer_object(map: &Map<String, Value>) -> Value {
    let properties: Map<String, Value> = map
        .iter()
        .map(|(key, value)| (key.clone(), infer_schema(value)))
        .collect();
    json!({
        "type": SchemaType::Object.as_str(),
        "properties": properties,
    })
}

fn infer_array(items: &[Value]) -> Value {
    let item_schema = match items.first() {
        None => json!({}),
        Some(Value::Object(first)) => infer_object(first),
        Some(first) => json!({ "type": map_value(first).as_str() }),
    };
    json!({
        "type": SchemaType::Array.as_str(),
        "items": item_schema,
    })
}

/// Builds the media-type object for a sampled body: `{schema, example}`.
///
/// For object and array roots the schema node carries the example as well.
/// Scalar bodies get an empty schema.
pub fn body_schema(body: &Value) -> Value {
    let schema = match body {
        Value::Object(_) | Value::Array(_) => {
            let mut schema = infer_schema(body);
            if let Value::Object(node) = &mut schema {
                node.insert("example".to_string(), body.clone());
            }
            schema
        }
        _ => json!({}),
    };
    json!({
        "schema": schema,
        "example": body,
    })
}

/// Builds the form-encoded media-type object: every field is a required string.
pub fn form_schema<'a>(keys: impl IntoIterator<Item = &'a str>) -> Value {
    let mut required = Vec::new();
    let mut properties = Map::new();
    for key in keys {
        required.push(Value::String(key.to_string()));
        properties.insert(key.to_string(), json!({ "type": "string" }));
    }
    json!({
        "schema": {
            "required": required,
            "type": SchemaType::Object.as_str(),
            "properties": properties,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flat_object() {
        let schema = infer_schema(&json!({"a": 1, "b": "x"}));
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "a": {"type": "integer"},
                    "b": {"type": "string"}
                }
            })
        );
    }

    #[test]
    fn test_array_samples_first_element_only() {
        let first = infer_schema(&json!([{"a": 1}, {"a": 2}]));
        let changed = infer_schema(&json!([{"a": 1}, {"b": "other", "c": [1]}]));
        assert_eq!(first, changed);
        assert_eq!(
            first,
            json!({
                "type": "array",
                "items": {"type": "object", "properties": {"a": {"type": "integer"}}}
            })
        );
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(
            infer_schema(&json!([])),
            json!({"type": "array", "items": {}})
        );
    }

    #[test]
    fn test_scalar_array_and_nesting() {
        let schema = infer_schema(&json!({"tags": ["a", "b"], "meta": {"n": null}}));
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "tags": {"type": "array", "items": {"type": "string"}},
                    "meta": {
                        "type": "object",
                        "properties": {"n": {"type": "string"}}
                    }
                }
            })
        );
    }

    #[test]
    fn test_body_schema_duplicates_example_at_root_only() {
        let body = json!({"user": {"id": 7}});
        let media = body_schema(&body);
        assert_eq!(media["example"], body);
        assert_eq!(media["schema"]["example"], body);
        assert!(media["schema"]["properties"]["user"].get("example").is_none());
    }

    #[test]
    fn test_body_schema_scalar() {
        assert_eq!(body_schema(&json!(5)), json!({"schema": {}, "example": 5}));
    }

    #[test]
    fn test_form_schema() {
        assert_eq!(
            form_schema(["user", "pass"]),
            json!({
                "schema": {
                    "required": ["user", "pass"],
                    "type": "object",
                    "properties": {
                        "user": {"type": "string"},
                        "pass": {"type": "string"}
                    }
                }
            })
        );
    }
}
