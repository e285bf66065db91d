#![deny(missing_docs)]

//! # Parameter Builder
//!
//! Builds OpenAPI parameter objects for request headers and query entries,
//! folding annotation overrides from each entry's description.

use crate::annotation::parse_annotation;
use crate::collection::{KeyValue, CONTENT_TYPE};
use serde_json::{json, Value};

/// Annotation keys that belong to the nested `schema` rather than the parameter.
const SCHEMA_KEYS: [&str; 3] = ["enum", "type", "example"];

/// Builds header parameters, skipping `Content-Type`.
pub fn header_params(headers: &[KeyValue]) -> Vec<Value> {
    headers
        .iter()
        .filter(|header| header.key != CONTENT_TYPE)
        .map(|header| {
            let description = header.description_text();
            let param = json!({
                "name": header.key,
                "in": "header",
                "required": true,
                "style": "simple",
                "explode": false,
                "schema": {
                    "type": "string",
                    "example": header.example(),
                },
                "description": description,
            });
            apply_overrides(param, description)
        })
        .collect()
}

/// Builds query parameters.
///
/// The default description is always empty; only annotations (or an
/// explicit `null` description) change it.
pub fn query_params(query: &[KeyValue]) -> Vec<Value> {
    query
        .iter()
        .map(|entry| {
            let param = json!({
                "name": entry.key,
                "in": "query",
                "required": false,
                "schema": {
                    "type": "string",
                    "example": entry.example(),
                },
                "description": "",
            });
            apply_overrides(param, entry.description_text())
        })
        .collect()
}

/// Path parameters are not extracted from templates; always empty.
pub fn path_params(_path: &str) -> Vec<Value> {
    Vec::new()
}

/// Folds parsed annotations into a parameter object.
///
/// `enum`, `type` and `example` go into `schema`; every other key, including
/// `required` and `description`, overwrites the parameter's top level.
pub fn apply_overrides(mut param: Value, description: Option<&str>) -> Value {
    let overrides = parse_annotation(description);
    if let Value::Object(param_map) = &mut param {
        for (key, value) in overrides {
            if SCHEMA_KEYS.contains(&key.as_str()) {
                if let Some(Value::Object(schema)) = param_map.get_mut("schema") {
                    schema.insert(key, value);
                }
            } else {
                param_map.insert(key, value);
            }
        }
    }
    param
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries(value: Value) -> Vec<KeyValue> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_header_param_defaults() {
        let headers = entries(json!([
            {"key": "Content-Type", "value": "application/json"},
            {"key": "X-Trace", "value": "abc"}
        ]));
        let params = header_params(&headers);
        assert_eq!(params.len(), 1);
        assert_eq!(
            params[0],
            json!({
                "name": "X-Trace",
                "in": "header",
                "required": true,
                "style": "simple",
                "explode": false,
                "schema": {"type": "string", "example": "abc"},
                "description": ""
            })
        );
    }

    #[test]
    fn test_secret_header_is_redacted() {
        let headers = entries(json!([
            {"key": "Content-Type", "value": "application/json"},
            {"key": "secret", "value": "{{secret_key}}"}
        ]));
        let params = header_params(&headers);
        assert_eq!(params[0]["schema"]["example"], json!(""));
    }

    #[test]
    fn test_annotation_overrides() {
        let headers = entries(json!([{
            "key": "X-Mode",
            "value": "a",
            "description": "enum=['a','b']|required=False|description='Mode switch'"
        }]));
        let param = &header_params(&headers)[0];
        assert_eq!(param["schema"]["enum"], json!(["a", "b"]));
        assert_eq!(param["schema"]["type"], json!("string"));
        assert_eq!(param["required"], json!(false));
        assert_eq!(param["description"], json!("Mode switch"));
    }

    #[test]
    fn test_plain_description_is_kept() {
        let query = entries(json!([{"key": "limit", "value": "10", "description": "page size"}]));
        let param = &query_params(&query)[0];
        assert_eq!(
            *param,
            json!({
                "name": "limit",
                "in": "query",
                "required": false,
                "schema": {"type": "string", "example": "10"},
                "description": "page size"
            })
        );
    }

    #[test]
    fn test_query_annotation_required() {
        let query = entries(json!([{
            "key": "page",
            "value": "1",
            "description": "type='integer'|example=1|required=True"
        }]));
        let param = &query_params(&query)[0];
        assert_eq!(param["schema"], json!({"type": "integer", "example": 1}));
        assert_eq!(param["required"], json!(true));
        assert_eq!(param["description"], json!(""));
    }

    #[test]
    fn test_null_description_stays_null() {
        let headers = entries(json!([{"key": "X-A", "value": "1", "description": null}]));
        assert_eq!(header_params(&headers)[0]["description"], Value::Null);

        let query = entries(json!([{"key": "q", "value": "1", "description": null}]));
        assert_eq!(query_params(&query)[0]["description"], Value::Null);
    }

    #[test]
    fn test_path_params_are_empty() {
        assert!(path_params("/users/{id}").is_empty());
    }
}
