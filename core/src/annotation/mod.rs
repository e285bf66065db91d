#![deny(missing_docs)]

//! # Annotations
//!
//! Descriptions on headers and query parameters may carry schema hints as
//! pipe separated `key=value` pairs, e.g. `enum=['a','b']|required=True`.
//! Values are literals (see [`literal`]).
//!
//! Parsing is all-or-nothing: if any segment is malformed, the whole string is
//! treated as a plain description.

/// Restricted literal parser for annotation values.
pub mod literal;

use self::literal::{parse_literal, LiteralError};
use derive_more::Display;
use serde_json::{Map, Value};

/// Why an annotation string was rejected.
#[derive(Debug, Display)]
pub enum AnnotationError {
    /// A segment did not split into exactly one key and one value.
    #[display("segment '{_0}' is not a single key=value pair")]
    Segment(String),
    /// A value failed to parse as a literal.
    #[display("value of '{key}': {source}")]
    Literal {
        /// The key whose value failed.
        key: String,
        /// Underlying literal error.
        source: LiteralError,
    },
}

impl std::error::Error for AnnotationError {}

/// Parses an annotation string strictly, without any fallback.
pub fn try_parse_annotation(text: &str) -> Result<Map<String, Value>, AnnotationError> {
    let mut parsed = Map::new();
    for segment in text.split('|') {
        let segment = segment.trim();
        let mut parts = segment.split('=');
        let (key, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => (key, value),
            _ => return Err(AnnotationError::Segment(segment.to_string())),
        };
        let value = parse_literal(value).map_err(|source| AnnotationError::Literal {
            key: key.to_string(),
            source,
        })?;
        parsed.insert(key.to_string(), value);
    }
    Ok(parsed)
}

/// Parses a description into annotation overrides.
///
/// Never fails: an empty or absent description, or one that does not parse,
/// yields `{"description": <original>}`.
pub fn parse_annotation(description: Option<&str>) -> Map<String, Value> {
    if let Some(text) = description.filter(|text| !text.is_empty()) {
        match try_parse_annotation(text) {
            Ok(parsed) => return parsed,
            Err(error) => {
                tracing::warn!(%error, description = text, "treating description as plain text");
            }
        }
    }
    let mut fallback = Map::new();
    fallback.insert(
        "description".to_string(),
        description.map_or(Value::Null, |text| Value::String(text.to_string())),
    );
    fallback
}
