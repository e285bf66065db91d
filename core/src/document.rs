#![deny(missing_docs)]

//! # Document Builder
//!
//! Accumulates servers and operations for one run, then finalises the
//! OpenAPI document with its paths sorted by key.

use crate::error::AppResult;
use crate::operation::Operation;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// OpenAPI version written to every document.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// Builder for the output document.
///
/// Operations are stored per path, then per method. Insertion order during
/// accumulation carries no meaning; [`DocumentBuilder::finish`] sorts paths.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    title: String,
    servers: Vec<Value>,
    paths: IndexMap<String, IndexMap<String, Value>>,
}

impl DocumentBuilder {
    /// Creates an empty builder with an empty title.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Appends a server entry.
    pub fn add_server(&mut self, server: Value) {
        self.servers.push(server);
    }

    /// Registers an operation under its path and method.
    ///
    /// An existing operation for the same pair is replaced and returned.
    pub fn insert_operation(&mut self, operation: Operation) -> Option<Value> {
        let Operation { path, method, body } = operation;
        tracing::debug!(%path, %method, "registering operation");
        let previous = self
            .paths
            .entry(path.clone())
            .or_default()
            .insert(method.clone(), body);
        if previous.is_some() {
            tracing::warn!(%path, %method, "operation overwritten by a later request");
        }
        previous
    }

    /// Operations registered so far, in insertion order.
    pub fn paths(&self) -> &IndexMap<String, IndexMap<String, Value>> {
        &self.paths
    }

    /// Sorts paths lexicographically and produces the final document.
    pub fn finish(mut self) -> Value {
        self.paths.sort_keys();
        let operations: usize = self.paths.values().map(IndexMap::len).sum();
        tracing::info!(
            title = %self.title,
            paths = self.paths.len(),
            operations,
            "document assembled"
        );
        json!({
            "openapi": OPENAPI_VERSION,
            "info": {
                "title": self.title,
                "description": "",
                "version": "1.0",
            },
            "servers": self.servers,
            "paths": self.paths,
            "security": [{ "ApiKeyAuth": [] }],
            "components": {
                "securitySchemes": {
                    "ApiKeyAuth": {
                        "type": "apiKey",
                        "in": "header",
                        "name": "secret",
                    }
                }
            },
        })
    }
}

/// Serialises a document as JSON indented by four spaces.
pub fn to_json_string(document: &Value) -> AppResult<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    document.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Serialises a document as YAML.
pub fn to_yaml_string(document: &Value) -> AppResult<String> {
    Ok(serde_yaml::to_string(document)?)
}

/// Writes a document, choosing YAML for `.yaml`/`.yml` and JSON otherwise.
///
/// Missing parent directories are created.
pub fn write_document(document: &Value, path: &Path) -> AppResult<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let output = match ext {
        "yaml" | "yml" => to_yaml_string(document)?,
        _ => to_json_string(document)?,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, output)?;
    Ok(())
}
