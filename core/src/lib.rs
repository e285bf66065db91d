#![deny(missing_docs)]

//! # Postman OpenAPI Core
//!
//! Converts exported Postman collections into OpenAPI 3.0 documents by
//! inferring schemas from the example bodies saved alongside each request.

/// Shared error types.
pub mod error;

/// Input collection model.
pub mod collection;

/// Sampled value -> schema primitive.
pub mod type_mapping;

/// Schema inference from example bodies.
pub mod schema_generator;

/// Description annotations (`key=value|...`).
pub mod annotation;

/// Header and query parameter objects.
pub mod params;

/// Shared URL prefix resolution.
pub mod prefix;

/// Server entry construction.
pub mod server;

/// Per-request operation assembly.
pub mod operation;

/// Output document accumulation and serialization.
pub mod document;

/// End-to-end conversion.
pub mod converter;

pub use annotation::parse_annotation;
pub use collection::Collection;
pub use converter::{convert_collection, convert_json};
pub use document::{to_json_string, to_yaml_string, write_document, DocumentBuilder};
pub use error::{AppError, AppResult};
pub use operation::{build_operation, Operation};
pub use prefix::{collect_urls, common_prefix, server_base};
pub use schema_generator::{body_schema, infer_schema};
pub use server::build_server;
pub use type_mapping::{map_value, SchemaType};
