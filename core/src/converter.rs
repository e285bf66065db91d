#![deny(missing_docs)]

//! # Collection Conversion
//!
//! Drives a full run: resolve the shared prefix, build the server entry,
//! then walk the tree depth-first registering one operation per request.

use crate::collection::{Collection, Item};
use crate::document::DocumentBuilder;
use crate::error::AppResult;
use crate::operation::build_operation;
use crate::prefix::{collect_urls, common_prefix, server_base};
use crate::server::build_server;
use serde_json::Value;
use std::collections::BTreeMap;

/// Converts a collection into a finished OpenAPI document.
///
/// `bindings` substitute server placeholders (see [`build_server`]).
/// Each top-level folder name tags every request beneath it, however deeply
/// nested; requests at the root are tagged with the collection name.
pub fn convert_collection(
    collection: &Collection,
    bindings: &BTreeMap<String, String>,
) -> AppResult<Value> {
    let urls = collect_urls(&collection.item);
    let prefix = common_prefix(urls.iter().map(String::as_str));
    let base = server_base(&prefix, &urls);
    tracing::debug!(%prefix, %base, urls = urls.len(), "resolved server base");

    let mut document = DocumentBuilder::new().with_title(collection.info.name.as_str());
    document.add_server(build_server(&base, bindings));

    for item in &collection.item {
        match item {
            Item::Folder(folder) => visit(&mut document, &folder.item, &folder.name, &base)?,
            Item::Request(_) => visit(
                &mut document,
                std::slice::from_ref(item),
                &collection.info.name,
                &base,
            )?,
        }
    }

    Ok(document.finish())
}

/// Parses collection JSON text and converts it.
pub fn convert_json(text: &str, bindings: &BTreeMap<String, String>) -> AppResult<Value> {
    let collection = Collection::from_json(text)?;
    convert_collection(&collection, bindings)
}

fn visit(document: &mut DocumentBuilder, items: &[Item], tag: &str, base: &str) -> AppResult<()> {
    for item in items {
        match item {
            Item::Request(request) => {
                document.insert_operation(build_operation(request, tag, base)?);
            }
            Item::Folder(folder) => visit(document, &folder.item, tag, base)?,
        }
    }
    Ok(())
}
