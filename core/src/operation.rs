#![deny(missing_docs)]

//! # Operation Assembly
//!
//! Converts one collection request into an OpenAPI operation, keyed by its
//! canonical path and lowercase method.

use crate::collection::{content_type, Body, Request, RequestItem, Response};
use crate::error::{AppError, AppResult};
use crate::params::{header_params, path_params, query_params};
use crate::schema_generator::{body_schema, form_schema};
use serde_json::{json, Map, Value};

/// Methods that may carry a request body.
const BODY_METHODS: [&str; 2] = ["put", "post"];

/// Media type used for `formdata` bodies, whatever the declared header says.
pub const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// Status key used when a request has no saved responses at all.
pub const MISSING_RESPONSE_CODE: &str = "999";

/// An assembled operation with its location in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Canonical path key, e.g. `/v1/users`.
    pub path: String,
    /// Lowercase HTTP method.
    pub method: String,
    /// The operation object.
    pub body: Value,
}

/// Strips the server base from a raw URL and drops any query suffix.
pub fn path_key(raw_url: &str, base: &str) -> String {
    let stripped = if base.is_empty() {
        if raw_url.starts_with('/') {
            raw_url.to_string()
        } else {
            format!("/{}", raw_url)
        }
    } else {
        raw_url.replace(base, "/")
    };
    match stripped.split_once('?') {
        Some((path, _query)) => path.to_string(),
        None => stripped,
    }
}

/// `{method}_{tag}-{name}`, with the name lowercased and spaces turned into hyphens.
pub fn operation_id(method: &str, tag: &str, name: &str) -> String {
    format!(
        "{}_{}-{}",
        method.to_lowercase(),
        tag,
        name.to_lowercase().replace(' ', "-")
    )
}

/// Assembles the operation for a request item under the given tag.
pub fn build_operation(item: &RequestItem, tag: &str, base: &str) -> AppResult<Operation> {
    let request = &item.request;
    let method = request.method.to_lowercase();
    let path = path_key(request.url.raw(), base);

    let mut parameters = header_params(&request.header);
    parameters.extend(path_params(&path));
    parameters.extend(query_params(request.url.query()));

    let mut operation = json!({
        "tags": [tag],
        "operationId": operation_id(&method, tag, &item.name),
        "summary": item.name,
        "parameters": parameters,
        "responses": responses(&item.response)?,
    });

    if BODY_METHODS.contains(&method.as_str()) {
        if let Some(request_body) = request_body(&item.name, request)? {
            if let Value::Object(map) = &mut operation {
                map.insert("requestBody".to_string(), request_body);
            }
        }
    }

    Ok(Operation {
        path,
        method,
        body: operation,
    })
}

/// Builds the `requestBody` object, if the request declares a content type
/// and carries a non-empty body for its mode.
///
/// `formdata` bodies become form-encoded objects of required strings; every
/// other mode is parsed as JSON and fails hard when it is not.
pub fn request_body(name: &str, request: &Request) -> AppResult<Option<Value>> {
    let Some(body) = &request.body else {
        return Ok(None);
    };
    let (Some(media_type), Some(payload)) = (content_type(&request.header), body.payload()) else {
        return Ok(None);
    };

    let mut content = Map::new();
    if body.mode == "formdata" {
        let keys = form_keys(name, body, payload)?;
        content.insert(
            FORM_MEDIA_TYPE.to_string(),
            form_schema(keys.iter().map(String::as_str)),
        );
    } else {
        let text = payload.as_str().ok_or_else(|| AppError::InvalidBody {
            request: name.to_string(),
            reason: format!("payload for mode '{}' is not text", body.mode),
        })?;
        let sample: Value = serde_json::from_str(text)?;
        content.insert(media_type.to_string(), body_schema(&sample));
    }

    Ok(Some(json!({
        "required": true,
        "content": content,
    })))
}

fn form_keys(name: &str, body: &Body, payload: &Value) -> AppResult<Vec<String>> {
    let invalid = |reason: &str| AppError::InvalidBody {
        request: name.to_string(),
        reason: format!("{} in mode '{}'", reason, body.mode),
    };
    payload
        .as_array()
        .ok_or_else(|| invalid("form fields are not a list"))?
        .iter()
        .map(|field| {
            field
                .get("key")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| invalid("form field without a key"))
        })
        .collect()
}

/// Builds the `responses` map keyed by status code.
///
/// Responses without a content type, body or status code are skipped. A request with no
/// saved responses gets the `999` placeholder entry.
pub fn responses(saved: &[Response]) -> AppResult<Value> {
    if saved.is_empty() {
        return Ok(json!({
            MISSING_RESPONSE_CODE: { "description": "RESPONSE NOT PROVIDED" }
        }));
    }

    let mut out = Map::new();
    for response in saved {
        let body = response.body.as_deref().filter(|body| !body.is_empty());
        let (Some(media_type), Some(body)) = (content_type(&response.header), body) else {
            continue;
        };
        let Some(code) = &response.code else {
            continue;
        };
        let sample: Value = serde_json::from_str(body)?;
        let mut content = Map::new();
        content.insert(media_type.to_string(), body_schema(&sample));
        out.insert(
            code.to_string(),
            json!({
                "description": response.name,
                "content": content,
            }),
        );
    }
    Ok(Value::Object(out))
}
