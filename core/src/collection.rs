#![deny(missing_docs)]

//! # Collection Model
//!
//! Serde model of an exported Postman collection (v2.x). Only the fields the
//! converter reads are modelled; everything else is ignored on load.
//! Collections are read-only inputs and are never mutated.

use crate::error::AppResult;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;

/// Header value Postman uses for the API secret; never copied into examples.
pub const SECRET_PLACEHOLDER: &str = "{{secret_key}}";

/// The exact header key carrying the body media type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Root of an exported collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    /// Collection metadata.
    pub info: CollectionInfo,
    /// Top-level items; each folder here becomes an operation tag.
    #[serde(default, deserialize_with = "nullable")]
    pub item: Vec<Item>,
}

impl Collection {
    /// Parses a collection from its JSON text.
    pub fn from_json(text: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Collection metadata block.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionInfo {
    /// Human readable collection name; becomes the document title.
    pub name: String,
}

/// A node of the collection tree.
///
/// Requests are matched first, so an object carrying both `request` and
/// `item` is treated as a request.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Item {
    /// A single request with its saved responses.
    Request(RequestItem),
    /// A folder of nested items.
    Folder(Folder),
}

/// A folder holding further items.
#[derive(Debug, Clone, Deserialize)]
pub struct Folder {
    /// Folder name.
    #[serde(default)]
    pub name: String,
    /// Child items, folders and requests alike. Items with neither
    /// `request` nor `item` land here as empty folders.
    #[serde(default, deserialize_with = "nullable")]
    pub item: Vec<Item>,
}

/// A request leaf.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestItem {
    /// Request name, used for the summary and the operation id.
    #[serde(default)]
    pub name: String,
    /// The HTTP request descriptor.
    pub request: Request,
    /// Saved example responses.
    #[serde(default, deserialize_with = "nullable")]
    pub response: Vec<Response>,
}

/// HTTP request descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// HTTP method, any case.
    #[serde(default = "default_method")]
    pub method: String,
    /// Header entries, in declaration order.
    #[serde(default, deserialize_with = "nullable")]
    pub header: Vec<KeyValue>,
    /// URL template.
    pub url: Url,
    /// Optional request body.
    #[serde(default)]
    pub body: Option<Body>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// Request URL, either the short string form or the structured object form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Url {
    /// `"url": "https://host/path?x=1"`
    Raw(String),
    /// `"url": {"raw": "...", "query": [...]}`
    Detailed(DetailedUrl),
}

/// Structured URL form.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailedUrl {
    /// The full URL template as typed by the user.
    pub raw: String,
    /// Query parameter entries.
    #[serde(default, deserialize_with = "nullable")]
    pub query: Vec<KeyValue>,
}

impl Url {
    /// The raw URL template, including any query suffix.
    pub fn raw(&self) -> &str {
        match self {
            Url::Raw(raw) => raw,
            Url::Detailed(url) => &url.raw,
        }
    }

    /// Declared query entries. The string form never declares any.
    pub fn query(&self) -> &[KeyValue] {
        match self {
            Url::Raw(_) => &[],
            Url::Detailed(url) => &url.query,
        }
    }
}

/// A key/value entry (header, query parameter or form field).
#[derive(Debug, Clone, Deserialize)]
pub struct KeyValue {
    /// Entry name.
    pub key: String,
    /// Entry value; `null` is kept as-is for query flags.
    #[serde(default)]
    pub value: Option<String>,
    /// Free-text description, possibly carrying annotations.
    /// Outer `None` when the key is absent, inner `None` when it is `null`.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<Description>>,
}

impl KeyValue {
    /// The value to use as a parameter example, with the secret placeholder redacted.
    pub fn example(&self) -> Value {
        match self.value.as_deref() {
            Some(SECRET_PLACEHOLDER) => Value::String(String::new()),
            Some(value) => Value::String(value.to_string()),
            None => Value::Null,
        }
    }

    /// The description text: empty when absent, `None` when explicitly `null`.
    pub fn description_text(&self) -> Option<&str> {
        match &self.description {
            None => Some(""),
            Some(description) => description.as_ref().map(Description::text),
        }
    }
}

/// Postman descriptions are either plain strings or `{content, type}` objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Description {
    /// Plain text.
    Text(String),
    /// Rich description object.
    Rich {
        /// Description body.
        #[serde(default)]
        content: String,
    },
}

impl Description {
    /// The description body.
    pub fn text(&self) -> &str {
        match self {
            Description::Text(text) => text,
            Description::Rich { content } => content,
        }
    }
}

/// Request body: a mode tag plus the mode-specific payload stored under a key
/// of the same name (`raw`, `formdata`, `urlencoded`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Body {
    /// Body mode tag.
    #[serde(default)]
    pub mode: String,
    /// Every other field of the body object.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Body {
    /// The payload for the declared mode, if present and non-empty.
    pub fn payload(&self) -> Option<&Value> {
        self.fields.get(&self.mode).filter(|payload| !is_empty(payload))
    }
}

/// A saved example response.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    /// Response name; becomes the response description.
    #[serde(default)]
    pub name: String,
    /// HTTP status code; responses without one are skipped.
    #[serde(default)]
    pub code: Option<StatusCode>,
    /// Response header entries.
    #[serde(default, deserialize_with = "nullable")]
    pub header: Vec<KeyValue>,
    /// Raw response body text.
    #[serde(default)]
    pub body: Option<String>,
}

/// Status codes appear as numbers in exports, but strings are accepted too.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusCode {
    /// Numeric form.
    Numeric(u64),
    /// Textual form.
    Text(String),
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Numeric(code) => write!(f, "{}", code),
            StatusCode::Text(code) => f.write_str(code),
        }
    }
}

/// Finds the first non-empty `Content-Type` header value.
pub fn content_type(headers: &[KeyValue]) -> Option<&str> {
    headers
        .iter()
        .find(|h| h.key == CONTENT_TYPE)
        .and_then(|h| h.value.as_deref())
        .filter(|value| !value.is_empty())
}

/// Marks a field as present, keeping `null` distinct from a missing key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Treats `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(b) => !b,
        Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_item(value: Value) -> Item {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_and_folder_are_distinguished() {
        let folder = parse_item(json!({"name": "Users", "item": []}));
        assert!(matches!(folder, Item::Folder(_)));

        let request = parse_item(json!({
            "name": "List",
            "request": {"method": "GET", "url": "https://api.example.com/v1/users"}
        }));
        match request {
            Item::Request(r) => {
                assert_eq!(r.request.url.raw(), "https://api.example.com/v1/users");
                assert!(r.request.header.is_empty());
                assert!(r.response.is_empty());
            }
            _ => panic!("expected a request item"),
        }
    }

    #[test]
    fn test_detailed_url_and_null_lists() {
        let item = parse_item(json!({
            "name": "Search",
            "request": {
                "method": "get",
                "header": null,
                "url": {
                    "raw": "{{host}}/search?q=rust",
                    "query": [{"key": "q", "value": "rust"}]
                }
            },
            "response": null
        }));
        let Item::Request(r) = item else {
            panic!("expected a request item")
        };
        assert_eq!(r.request.url.raw(), "{{host}}/search?q=rust");
        assert_eq!(r.request.url.query().len(), 1);
        assert_eq!(r.request.url.query()[0].key, "q");
    }

    #[test]
    fn test_secret_placeholder_is_redacted() {
        let kv: KeyValue =
            serde_json::from_value(json!({"key": "secret", "value": "{{secret_key}}"})).unwrap();
        assert_eq!(kv.example(), json!(""));

        let kv: KeyValue = serde_json::from_value(json!({"key": "flag", "value": null})).unwrap();
        assert_eq!(kv.example(), Value::Null);
    }

    #[test]
    fn test_rich_description() {
        let kv: KeyValue = serde_json::from_value(json!({
            "key": "x",
            "value": "1",
            "description": {"content": "type='integer'", "type": "text/plain"}
        }))
        .unwrap();
        assert_eq!(kv.description_text(), Some("type='integer'"));
    }

    #[test]
    fn test_absent_and_null_description() {
        let absent: KeyValue = serde_json::from_value(json!({"key": "x"})).unwrap();
        assert_eq!(absent.description_text(), Some(""));

        let null: KeyValue =
            serde_json::from_value(json!({"key": "x", "description": null})).unwrap();
        assert_eq!(null.description_text(), None);
    }

    #[test]
    fn test_item_without_request_or_children_is_empty_folder() {
        match parse_item(json!({"name": "Note"})) {
            Item::Folder(folder) => assert!(folder.item.is_empty()),
            _ => panic!("expected a folder item"),
        }
    }

    #[test]
    fn test_response_without_code() {
        let response: Response =
            serde_json::from_value(json!({"name": "Draft", "header": []})).unwrap();
        assert_eq!(response.code, None);
    }

    #[test]
    fn test_body_payload_for_mode() {
        let body: Body =
            serde_json::from_value(json!({"mode": "raw", "raw": "{\"a\": 1}"})).unwrap();
        assert_eq!(body.payload(), Some(&json!("{\"a\": 1}")));

        let empty: Body = serde_json::from_value(json!({"mode": "raw", "raw": ""})).unwrap();
        assert!(empty.payload().is_none());

        let mismatched: Body =
            serde_json::from_value(json!({"mode": "formdata", "raw": "{}"})).unwrap();
        assert!(mismatched.payload().is_none());
    }

    #[test]
    fn test_content_type_lookup() {
        let headers: Vec<KeyValue> = serde_json::from_value(json!([
            {"key": "Accept", "value": "*/*"},
            {"key": "Content-Type", "value": "application/json"}
        ]))
        .unwrap();
        assert_eq!(content_type(&headers), Some("application/json"));
        assert_eq!(content_type(&headers[..1]), None);
    }

    #[test]
    fn test_status_code_display() {
        assert_eq!(StatusCode::Numeric(200).to_string(), "200");
        assert_eq!(StatusCode::Text("default".into()).to_string(), "default");
    }
}
