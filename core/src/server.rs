#![deny(missing_docs)]

//! # Server Builder
//!
//! Turns the shared path prefix into a server entry. Placeholders with a
//! binding are substituted in place; the rest become server variables.

use regex::Regex;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Default recorded for a server variable with no binding.
pub const UNBOUND_DEFAULT: &str = "-";

/// Builds the server object for a prefix.
///
/// Postman `{{name}}` placeholders are normalised to `{name}` first. A
/// binding that is present but empty does not substitute; it becomes the
/// variable's default instead.
pub fn build_server(prefix: &str, bindings: &BTreeMap<String, String>) -> Value {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    let placeholder_re =
        PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\{(.+?)\}").expect("Invalid regex"));

    let template = prefix.replace("{{", "{").replace("}}", "}");
    let mut url = template.clone();
    let mut variables = Map::new();

    for capture in placeholder_re.captures_iter(&template) {
        let name = &capture[1];
        match bindings.get(name) {
            Some(value) if !value.is_empty() => {
                url = url.replace(&format!("{{{}}}", name), value);
            }
            bound => {
                let default = bound.map_or(UNBOUND_DEFAULT, String::as_str);
                variables.insert(name.to_string(), json!({ "default": default }));
            }
        }
    }

    if !url.starts_with("http") {
        url = format!("http://{}", url);
    }
    json!({
        "url": url,
        "variables": variables,
    })
}
