#![deny(missing_docs)]

//! # Convert Command
//!
//! Reads a collection export, converts it and writes the OpenAPI document.
//! Nothing is written unless the whole conversion succeeds.

use postman_openapi_core::{convert_json, write_document, AppError, AppResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Arguments for the conversion.
#[derive(clap::Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Path to the exported collection JSON.
    pub input: PathBuf,

    /// Server variable bindings substituted into the shared URL prefix.
    /// Format: `"name=value"`.
    /// Example: `"host=api.example.com"`
    #[clap(value_parser = parse_key_val)]
    pub bindings: Vec<(String, String)>,

    /// Output path for the document.
    /// Supports .json and .yaml/.yml extensions.
    #[clap(
        short,
        long,
        env = "POSTMAN_OPENAPI_OUTPUT",
        default_value = "test_site/swagger.json"
    )]
    pub output: PathBuf,
}

/// Helper to parse "key=value" arguments.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Executes the conversion.
///
/// # Arguments
///
/// * `args` - Command arguments.
pub fn execute(args: &ConvertArgs) -> AppResult<()> {
    if !args.input.exists() {
        return Err(AppError::General(format!(
            "Collection file not found: {:?}",
            args.input
        )));
    }

    tracing::info!(input = ?args.input, "reading collection");
    let text = fs::read_to_string(&args.input)?;

    let bindings: BTreeMap<String, String> = args.bindings.iter().cloned().collect();
    let document = convert_json(&text, &bindings)?;

    write_document(&document, &args.output)?;
    tracing::info!(output = ?args.output, "document written");
    Ok(())
}
