#![deny(missing_docs)]

//! # Postman OpenAPI CLI
//!
//! Converts an exported Postman collection into an OpenAPI 3.0 document.
//!
//! Usage: `postman-openapi collection.json [name=value ...] [--output path]`

use clap::Parser;
use postman_openapi_core::AppResult;
use tracing_subscriber::EnvFilter;

mod convert;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Postman collection to OpenAPI converter")]
struct Cli {
    #[clap(flatten)]
    convert: convert::ConvertArgs,

    /// Log every registered operation.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    convert::execute(&cli.convert)
}
