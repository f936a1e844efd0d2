//! Command-line arguments.

use ag_protocol::request_models::EntrypointRequest;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gallery", version, about = "Run agent-gallery entrypoints")]
pub struct Cli {
    /// Project root containing `.agent-gallery/`
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available entrypoints
    List,

    /// Invoke an entrypoint
    Run {
        /// Entrypoint name
        name: String,

        /// Positional arguments
        positional: Vec<String>,

        /// Named argument as key=value (repeatable)
        #[arg(long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        named: Vec<(String, String)>,

        /// Stream the response as it is produced
        #[arg(long)]
        stream: bool,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

/// JSON when the text parses as JSON, otherwise the text as a string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn build_request(positional: &[String], named: &[(String, String)]) -> EntrypointRequest {
    let request = positional
        .iter()
        .fold(EntrypointRequest::new(), |r, p| r.with_positional(parse_value(p)));
    named
        .iter()
        .fold(request, |r, (k, v)| r.with_named(k.clone(), parse_value(v)))
}
