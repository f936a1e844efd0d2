mod args;
mod logging;

use ag_core::config::load_config;
use ag_core::entrypoint::EntrypointRegistry;
use ag_protocol::request_models::EntrypointRequest;
use ag_protocol::response_models::ChunkType;
use args::{build_request, Cli, Command};
use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use colored::Colorize;
use std::io::Write;
use tokio_stream::StreamExt;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let logs = logging::init_logging();

    let config = load_config(&cli.root).await?;
    logs.apply_config_level(&config.global.log_level);
    let registry = EntrypointRegistry::from_config(&config)?;
    tracing::debug!(
        root = %cli.root.display(),
        entrypoints = registry.len(),
        "registry ready"
    );

    match cli.command {
        Command::List => list(&registry),
        Command::Run {
            name,
            positional,
            named,
            stream,
            json,
        } => {
            let request = build_request(&positional, &named);
            let streaming = stream
                || registry
                    .get(&name)
                    .is_some_and(|entrypoint| entrypoint.is_streaming());
            if streaming {
                run_stream(&registry, &name, &request, json).await
            } else {
                run(&registry, &name, &request, json).await
            }
        }
    }
}

fn list(registry: &EntrypointRegistry) -> Result<()> {
    if registry.is_empty() {
        println!("{}", "No entrypoints found in .agent-gallery/entrypoints".yellow());
        return Ok(());
    }

    for (name, description) in registry.describe() {
        if description.is_empty() {
            println!("{}", name.bold());
        } else {
            println!("{}  {}", name.bold(), description.dimmed());
        }
    }
    Ok(())
}

async fn run(
    registry: &EntrypointRegistry,
    name: &str,
    request: &EntrypointRequest,
    json: bool,
) -> Result<()> {
    let response = registry.invoke(name, request).await?;

    if json {
        println!("{}", serde_json::to_string(&response)?);
    } else if let Some(content) = &response.content {
        println!("{}", content);
    }

    match response.error {
        Some(error) if !response.success => Err(eyre!(error)),
        _ => Ok(()),
    }
}

async fn run_stream(
    registry: &EntrypointRegistry,
    name: &str,
    request: &EntrypointRequest,
    json: bool,
) -> Result<()> {
    let mut chunks = registry.invoke_stream(name, request)?;
    let mut stdout = std::io::stdout();
    let mut failure = None;

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        if json {
            writeln!(stdout, "{}", serde_json::to_string(&chunk)?)?;
        } else {
            match chunk.chunk_type {
                ChunkType::Content => {
                    write!(stdout, "{}", chunk.content)?;
                    stdout.flush()?;
                }
                ChunkType::Complete => writeln!(stdout)?,
                ChunkType::Error | ChunkType::SessionInfo | ChunkType::SessionEnd => {}
            }
        }
        if chunk.chunk_type == ChunkType::Error {
            failure = Some(chunk.content);
        }
    }

    match failure {
        Some(error) => Err(eyre!(error)),
        None => Ok(()),
    }
}
