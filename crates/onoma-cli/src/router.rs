//! Command routing logic for CLI

use crate::args::Cli;
use crate::console::CliConsole;
use anyhow::{Context, Result};
use onoma_core::client::OnomaClient;
use onoma_core::commands::{MemoryCommand, render};
use onoma_core::config::parse_config;
use std::path::Path;
use tracing::debug;

/// Process exit code for a successful command
pub const EXIT_SUCCESS: i32 = 0;
/// Process exit code for any failure
pub const EXIT_FAILURE: i32 = 1;

/// Run the parsed command and return the process exit code.
///
/// Errors are configuration or setup problems; command failures are printed
/// here and reported through the exit code.
pub async fn route(cli: Cli) -> Result<i32> {
    let console = CliConsole::new(cli.verbose);

    let raw = match &cli.config {
        Some(path) => Some(load_config_file(path)?),
        None => None,
    };
    let config = parse_config(raw.as_ref())?;
    console.info(&format!("Using {} ({})", config.api_url, config.masked_token()));

    let client = OnomaClient::new(&config)?;
    let command = MemoryCommand::from(cli.command);
    debug!(command = %command, "running onoma command");

    match render(&client, &command).await {
        Ok(text) => match console.output(&text) {
            Ok(()) => Ok(EXIT_SUCCESS),
            Err(err) => {
                console.error(&format!("Failed to write output: {}", err));
                Ok(EXIT_FAILURE)
            }
        },
        Err(failure) => {
            console.error(&failure.to_string());
            Ok(EXIT_FAILURE)
        }
    }
}

fn load_config_file(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Config file {} is not valid JSON", path.display()))
}
