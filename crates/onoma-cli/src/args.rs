//! CLI argument definitions using clap
//!
//! - onoma search <query>     # Semantic search over memories
//! - onoma spaces             # List spaces
//! - onoma stats              # Memory statistics

use clap::{Parser, Subcommand};
use onoma_core::commands::MemoryCommand;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "onoma")]
#[command(about = "Onoma memory operations")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON plugin config file (apiToken, apiUrl, ...)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Search your Onoma memories
    Search {
        /// Search query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List your Onoma spaces
    Spaces,
    /// Show your Onoma memory statistics
    Stats,
}

impl From<Commands> for MemoryCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Search { query } => MemoryCommand::Search {
                query: query.join(" "),
            },
            Commands::Spaces => MemoryCommand::Spaces,
            Commands::Stats => MemoryCommand::Stats,
        }
    }
}
