//! Memory command type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subcommands of `onoma`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MemoryCommand {
    /// `onoma search <query>`
    Search { query: String },
    /// `onoma spaces`
    Spaces,
    /// `onoma stats`
    Stats,
}

impl MemoryCommand {
    /// Subcommand name
    pub fn name(&self) -> &'static str {
        match self {
            MemoryCommand::Search { .. } => "search",
            MemoryCommand::Spaces => "spaces",
            MemoryCommand::Stats => "stats",
        }
    }

    /// One-line help text
    pub fn description(&self) -> &'static str {
        match self {
            MemoryCommand::Search { .. } => "Search your Onoma memories",
            MemoryCommand::Spaces => "List your Onoma spaces",
            MemoryCommand::Stats => "Show your Onoma memory statistics",
        }
    }

    /// Parse `argv` after the `onoma` command name.
    ///
    /// Extra words after `search` are joined into one query.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Option<Self> {
        let (first, rest) = args.split_first()?;
        match first.as_ref() {
            "search" if !rest.is_empty() => Some(MemoryCommand::Search {
                query: rest.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" "),
            }),
            "spaces" if rest.is_empty() => Some(MemoryCommand::Spaces),
            "stats" if rest.is_empty() => Some(MemoryCommand::Stats),
            _ => None,
        }
    }
}

impl fmt::Display for MemoryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryCommand::Search { query } => write!(f, "search {}", query),
            other => f.write_str(other.name()),
        }
    }
}

/// A failed command; `Display` is the line printed to stderr
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}")]
pub struct CommandFailure {
    pub line: String,
}

impl CommandFailure {
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}
