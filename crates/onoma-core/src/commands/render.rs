//! Console text for each memory command

use super::types::{CommandFailure, MemoryCommand};
use crate::client::{MemorySearchResult, MemoryStats, OnomaClient, Space};
use crate::error::UnifiedError;
use crate::format::ranked_entry;

/// Run `command` and return the exact text for stdout.
///
/// On failure the returned [`CommandFailure`] holds the line for stderr.
pub async fn render(client: &OnomaClient, command: &MemoryCommand) -> Result<String, CommandFailure> {
    match command {
        MemoryCommand::Search { query } => client
            .search_memories(query, None)
            .await
            .map(|results| render_search(&results))
            .map_err(|e| CommandFailure::new(format!("Search failed: {}", e.message()))),
        MemoryCommand::Spaces => client
            .list_spaces()
            .await
            .map(|spaces| render_spaces(&spaces))
            .map_err(|e| CommandFailure::new(format!("Failed to list spaces: {}", e.message()))),
        MemoryCommand::Stats => client
            .get_memory_stats()
            .await
            .map(|stats| render_stats(&stats))
            .map_err(|e| CommandFailure::new(format!("Failed to get stats: {}", e.message()))),
    }
}

pub fn render_search(results: &MemorySearchResult) -> String {
    if results.memories.is_empty() {
        return "No relevant memories found.\n".to_string();
    }

    let mut out = format!("\nFound {} relevant memories:\n\n", results.memories.len());
    for (i, memory) in results.memories.iter().enumerate() {
        out.push_str(&ranked_entry(i, memory));
        out.push_str("\n\n");
    }
    out
}

pub fn render_spaces(spaces: &[Space]) -> String {
    if spaces.is_empty() {
        return "No spaces found.\n".to_string();
    }

    let mut out = String::from("\nYour Onoma spaces:\n\n");
    for space in spaces {
        out.push_str(&format!("• {}\n", space.name));
        if !space.topics.is_empty() {
            out.push_str(&format!("  Topics: {}\n", space.topics.join(", ")));
        }
        out.push_str(&format!(
            "  Active: {}\n",
            if space.is_active { "Yes" } else { "No" }
        ));
        out.push_str(&format!("  Contexts: {}\n\n", space.context_count));
    }
    out
}

pub fn render_stats(stats: &MemoryStats) -> String {
    format!(
        "\nOnoma Memory Statistics:\n\n\
         Total contexts: {}\n\
         Total spaces: {}\n\
         Recent contexts: {}\n\n",
        stats.total_contexts, stats.total_spaces, stats.recent_contexts
    )
}
