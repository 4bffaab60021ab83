//! Automatic recall before each agent turn

use super::{Hook, HookEvent, HookInput, HookOutput};
use crate::client::{Memory, OnomaClient};
use crate::config::OnomaConfig;
use crate::error::UnifiedError;
use crate::format::recall_line;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

/// Prompts shorter than this (in characters) are not searched
pub const MIN_PROMPT_CHARS: usize = 5;

/// Searches memory with the user prompt and prepends the hits
pub struct RecallHook {
    client: Arc<OnomaClient>,
    config: Arc<OnomaConfig>,
}

impl RecallHook {
    pub fn new(client: Arc<OnomaClient>, config: Arc<OnomaConfig>) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Hook for RecallHook {
    fn event(&self) -> HookEvent {
        HookEvent::BeforeAgentStart
    }

    async fn handle(&self, input: &HookInput) -> Option<HookOutput> {
        let prompt = input.prompt.as_deref()?;
        if prompt.chars().count() < MIN_PROMPT_CHARS {
            return None;
        }

        let results = match self
            .client
            .search_memories(prompt, Some(self.config.max_recall_results))
            .await
        {
            Ok(results) => results,
            Err(err) => {
                error!("onoma recall failed: {}", err.message());
                return None;
            }
        };

        if results.memories.is_empty() {
            return None;
        }

        if self.config.debug {
            debug!(
                "onoma recall: found {} relevant memories for query",
                results.memories.len()
            );
        }

        Some(HookOutput::prepend(format_context(&results.memories)))
    }
}

/// Wrap memories in the `<onoma-context>` block
pub fn format_context(memories: &[Memory]) -> String {
    let lines = memories
        .iter()
        .enumerate()
        .map(|(i, m)| recall_line(i, m))
        .collect::<Vec<_>>()
        .join("\n");
    format!("<onoma-context>\nRelevant memories:\n\n{}\n</onoma-context>", lines)
}
