//! `onoma_remember`: explicitly store one fact

use super::base::{Tool, ToolError};
use super::types::{ToolCall, ToolParameter, ToolResult, ToolSchema};
use crate::client::{DEFAULT_CONTEXT_TYPE, OnomaClient};
use crate::config::OnomaConfig;
use crate::error::UnifiedError;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

pub const REMEMBER_TOOL_NAME: &str = "onoma_remember";

/// Context types the service accepts
pub const CONTEXT_TYPES: [&str; 6] = [
    "user_fact",
    "preference",
    "goal",
    "relationship",
    "event",
    "knowledge",
];

/// Shortest content accepted, in characters
pub const MIN_CONTENT_CHARS: usize = 10;

pub struct RememberTool {
    client: Arc<OnomaClient>,
    config: Arc<OnomaConfig>,
}

impl RememberTool {
    pub fn new(client: Arc<OnomaClient>, config: Arc<OnomaConfig>) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Tool for RememberTool {
    fn name(&self) -> &str {
        REMEMBER_TOOL_NAME
    }

    fn label(&self) -> &str {
        "Store in Onoma Memory"
    }

    fn description(&self) -> &str {
        "Explicitly store a fact or piece of information in your Onoma memory."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![
                ToolParameter::string(
                    "content",
                    "The information to remember (must be a complete sentence, not a fragment)",
                ),
                ToolParameter::string("contextType", "The type of context (default: user_fact)")
                    .optional()
                    .with_enum(CONTEXT_TYPES),
            ],
        )
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let content = call.get_string("content").unwrap_or_default();
        let context_type = call
            .get_string("contextType")
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTEXT_TYPE.to_string());

        if self.config.debug {
            debug!(
                "onoma_remember: storing {} ({} chars)",
                context_type,
                content.chars().count()
            );
        }

        if content.chars().count() < MIN_CONTENT_CHARS {
            return Ok(ToolResult::failure(
                &call.id,
                self.name(),
                "Content must be at least 10 characters (use complete sentences, not fragments)",
                "Content too short",
            ));
        }

        if !CONTEXT_TYPES.contains(&context_type.as_str()) {
            return Ok(ToolResult::failure(
                &call.id,
                self.name(),
                format!(
                    "Unsupported contextType \"{}\" (expected one of: {})",
                    context_type,
                    CONTEXT_TYPES.join(", ")
                ),
                "Unsupported context type",
            ));
        }

        match self
            .client
            .create_memory(&content, Some(&context_type), None)
            .await
        {
            Ok(memory) => Ok(ToolResult::text(
                &call.id,
                self.name(),
                format!("Successfully stored: \"{}\"", content),
            )
            .with_details(json!({
                "id": memory.id,
                "content": memory.content,
                "type": memory.context_type,
                "created_at": memory.created_at,
            }))),
            Err(err) => {
                let message = err.message();
                error!("onoma_remember failed: {}", message);
                Ok(ToolResult::failure(
                    &call.id,
                    self.name(),
                    format!("Failed to store memory: {}", message),
                    message,
                ))
            }
        }
    }
}
