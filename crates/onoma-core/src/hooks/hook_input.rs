//! Hook input types

use serde::{Deserialize, Serialize};

use super::events::HookEvent;
use crate::client::ChatMessage;

/// Everything the host passes to one hook invocation.
///
/// `session_key` identifies the conversation this invocation belongs to.
/// It travels with the input so concurrent conversations never share it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HookInput {
    pub event: HookEvent,
    #[serde(default)]
    pub session_key: Option<String>,
    /// User prompt (`before_agent_start`)
    #[serde(default)]
    pub prompt: Option<String>,
    /// Conversation so far (`agent_end`)
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Whether the turn completed (`agent_end`)
    #[serde(default)]
    pub success: bool,
}

impl HookInput {
    /// Create a new hook input
    pub fn new(event: HookEvent) -> Self {
        Self {
            event,
            session_key: None,
            prompt: None,
            messages: Vec::new(),
            success: false,
        }
    }

    /// Input for `before_agent_start`
    pub fn before_agent_start(prompt: impl Into<String>) -> Self {
        Self::new(HookEvent::BeforeAgentStart).with_prompt(prompt)
    }

    /// Input for `agent_end`
    pub fn agent_end(messages: Vec<ChatMessage>, success: bool) -> Self {
        Self {
            messages,
            success,
            ..Self::new(HookEvent::AgentEnd)
        }
    }

    /// Set the conversation key
    pub fn with_session_key(mut self, session_key: impl Into<String>) -> Self {
        self.session_key = Some(session_key.into());
        self
    }

    /// Set the prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}
