//! Hook event types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle points of the host agent that this plugin listens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEvent {
    /// Before the agent starts working on a prompt
    BeforeAgentStart,
    /// After the agent finished a turn
    AgentEnd,
}

impl HookEvent {
    /// Name the host uses when dispatching
    pub fn as_str(&self) -> &'static str {
        match self {
            HookEvent::BeforeAgentStart => "before_agent_start",
            HookEvent::AgentEnd => "agent_end",
        }
    }

    /// Get a human-readable description of this event
    pub fn description(&self) -> &'static str {
        match self {
            HookEvent::BeforeAgentStart => "Before the agent starts a turn",
            HookEvent::AgentEnd => "After the agent finished a turn",
        }
    }

    /// Returns all possible hook events
    pub fn all() -> &'static [HookEvent] {
        &[HookEvent::BeforeAgentStart, HookEvent::AgentEnd]
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
