//! Onoma Memory Core Library
//!
//! Long-term memory for a host agent runtime, backed by the Onoma memory
//! service. This crate provides configuration resolution, the HTTP client,
//! the recall and capture hooks, the `onoma_search` and `onoma_remember`
//! tools, the `onoma` command group, and the plugin entry points that wire
//! them into a host.

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod hooks;
pub mod plugins;
pub mod provider;
pub mod session;
pub mod tools;

// Re-export commonly used types
pub use client::{ChatMessage, Memory, MemorySearchResult, MemoryStats, OnomaClient, Space};
pub use commands::{MemoryCommand, render};
pub use config::{OnomaConfig, parse_config, parse_config_with_env};
pub use error::{OnomaError, OnomaResult, UnifiedError};
pub use hooks::{CaptureHook, Hook, HookEvent, HookInput, HookOutput, RecallHook};
pub use plugins::{OnomaPlugin, Plugin, PluginApi, PluginError};
pub use provider::OnomaProviderPlugin;
pub use session::build_session_id;
pub use tools::{RememberTool, SearchTool, Tool, ToolCall, ToolResult};
