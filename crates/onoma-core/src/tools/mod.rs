//! Tools the model can call explicitly

pub mod base;
pub mod remember;
pub mod search;
pub mod types;

pub use base::{Tool, ToolError};
pub use remember::{CONTEXT_TYPES, RememberTool};
pub use search::SearchTool;
pub use types::{ToolCall, ToolContent, ToolParameter, ToolResult, ToolSchema};
