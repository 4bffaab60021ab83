//! Base trait and error type for agent tools

use super::types::{ToolCall, ToolResult, ToolSchema};
use crate::error::{OnomaError, UnifiedError};
use async_trait::async_trait;
use std::time::Instant;

/// Error type for tool operations
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Invalid arguments provided to the tool
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Tool execution failed
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UnifiedError for ToolError {
    fn error_code(&self) -> &str {
        match self {
            ToolError::InvalidArguments(_) => "TOOL_INVALID_ARGS",
            ToolError::ExecutionFailed(_) => "TOOL_EXEC_FAILED",
            ToolError::Json(_) => "TOOL_JSON_ERROR",
        }
    }

    fn message(&self) -> &str {
        match self {
            ToolError::InvalidArguments(msg) => msg,
            ToolError::ExecutionFailed(msg) => msg,
            ToolError::Json(_) => "JSON error occurred",
        }
    }
}

impl From<OnomaError> for ToolError {
    fn from(err: OnomaError) -> Self {
        ToolError::ExecutionFailed(err.message().to_string())
    }
}

/// A capability the model can invoke explicitly.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name (e.g. `onoma_search`)
    fn name(&self) -> &str;

    /// Short human-facing label
    fn label(&self) -> &str {
        self.name()
    }

    /// Description for the model
    fn description(&self) -> &str;

    /// JSON schema for input parameters
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError>;

    /// Execute and always produce a result.
    ///
    /// Any `ToolError` becomes a failure result carrying the error message,
    /// and execution time is recorded.
    async fn execute_safe(&self, call: &ToolCall) -> ToolResult {
        let start_time = Instant::now();
        let result = match self.execute(call).await {
            Ok(result) => result,
            Err(err) => ToolResult::failure(
                &call.id,
                self.name(),
                err.to_string(),
                err.message().to_string(),
            ),
        };
        result.with_execution_time(start_time.elapsed().as_millis() as u64)
    }
}
