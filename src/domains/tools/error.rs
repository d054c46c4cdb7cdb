//! Tool-specific error types.

use thiserror::Error;

use crate::core::security::PathSecurityError;

/// A specialized Result type for tool operations.
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Errors that can occur while registering, validating or running tools.
///
/// Every variant except [`ToolError::DuplicateTool`] is recoverable: the
/// dispatcher turns it into an error envelope and the process keeps serving.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Two tools were registered under the same name.
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// The arguments did not satisfy the tool's schema.
    #[error("{0}")]
    InvalidArguments(String),

    /// The tool handler failed.
    #[error("{0}")]
    ExecutionFailed(String),

    /// A path argument resolved outside the workspace root.
    #[error(transparent)]
    PathSecurity(#[from] PathSecurityError),

    /// Serializing a tool result failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Short label used as a tracing field when a call fails.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::DuplicateTool(_) => "configuration",
            Self::InvalidArguments(_) => "invalid_arguments",
            Self::ExecutionFailed(_) | Self::PathSecurity(_) | Self::Json(_) => "handler_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_message() {
        let err = ToolError::unknown_tool("nope");
        assert_eq!(err.to_string(), "Unknown tool: nope");
        assert_eq!(err.outcome(), "unknown_tool");
    }

    #[test]
    fn test_messages_are_not_wrapped() {
        assert_eq!(
            ToolError::invalid_arguments("Missing required property: path").to_string(),
            "Missing required property: path"
        );
        assert_eq!(
            ToolError::execution_failed("boom").to_string(),
            "boom"
        );
    }
}
