//! The uniform response envelope returned by every tool call.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};

use super::error::ToolError;

/// One content item of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EnvelopeContent {
    Text { text: String },
}

/// Response to a tool invocation, for both success and failure.
///
/// Callers tell the two apart only through `isError`, which is omitted on
/// success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolEnvelope {
    pub content: Vec<EnvelopeContent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolEnvelope {
    /// Create a successful envelope with a single text item.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![EnvelopeContent::Text { text: text.into() }],
            is_error: None,
        }
    }

    /// Create an error envelope with a single text item.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![EnvelopeContent::Text { text: text.into() }],
            is_error: Some(true),
        }
    }

    /// Render a tool error.
    ///
    /// Unknown tools are reported verbatim; every other failure is prefixed
    /// with `Error: `.
    pub fn from_error(error: &ToolError) -> Self {
        match error {
            ToolError::UnknownTool(_) => Self::error(error.to_string()),
            _ => Self::error(format!("Error: {}", error)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// All text items joined by newlines.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                EnvelopeContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<ToolEnvelope> for CallToolResult {
    fn from(envelope: ToolEnvelope) -> Self {
        let is_error = envelope.is_error();
        let content = envelope
            .content
            .into_iter()
            .map(|c| match c {
                EnvelopeContent::Text { text } => Content::text(text),
            })
            .collect();

        if is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}
