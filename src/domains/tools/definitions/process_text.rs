//! Process text tool definition.
//!
//! A pure text transform: uppercase, lowercase, reverse or word count.

use async_trait::async_trait;
use serde::Deserialize;
use std::str::FromStr;
use tracing::{info, instrument};

use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::ToolDefinition;
use crate::domains::tools::schema::Schema;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the process text tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessTextParams {
    /// Text to process.
    pub text: String,

    /// Operation to perform.
    pub operation: String,
}

/// Transforms supported by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOperation {
    Uppercase,
    Lowercase,
    Reverse,
    WordCount,
}

impl TextOperation {
    pub const ALL: [&'static str; 4] = ["uppercase", "lowercase", "reverse", "wordcount"];

    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::Uppercase => text.to_uppercase(),
            Self::Lowercase => text.to_lowercase(),
            Self::Reverse => text.chars().rev().collect(),
            Self::WordCount => format!("Word count: {}", text.split_whitespace().count()),
        }
    }
}

impl FromStr for TextOperation {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uppercase" => Ok(Self::Uppercase),
            "lowercase" => Ok(Self::Lowercase),
            "reverse" => Ok(Self::Reverse),
            "wordcount" => Ok(Self::WordCount),
            other => Err(ToolError::execution_failed(format!(
                "Unknown operation: {}",
                other
            ))),
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Process text tool - applies a text transform.
pub struct ProcessTextTool;

#[async_trait]
impl ToolDefinition for ProcessTextTool {
    const NAME: &'static str = "processText";
    const DESCRIPTION: &'static str = "Process text in a custom way";
    type Params = ProcessTextParams;

    fn schema() -> Schema {
        Schema::object()
            .with_property("text", Schema::string().with_description("Text to process"))
            .with_property(
                "operation",
                Schema::string()
                    .with_description("Operation to perform")
                    .with_enum(TextOperation::ALL),
            )
            .with_required(["text", "operation"])
    }

    #[instrument(skip_all, fields(operation = %params.operation))]
    async fn execute(&self, params: ProcessTextParams) -> ToolResult<String> {
        let operation: TextOperation = params.operation.parse()?;
        info!("Processing {} characters", params.text.chars().count());
        Ok(operation.apply(&params.text))
    }
}

// ============================================================================
// Tests
// ============================================================================
