//! Tool handler traits.
//!
//! Tools implement [`ToolDefinition`], which carries the tool's metadata and
//! a strongly typed `execute()`. The registry stores them behind the
//! object-safe [`ToolHandler`] trait, whose blanket implementation turns the
//! already-validated JSON arguments into the tool's parameter struct.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ToolError, ToolResult};
use super::schema::Schema;

/// Trait for tool definitions.
///
/// Each tool must implement this trait to provide its metadata, schema and
/// logic.
#[async_trait]
pub trait ToolDefinition: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Typed arguments, deserialized after schema validation.
    type Params: DeserializeOwned + Send + 'static;

    /// The schema advertised to clients and enforced before `execute()`.
    fn schema() -> Schema;

    /// Run the tool, returning the text of a successful result.
    async fn execute(&self, params: Self::Params) -> ToolResult<String>;
}

/// Object-safe handler stored by the registry.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with arguments that already passed schema validation.
    async fn call(&self, arguments: Value) -> ToolResult<String>;
}

#[async_trait]
impl<T: ToolDefinition> ToolHandler for T {
    async fn call(&self, arguments: Value) -> ToolResult<String> {
        let params: T::Params = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        self.execute(params).await
    }
}
