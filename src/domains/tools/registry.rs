//! Tool Registry - central registration of all tools.
//!
//! The registry is built once at startup and is read-only afterwards. It
//! keeps tools in registration order, which is the order clients see in
//! `tools/list`.
//!
//! When adding a new tool:
//! 1. Create the tool file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `build_registry()`

use std::collections::HashMap;
use std::fmt;

use crate::core::config::Config;

use super::definitions::{FetchDataTool, FileOperationTool, ProcessTextTool};
use super::error::{ToolError, ToolResult};
use super::handlers::{ToolDefinition, ToolHandler};
use super::schema::Schema;

// ============================================================================
// Operation
// ============================================================================

/// A registered tool: metadata plus the handler that runs it.
pub struct Operation {
    name: String,
    description: String,
    schema: Schema,
    handler: Box<dyn ToolHandler>,
}

impl Operation {
    /// Create an operation from its parts.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: Schema,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            handler: Box::new(handler),
        }
    }

    /// Create an operation from a [`ToolDefinition`].
    pub fn from_definition<T: ToolDefinition>(tool: T) -> Self {
        Self::new(T::NAME, T::DESCRIPTION, T::schema(), tool)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn handler(&self) -> &dyn ToolHandler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Ordered, immutable set of tools keyed by exact name.
#[derive(Debug)]
pub struct ToolRegistry {
    operations: Vec<Operation>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// All tools in registration order.
    pub fn list(&self) -> &[Operation] {
        &self.operations
    }

    /// Exact-match lookup by name.
    pub fn lookup(&self, name: &str) -> Option<&Operation> {
        self.index.get(name).map(|&i| &self.operations[i])
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.operations.iter().map(Operation::name).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Collects tools before freezing them into a [`ToolRegistry`].
#[derive(Default)]
pub struct ToolRegistryBuilder {
    operations: Vec<Operation>,
}

impl ToolRegistryBuilder {
    /// Register a tool definition.
    pub fn register<T: ToolDefinition>(self, tool: T) -> Self {
        self.register_operation(Operation::from_definition(tool))
    }

    /// Register a pre-built operation.
    pub fn register_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Freeze the registry. Fails if two tools share a name.
    pub fn build(self) -> ToolResult<ToolRegistry> {
        let mut index = HashMap::with_capacity(self.operations.len());
        for (position, operation) in self.operations.iter().enumerate() {
            if index.insert(operation.name.clone(), position).is_some() {
                return Err(ToolError::DuplicateTool(operation.name.clone()));
            }
        }

        Ok(ToolRegistry {
            operations: self.operations,
            index,
        })
    }
}

/// Build the registry with every tool this server exposes.
///
/// This is the central place where all tools are registered.
pub fn build_registry(config: &Config) -> ToolResult<ToolRegistry> {
    ToolRegistry::builder()
        .register(ProcessTextTool)
        .register(FetchDataTool)
        .register(FileOperationTool::new(config.workspace.root_dir.clone()))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default()
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = build_registry(&test_config()).unwrap();
        assert_eq!(
            registry.tool_names(),
            vec!["processText", "fetchData", "fileOperation"]
        );
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_list_is_stable() {
        let registry = build_registry(&test_config()).unwrap();
        let first: Vec<_> = registry.list().iter().map(|o| o.name().to_string()).collect();
        let second: Vec<_> = registry.list().iter().map(|o| o.name().to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lookup_is_exact() {
        let registry = build_registry(&test_config()).unwrap();
        assert!(registry.lookup("processText").is_some());
        assert!(registry.lookup("processtext").is_none());
        assert!(registry.lookup("process").is_none());
        assert!(registry.lookup(" processText").is_none());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let result = ToolRegistry::builder()
            .register(ProcessTextTool)
            .register(FetchDataTool)
            .register(ProcessTextTool)
            .build();
        assert!(matches!(result, Err(ToolError::DuplicateTool(name)) if name == "processText"));
    }

    #[test]
    fn test_operation_metadata() {
        let registry = build_registry(&test_config()).unwrap();
        let op = registry.lookup("fileOperation").unwrap();
        assert_eq!(op.description(), FileOperationTool::DESCRIPTION);
        assert_eq!(op.schema(), &FileOperationTool::schema());
    }
}
