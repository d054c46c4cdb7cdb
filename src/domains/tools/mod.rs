//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to perform
//! specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Declared argument schemas and the validator
//! - `registry.rs` - Ordered, immutable tool registry
//! - `dispatcher.rs` - Discovery and invocation, the error-to-envelope boundary
//! - `envelope.rs` - The response shape shared by success and failure
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define a params struct and implement `ToolDefinition`
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs`
//!
//! Transports never need to change: they all go through `ToolDispatcher`.

pub mod definitions;
mod dispatcher;
mod envelope;
mod error;
mod handlers;
mod registry;
pub mod schema;

pub use dispatcher::{DiscoveryResponse, ToolDescriptor, ToolDispatcher, in_handler_scope};
pub use envelope::{EnvelopeContent, ToolEnvelope};
pub use error::{ToolError, ToolResult};
pub use handlers::{ToolDefinition, ToolHandler};
pub use registry::{Operation, ToolRegistry, ToolRegistryBuilder, build_registry};
pub use schema::{Schema, SchemaType, validate_arguments};
