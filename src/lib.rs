//! Custom MCP Server Library
//!
//! This crate provides a template Model Context Protocol (MCP) tool server.
//! Tools advertise a declared argument schema; every call is validated
//! against it, dispatched to the tool's handler, and answered with a uniform
//! response envelope whether it succeeded or failed.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, path containment, the rmcp
//!   server handler and the transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Schema validation, the tool registry, the dispatcher and
//!     the example tools
//!
//! # Example
//!
//! ```rust,no_run
//! use custom_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = McpServer::new(Config::new())?;
//!     let envelope = server
//!         .dispatcher()
//!         .invoke(
//!             "processText",
//!             Some(serde_json::json!({ "text": "Hello World", "operation": "wordcount" })),
//!         )
//!         .await;
//!     assert_eq!(envelope.text(), "Word count: 2");
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::tools::{ToolDispatcher, ToolEnvelope, ToolError};
