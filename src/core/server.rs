//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool dispatcher.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered in `domains/tools/registry.rs`. Every transport reaches
//! them through the same `ToolDispatcher`, so the validation and
//! error-envelope rules are identical over stdio, TCP and HTTP.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::{Error, Result};
use crate::domains::tools::{ToolDescriptor, ToolDispatcher, build_registry};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. It is cheap to
/// clone; every clone shares the same immutable registry.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Dispatcher for tool discovery and invocation.
    dispatcher: ToolDispatcher,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails if the workspace root is not a directory or if two tools are
    /// registered under the same name.
    pub fn new(config: Config) -> Result<Self> {
        let root = &config.workspace.root_dir;
        if !root.is_dir() {
            return Err(Error::config(format!(
                "workspace root '{}' is not a directory",
                root.display()
            )));
        }

        let dispatcher = ToolDispatcher::new(build_registry(&config)?);

        Ok(Self {
            config: Arc::new(config),
            dispatcher,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the instructions sent to clients on initialize.
    pub fn instructions(&self) -> &str {
        &self.config.server.description
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool dispatcher.
    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    /// All tools as rmcp `Tool` models, in registration order.
    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher
            .discover()
            .tools
            .into_iter()
            .map(to_tool)
            .collect()
    }
}

/// Convert a tool descriptor into the rmcp model.
fn to_tool(descriptor: ToolDescriptor) -> Tool {
    Tool {
        name: descriptor.name.into(),
        description: Some(descriptor.description.into()),
        input_schema: Arc::new(descriptor.input_schema.to_json_object()),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo {
            instructions: Some(self.instructions().to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        };
        info.server_info.name = self.name().to_string();
        info.server_info.version = self.version().to_string();
        info
    }

    #[instrument(skip_all)]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool");
        let arguments = request.arguments.map(serde_json::Value::Object);
        let envelope = self.dispatcher.invoke(&request.name, arguments).await;
        Ok(envelope.into())
    }
}
