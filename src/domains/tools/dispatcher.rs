//! Tool dispatcher - discovery and invocation.
//!
//! The dispatcher is the single boundary where tool failures become data.
//! `invoke()` never returns an error: unknown tools, invalid arguments,
//! handler failures and handler panics all come back as error envelopes.
//!
//! A panic anywhere else is a defect. [`in_handler_scope`] lets the process
//! panic hook tell the two apart.

use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::envelope::ToolEnvelope;
use super::error::{ToolError, ToolResult};
use super::registry::ToolRegistry;
use super::schema::Schema;

tokio::task_local! {
    static HANDLER_SCOPE: ();
}

/// True while a tool handler is being polled inside the dispatcher, where a
/// panic is caught and reported as an error envelope.
pub fn in_handler_scope() -> bool {
    HANDLER_SCOPE.try_with(|_| ()).is_ok()
}

/// Public metadata for one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Schema,
}

/// Response to a discovery request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryResponse {
    pub tools: Vec<ToolDescriptor>,
}

/// Routes tool calls to registered handlers.
///
/// Cheap to clone; the registry is shared and never mutated.
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
}

impl ToolDispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// List every tool in registration order.
    pub fn discover(&self) -> DiscoveryResponse {
        let tools = self
            .registry
            .list()
            .iter()
            .map(|op| ToolDescriptor {
                name: op.name().to_string(),
                description: op.description().to_string(),
                input_schema: op.schema().clone(),
            })
            .collect();

        DiscoveryResponse { tools }
    }

    /// Invoke a tool by name.
    #[instrument(skip_all, fields(tool = %name))]
    pub async fn invoke(&self, name: &str, arguments: Option<Value>) -> ToolEnvelope {
        match self.try_invoke(name, arguments).await {
            Ok(text) => {
                info!("Tool call succeeded");
                ToolEnvelope::success(text)
            }
            Err(e) => {
                warn!(outcome = e.outcome(), "Tool call failed: {}", e);
                ToolEnvelope::from_error(&e)
            }
        }
    }

    async fn try_invoke(&self, name: &str, arguments: Option<Value>) -> ToolResult<String> {
        let operation = self
            .registry
            .lookup(name)
            .ok_or_else(|| ToolError::unknown_tool(name))?;

        operation.schema().validate(arguments.as_ref())?;
        debug!("Arguments validated");

        let arguments = arguments.unwrap_or_default();
        HANDLER_SCOPE
            .scope((), AssertUnwindSafe(operation.handler().call(arguments)).catch_unwind())
            .await
            .unwrap_or_else(|panic| Err(ToolError::execution_failed(panic_message(panic.as_ref()))))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "tool handler panicked".to_string()
    }
}
