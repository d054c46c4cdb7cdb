//! Single-client session over stdin/stdout.
//!
//! stdout is reserved for protocol frames, so every diagnostic in this
//! crate goes through `tracing` to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// Run one MCP session on the process's standard streams until the client
/// closes stdin.
pub async fn serve_stdio(server: McpServer) -> TransportResult<()> {
    let session = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| TransportError::handshake(e.to_string()))?;
    info!("Client attached on stdio");

    let quit = session
        .waiting()
        .await
        .map_err(|e| TransportError::session(e.to_string()))?;

    info!(reason = ?quit, "stdio session closed");
    Ok(())
}
