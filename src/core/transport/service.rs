//! Entry point that hands the server to whichever transport is configured.

use tracing::info;

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

/// Serve `server` over the transport selected by `config`.
///
/// Returns once the transport closes. Any error here is fatal for the
/// process; individual tool failures never surface at this level.
pub async fn serve(server: McpServer, config: TransportConfig) -> TransportResult<()> {
    info!(transport = %config.description(), "Serving tools");

    match config {
        #[cfg(feature = "stdio")]
        TransportConfig::Stdio => super::stdio::serve_stdio(server).await,
        #[cfg(feature = "tcp")]
        TransportConfig::Tcp(cfg) => super::tcp::TcpTransport::new(cfg).run(server).await,
        #[cfg(feature = "http")]
        TransportConfig::Http(cfg) => super::http::HttpTransport::new(cfg).run(server).await,
    }
}
