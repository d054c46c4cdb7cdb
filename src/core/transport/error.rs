//! Failures that stop a transport.
//!
//! Every variant ends the serving loop; `main` logs it and exits non-zero.

use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The listener socket could not be opened.
    #[error("Cannot listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The client and server never completed the MCP initialize exchange.
    #[error("MCP handshake failed: {0}")]
    Handshake(String),

    /// An established MCP session terminated abnormally.
    #[error("MCP session aborted: {0}")]
    Session(String),

    /// The axum server stopped with an error.
    #[error("HTTP server stopped: {0}")]
    Http(String),
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn handshake(msg: impl Into<String>) -> Self {
        Self::Handshake(msg.into())
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }
}
