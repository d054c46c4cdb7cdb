//! Ways of exposing the tool server to a client.
//!
//! | feature | transport | framing |
//! |---|---|---|
//! | `stdio` (default) | stdin/stdout, one client | rmcp line-delimited JSON-RPC |
//! | `tcp` | one rmcp session per accepted socket | rmcp line-delimited JSON-RPC |
//! | `http` | axum, stateless | one JSON-RPC request per `POST` |
//!
//! All of them answer `tools/list` and `tools/call` through the server's
//! [`ToolDispatcher`](crate::domains::tools::ToolDispatcher), so discovery
//! and error envelopes look the same on every transport.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::serve;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
