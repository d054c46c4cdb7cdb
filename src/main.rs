//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, and runs the configured
//! transport. This is the process-level fatal boundary: tool failures never
//! reach it, but startup errors, transport failures and panics outside a
//! tool handler are logged to stderr and end the process with a non-zero
//! status.

use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use custom_mcp_server::core::{Config, McpServer, transport};
use custom_mcp_server::domains::tools::in_handler_scope;

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);
    install_panic_hook();

    match run(config).await {
        Ok(()) => {
            info!("Server shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<()> {
    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Workspace root: {}", config.workspace.root_dir.display());

    let server = McpServer::new(config.clone()).context("Failed to initialize server")?;
    info!(
        "{} v{} started with tools: {}",
        server.name(),
        server.version(),
        server.dispatcher().registry().tool_names().join(", ")
    );

    transport::serve(server, config.transport)
        .await
        .context("Transport failed")?;

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs always go to stderr; stdout belongs to the protocol.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Route panic reports through tracing.
///
/// A panic inside a tool handler is caught by the dispatcher and answered
/// with an error envelope. Any other panic is a defect: rmcp runs requests on
/// detached tasks, so unwinding would only drop that request. Exit instead.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        if in_handler_scope() {
            error!("Tool handler panicked: {}", info);
            return;
        }
        error!("Fatal panic: {}", info);
        std::process::exit(1);
    }));
}
