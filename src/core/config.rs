//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Workspace that file operations are confined to.
    pub workspace: WorkspaceConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,

    /// Short description, used as the instructions sent on initialize.
    pub description: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Workspace configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Root directory for the file operation tool. Paths that resolve outside
    /// this directory are rejected.
    pub root_dir: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "custom-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "A custom MCP server exposing example text, data and file tools."
                    .to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            workspace: WorkspaceConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`. The workspace root
    /// is read from `MCP_WORKSPACE_DIR`, then `WORKSPACE_DIR`, then defaults
    /// to the current directory.
    ///
    /// Logging is not initialised yet when this runs, so nothing is logged here.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(root) = ["MCP_WORKSPACE_DIR", "WORKSPACE_DIR"]
            .iter()
            .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        {
            config.workspace.root_dir = PathBuf::from(root);
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_workspace_vars() {
        unsafe {
            std::env::remove_var("MCP_WORKSPACE_DIR");
            std::env::remove_var("WORKSPACE_DIR");
        }
    }

    #[test]
    fn test_workspace_from_mcp_var() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_workspace_vars();
        unsafe {
            std::env::set_var("MCP_WORKSPACE_DIR", "/srv/primary");
            std::env::set_var("WORKSPACE_DIR", "/srv/fallback");
        }
        let config = Config::from_env();
        assert_eq!(config.workspace.root_dir, PathBuf::from("/srv/primary"));
        clear_workspace_vars();
    }

    #[test]
    fn test_workspace_fallback_var() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_workspace_vars();
        unsafe {
            std::env::set_var("WORKSPACE_DIR", "/srv/fallback");
        }
        let config = Config::from_env();
        assert_eq!(config.workspace.root_dir, PathBuf::from("/srv/fallback"));
        clear_workspace_vars();
    }

    #[test]
    fn test_workspace_defaults_to_current_dir() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_workspace_vars();
        let config = Config::from_env();
        assert_eq!(
            config.workspace.root_dir,
            std::env::current_dir().unwrap()
        );
    }

    #[test]
    fn test_server_name_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "my-tools");
        }
        let config = Config::from_env();
        assert_eq!(config.server.name, "my-tools");
        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
        }
    }

    #[test]
    fn test_default_identity() {
        let config = Config::default();
        assert_eq!(config.server.name, "custom-mcp-server");
        assert_eq!(config.server.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.logging.level, "info");
    }
}
