//! File operation tool definition.
//!
//! Reads, writes and lists files, confined to the workspace root. Every
//! path is resolved and checked for containment before any I/O happens.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::core::security::resolve_within_root;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::ToolDefinition;
use crate::domains::tools::schema::Schema;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the file operation tool.
#[derive(Debug, Clone, Deserialize)]
pub struct FileOperationParams {
    /// File operation to perform.
    pub operation: String,

    /// File or directory path, relative to the workspace root.
    pub path: String,

    /// Content for write operations.
    #[serde(default)]
    pub content: Option<String>,
}

/// Operations supported by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    Read,
    Write,
    List,
}

impl FileOperation {
    pub const ALL: [&'static str; 3] = ["read", "write", "list"];
}

impl FromStr for FileOperation {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Self::Read),
            "write" => Ok(Self::Write),
            "list" => Ok(Self::List),
            other => Err(ToolError::execution_failed(format!(
                "Unknown operation: {}",
                other
            ))),
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// File operation tool - workspace-scoped read, write and list.
pub struct FileOperationTool {
    root: PathBuf,
}

impl FileOperationTool {
    /// Create the tool confined to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ToolDefinition for FileOperationTool {
    const NAME: &'static str = "fileOperation";
    const DESCRIPTION: &'static str = "Perform file operations";
    type Params = FileOperationParams;

    fn schema() -> Schema {
        Schema::object()
            .with_property(
                "operation",
                Schema::string()
                    .with_description("File operation to perform")
                    .with_enum(FileOperation::ALL),
            )
            .with_property(
                "path",
                Schema::string().with_description("File or directory path"),
            )
            .with_property(
                "content",
                Schema::string().with_description("Content for write operations"),
            )
            .with_required(["operation", "path"])
    }

    #[instrument(skip_all, fields(operation = %params.operation, path = %params.path))]
    async fn execute(&self, params: FileOperationParams) -> ToolResult<String> {
        let target = resolve_within_root(&self.root, &params.path).inspect_err(|e| {
            warn!("Path containment check failed: {}", e);
        })?;

        match params.operation.parse::<FileOperation>()? {
            FileOperation::Read => {
                let content = fs::read_to_string(&target).await.map_err(|e| {
                    ToolError::execution_failed(format!("Failed to read {}: {}", params.path, e))
                })?;
                info!("Read {} bytes", content.len());
                Ok(content)
            }
            FileOperation::Write => {
                let content = params
                    .content
                    .filter(|c| !c.is_empty())
                    .ok_or_else(|| {
                        ToolError::execution_failed("Content required for write operation")
                    })?;
                fs::write(&target, &content).await.map_err(|e| {
                    ToolError::execution_failed(format!("Failed to write {}: {}", params.path, e))
                })?;
                info!("Wrote {} bytes", content.len());
                Ok(format!("File written successfully: {}", params.path))
            }
            FileOperation::List => {
                let mut entries = fs::read_dir(&target).await.map_err(|e| {
                    ToolError::execution_failed(format!("Failed to list {}: {}", params.path, e))
                })?;

                let mut names = Vec::new();
                loop {
                    match entries.next_entry().await {
                        Ok(Some(entry)) => {
                            names.push(entry.file_name().to_string_lossy().into_owned())
                        }
                        Ok(None) => break,
                        Err(e) => {
                            return Err(ToolError::execution_failed(format!(
                                "Failed to list {}: {}",
                                params.path, e
                            )));
                        }
                    }
                }
                names.sort();

                info!("Listed {} entries", names.len());
                Ok(names.join("\n"))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn params(operation: &str, path: &str, content: Option<&str>) -> FileOperationParams {
        FileOperationParams {
            operation: operation.to_string(),
            path: path.to_string(),
            content: content.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let tool = FileOperationTool::new(temp_dir.path());
        let content = "first line\nsecond line ✓\n日本語\n";

        let written = tool
            .execute(params("write", "notes.txt", Some(content)))
            .await
            .unwrap();
        assert_eq!(written, "File written successfully: notes.txt");

        let read = tool.execute(params("read", "notes.txt", None)).await.unwrap();
        assert_eq!(read, content);
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let temp_dir = TempDir::new().unwrap();
        std_fs::write(temp_dir.path().join("b.txt"), "b").unwrap();
        std_fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        std_fs::create_dir(temp_dir.path().join("sub")).unwrap();

        let tool = FileOperationTool::new(temp_dir.path());
        let listing = tool.execute(params("list", ".", None)).await.unwrap();
        assert_eq!(listing, "a.txt\nb.txt\nsub");
    }

    #[tokio::test]
    async fn test_write_requires_content() {
        let temp_dir = TempDir::new().unwrap();
        let tool = FileOperationTool::new(temp_dir.path());

        for content in [None, Some("")] {
            let err = tool
                .execute(params("write", "empty.txt", content))
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Content required for write operation");
        }
        assert!(!temp_dir.path().join("empty.txt").exists());
    }

    #[tokio::test]
    async fn test_escape_is_rejected_before_io() {
        let parent = TempDir::new().unwrap();
        let root = parent.path().join("workspace");
        std_fs::create_dir(&root).unwrap();
        std_fs::write(parent.path().join("secret.txt"), "secret").unwrap();

        let tool = FileOperationTool::new(&root);

        let err = tool
            .execute(params("read", "../secret.txt", None))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::PathSecurity(_)));

        let err = tool
            .execute(params("write", "../planted.txt", Some("x")))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::PathSecurity(_)));
        assert!(!parent.path().join("planted.txt").exists());

        let err = tool.execute(params("list", "..", None)).await.unwrap_err();
        assert!(matches!(err, ToolError::PathSecurity(_)));
    }

    #[tokio::test]
    async fn test_read_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let tool = FileOperationTool::new(temp_dir.path());

        let err = tool
            .execute(params("read", "missing.txt", None))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to read missing.txt"));
    }

    #[tokio::test]
    async fn test_unknown_operation_is_handler_failure() {
        let temp_dir = TempDir::new().unwrap();
        let tool = FileOperationTool::new(temp_dir.path());

        let err = tool.execute(params("delete", "a.txt", None)).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown operation: delete");
    }
}
