//! File read tool — read file contents from disk.

use async_trait::async_trait;
use ctxforge_core::error::ToolError;
use ctxforge_core::tool::{Tool, ToolResult};

pub struct FileReadTool {
    /// Maximum bytes returned; longer files are cut with a marker.
    max_bytes: usize,
}

impl FileReadTool {
    /// Create a file read tool with the default 64 KiB cap.
    pub fn new() -> Self {
        Self { max_bytes: 64 * 1024 }
    }

    /// Create a file read tool with a custom size cap.
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Default for FileReadTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FileReadTool {
    fn name(&self) -> &str {
        "file_read"
    }

    fn description(&self) -> &str {
        "Read the contents of a file at the given path."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The file path to read"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let path = arguments["path"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'path' argument".into()))?;

        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let truncated = content.len() > self.max_bytes;
                let output = if truncated {
                    let mut cut: String = content.chars().take(self.max_bytes).collect();
                    cut.push_str("\n[... file truncated ...]");
                    cut
                } else {
                    content
                };
                Ok(ToolResult {
                    call_id: String::new(),
                    success: true,
                    output,
                    data: Some(serde_json::json!({"path": path, "truncated": truncated})),
                })
            }
            Err(e) => Ok(ToolResult {
                call_id: String::new(),
                success: false,
                output: format!("Failed to read {path}: {e}"),
                data: None,
            }),
        }
    }
}
