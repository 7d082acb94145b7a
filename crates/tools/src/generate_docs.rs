//! Documentation generator tool — renders a markdown skeleton from
//! code or prose input.

use async_trait::async_trait;
use ctxforge_core::error::ToolError;
use ctxforge_core::tool::{Tool, ToolResult};

pub struct GenerateDocsTool;

#[async_trait]
impl Tool for GenerateDocsTool {
    fn name(&self) -> &str {
        "generate_docs"
    }

    fn description(&self) -> &str {
        "Generate markdown documentation from code or descriptions."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "input": {
                    "type": "string",
                    "description": "Code or text to document"
                },
                "format": {
                    "type": "string",
                    "description": "Output documentation format",
                    "enum": ["markdown"]
                },
                "include_examples": {
                    "type": "boolean",
                    "description": "Whether to include a usage example section"
                }
            },
            "required": ["input", "format"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let input = arguments["input"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'input' argument".into()))?;
        let format = arguments["format"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'format' argument".into()))?;
        if format != "markdown" {
            return Err(ToolError::InvalidArguments(format!(
                "Unsupported format: {format}"
            )));
        }
        let include_examples = arguments["include_examples"].as_bool().unwrap_or(false);

        let mut documentation = String::from("# Generated Documentation\n\n");
        documentation.push_str("## Overview\n\n");
        let summary: String = input.lines().take(3).collect::<Vec<_>>().join(" ");
        documentation.push_str(&format!("{summary}\n\n"));
        documentation.push_str("## Source\n\n```\n");
        documentation.push_str(input);
        documentation.push_str("\n```\n");
        if include_examples {
            documentation.push_str("\n## Usage Example\n\n_TBD: add a worked example._\n");
        }

        let word_count = documentation.split_whitespace().count();

        Ok(ToolResult {
            call_id: String::new(),
            success: true,
            output: documentation.clone(),
            data: Some(serde_json::json!({
                "format": format,
                "word_count": word_count,
            })),
        })
    }
}
