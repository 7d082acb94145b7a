//! Code analysis tool — wraps the heuristic analyzer.

use async_trait::async_trait;
use ctxforge_analyzer::{Aspect, Language, analyze};
use ctxforge_core::error::ToolError;
use ctxforge_core::tool::{Tool, ToolResult};

pub struct AnalyzeCodeTool;

#[async_trait]
impl Tool for AnalyzeCodeTool {
    fn name(&self) -> &str {
        "analyze_code"
    }

    fn description(&self) -> &str {
        "Analyze code for complexity, patterns, and potential issues."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "Code snippet to analyze"
                },
                "language": {
                    "type": "string",
                    "description": "Programming language of the code",
                    "enum": ["python", "javascript", "typescript", "java", "cpp"]
                },
                "analyze_for": {
                    "type": "array",
                    "description": "Aspects to analyze (performance, readability, security)",
                    "items": { "type": "string" }
                }
            },
            "required": ["code", "language"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let code = arguments["code"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'code' argument".into()))?;
        let language: Language = arguments["language"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'language' argument".into()))?
            .parse()
            .map_err(|e: ctxforge_core::error::AnalysisError| {
                ToolError::InvalidArguments(e.to_string())
            })?;

        let mut aspects = Vec::new();
        if let Some(list) = arguments["analyze_for"].as_array() {
            for value in list {
                let aspect: Aspect = value
                    .as_str()
                    .unwrap_or_default()
                    .parse()
                    .map_err(|e: ctxforge_core::error::AnalysisError| {
                        ToolError::InvalidArguments(e.to_string())
                    })?;
                aspects.push(aspect);
            }
        }

        match analyze(code, language, &aspects) {
            Ok(analysis) => {
                let output = format!(
                    "Complexity: {}\nIssues: {}\nSuggestions: {}",
                    analysis.complexity,
                    if analysis.issues.is_empty() {
                        "none".to_string()
                    } else {
                        analysis.issues.join("; ")
                    },
                    analysis.suggestions.join("; ")
                );
                let data = serde_json::to_value(&analysis)
                    .map_err(|e| ToolError::ExecutionFailed {
                        tool_name: "analyze_code".into(),
                        reason: e.to_string(),
                    })?;
                Ok(ToolResult {
                    call_id: String::new(),
                    success: true,
                    output,
                    data: Some(data),
                })
            }
            Err(e) => Ok(ToolResult {
                call_id: String::new(),
                success: false,
                output: format!("Analysis failed: {e}"),
                data: None,
            }),
        }
    }
}
