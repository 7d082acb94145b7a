//! Built-in tool implementations for ctxforge.
//!
//! Three tools cover the template workflow: read a file, run the
//! heuristic code analyzer, and generate a documentation skeleton.
//! `definitions_for_context` renders the registry into a text block
//! ready to be packed as a context fragment.

pub mod analyze_code;
pub mod file_read;
pub mod generate_docs;

use ctxforge_core::tool::ToolRegistry;

pub use analyze_code::AnalyzeCodeTool;
pub use file_read::FileReadTool;
pub use generate_docs::GenerateDocsTool;

/// Create a registry with all built-in tools.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(FileReadTool::new()));
    registry.register(Box::new(AnalyzeCodeTool));
    registry.register(Box::new(GenerateDocsTool));
    registry
}

/// Render every registered tool's definition as a context block:
/// a `# Available Tools` heading, one `## ` section per tool, and a
/// parameter bullet list derived from each tool's JSON schema.
pub fn definitions_for_context(registry: &ToolRegistry) -> String {
    let mut out = String::from("# Available Tools\n\n");

    for def in registry.definitions() {
        out.push_str(&format!("## {}\n", def.name));
        out.push_str(&format!("{}\n\n", def.description));
        out.push_str("### Parameters:\n");

        let required: Vec<&str> = def.parameters["required"]
            .as_array()
            .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();

        if let Some(props) = def.parameters["properties"].as_object() {
            for (name, schema) in props {
                let marker = if required.contains(&name.as_str()) {
                    "(required)"
                } else {
                    "(optional)"
                };
                let description = schema["description"].as_str().unwrap_or("");
                out.push_str(&format!("- **{name}** {marker}: {description}\n"));
                if let Some(options) = schema["enum"].as_array() {
                    let values: Vec<&str> =
                        options.iter().filter_map(|v| v.as_str()).collect();
                    out.push_str(&format!("  Options: {}\n", values.join(", ")));
                }
            }
        }

        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_all_builtins() {
        let registry = default_registry();
        assert_eq!(
            registry.names(),
            vec!["analyze_code", "file_read", "generate_docs"]
        );
    }

    #[test]
    fn definitions_render_with_parameters() {
        let registry = default_registry();
        let rendered = definitions_for_context(&registry);

        assert!(rendered.starts_with("# Available Tools"));
        assert!(rendered.contains("## analyze_code"));
        assert!(rendered.contains("## file_read"));
        assert!(rendered.contains("## generate_docs"));
        assert!(rendered.contains("- **code** (required):"));
        assert!(rendered.contains("- **path** (required):"));
        assert!(rendered.contains("(optional)"));
    }

    #[test]
    fn enum_parameters_list_their_options() {
        let registry = default_registry();
        let rendered = definitions_for_context(&registry);
        assert!(rendered.contains("Options: "));
        assert!(rendered.contains("python"));
    }
}
