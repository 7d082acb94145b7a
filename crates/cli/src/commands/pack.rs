//! `ctxforge pack` — Pack prioritized sections into a bounded context.

use ctxforge_config::AppConfig;
use ctxforge_context::{ContextPacker, context_metadata};
use ctxforge_core::Priority;
use serde::Deserialize;

/// The `[[section]]` tables of a pack input file.
#[derive(Debug, Deserialize)]
struct SectionsFile {
    #[serde(default)]
    section: Vec<SectionEntry>,
}

#[derive(Debug, Deserialize)]
struct SectionEntry {
    title: String,
    content: String,
    /// high, medium, or low. Medium when omitted.
    priority: Option<String>,
}

pub fn run(input: &str, max_length: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let budget = max_length.unwrap_or(config.context.max_length);

    let content = std::fs::read_to_string(input)
        .map_err(|e| format!("Failed to read {input}: {e}"))?;
    let sections: SectionsFile = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse {input}: {e}"))?;

    let mut packer = ContextPacker::new(budget)?;
    for entry in &sections.section {
        let priority = match &entry.priority {
            Some(level) => level.parse::<Priority>()?,
            None => Priority::default(),
        };
        packer.add(&entry.title, &entry.content, priority)?;
    }

    let (context, truncated) = packer.pack();
    let stats = packer.stats();
    let metadata = context_metadata(&context);

    println!("{context}");
    println!();
    println!("──────────────────────────────────────");
    println!("  Sections:         {}", stats.fragment_count);
    println!("  Rendered length:  {} chars", stats.total_rendered_length);
    println!("  Budget:           {budget} chars");
    println!("  Packed sections:  {}", metadata.sections.len());
    println!("  Est. tokens:      {}", metadata.estimated_tokens);
    println!(
        "  Truncated:        {}",
        if truncated { "⚠️  yes" } else { "no" }
    );

    Ok(())
}
