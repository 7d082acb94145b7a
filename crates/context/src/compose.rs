//! Helpers for combining and inspecting already-rendered context text.

use crate::fragment::HIGH_PRIORITY_MARKER;
use crate::token::estimate_tokens;
use serde::{Deserialize, Serialize};

/// A titled block with a free-form numeric priority, for merging
/// contexts produced outside a packer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeEntry {
    pub title: String,
    pub content: String,
    /// Higher merges earlier. Unlike the packer this is an open scale.
    pub priority: i64,
}

impl MergeEntry {
    pub fn new(title: impl Into<String>, content: impl Into<String>, priority: i64) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            priority,
        }
    }
}

/// Merge titled blocks by descending priority (stable for ties) into
/// one `## `-sectioned text. No budget is applied.
pub fn merge_contexts(entries: &[MergeEntry]) -> String {
    let mut ordered: Vec<&MergeEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| std::cmp::Reverse(e.priority));
    ordered
        .iter()
        .map(|e| format!("## {}\n\n{}", e.title, e.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Insert a horizontal separator line before each `##` section after
/// the first, for terminal readability.
pub fn format_context(context: &str) -> String {
    let sections: Vec<&str> = context.split("##").collect();
    let mut formatted = String::from(sections[0]);
    for section in &sections[1..] {
        formatted.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        formatted.push_str("##");
        formatted.push_str(section);
    }
    formatted
}

/// Summary facts extracted from rendered context text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMetadata {
    /// Section titles, in order of appearance.
    pub sections: Vec<String>,
    /// Whitespace-separated word count.
    pub word_count: usize,
    /// Rough token estimate (chars / 4).
    pub estimated_tokens: usize,
}

/// Extract section names, word count, and a token estimate from
/// rendered context text.
pub fn context_metadata(context: &str) -> ContextMetadata {
    let sections = context
        .lines()
        .filter_map(|line| line.trim_start_matches(HIGH_PRIORITY_MARKER).strip_prefix("## "))
        .map(|title| title.trim().to_string())
        .collect();

    ContextMetadata {
        sections,
        word_count: context.split_whitespace().count(),
        estimated_tokens: estimate_tokens(context),
    }
}
