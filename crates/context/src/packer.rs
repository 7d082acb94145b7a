//! The context packer — deterministic greedy packing of prioritized
//! fragments into a bounded-size text.

use crate::fragment::{Example, Fragment};
use ctxforge_core::error::ContextError;
use ctxforge_core::priority::Priority;
use ctxforge_core::tool::ToolDefinition;
use serde::{Deserialize, Serialize};

/// Default character budget, matching the reference default.
pub const DEFAULT_MAX_LENGTH: usize = 10_000;

/// Separator appended after each packed fragment.
const SEPARATOR: &str = "\n\n";

/// Size statistics for the current fragment set.
///
/// `total_rendered_length` sums each fragment's rendered length on its
/// own. It deliberately does **not** include the blank-line separators
/// `pack()` inserts between fragments, so a set can read `within_limit`
/// here and still truncate when packed. Callers needing the exact
/// packed size should measure `pack()`'s output instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackerStats {
    /// Number of fragments currently held.
    pub fragment_count: usize,
    /// Sum of per-fragment rendered lengths, in characters.
    pub total_rendered_length: usize,
    /// Whether `total_rendered_length` fits the configured budget.
    pub within_limit: bool,
}

/// Packs labeled, prioritized fragments into one bounded text.
///
/// Fragments are keyed by title (adding an existing title replaces it,
/// keeping its original insertion position) and packed in descending
/// priority weight, insertion order breaking ties. `pack()` is a pure
/// read: repeated calls with unchanged state return identical output.
///
/// Not internally synchronized — wrap in a mutex if shared across
/// threads.
#[derive(Debug, Clone)]
pub struct ContextPacker {
    /// Insertion-ordered fragment storage. Linear title lookup; the
    /// fragment counts this works with stay far below where an index
    /// map would matter.
    fragments: Vec<Fragment>,
    /// Character budget for packed output.
    max_length: usize,
}

impl ContextPacker {
    /// Create a packer with the given character budget.
    ///
    /// # Errors
    ///
    /// `ContextError::InvalidMaxLength` if `max_length` is zero.
    pub fn new(max_length: usize) -> Result<Self, ContextError> {
        if max_length == 0 {
            return Err(ContextError::InvalidMaxLength);
        }
        Ok(Self {
            fragments: Vec::new(),
            max_length,
        })
    }

    /// Create a packer with the default budget of 10 000 characters.
    pub fn with_default_length() -> Self {
        Self {
            fragments: Vec::new(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// The configured character budget.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Number of fragments currently held.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the packer holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Look up a fragment by title.
    pub fn get(&self, title: &str) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.title == title)
    }

    /// Add a fragment, replacing any existing fragment with the same
    /// title (last write wins; the original insertion position is
    /// kept). Returns `&mut Self` so calls chain through `?`.
    ///
    /// # Errors
    ///
    /// `ContextError::EmptyTitle` if `title` is empty.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        priority: Priority,
    ) -> Result<&mut Self, ContextError> {
        let fragment = Fragment::new(title, content, priority);
        if fragment.title.is_empty() {
            return Err(ContextError::EmptyTitle);
        }
        match self.fragments.iter_mut().find(|f| f.title == fragment.title) {
            Some(existing) => *existing = fragment,
            None => self.fragments.push(fragment),
        }
        Ok(self)
    }

    /// Add a medium-priority "Examples" fragment listing numbered
    /// input/output pairs.
    pub fn add_examples(&mut self, examples: &[Example]) -> Result<&mut Self, ContextError> {
        let mut content = String::from("### Examples\n\n");
        for (i, ex) in examples.iter().enumerate() {
            content.push_str(&format!("**Example {}:**\n", i + 1));
            content.push_str(&format!("Input: {}\n", ex.input));
            content.push_str(&format!("Output: {}\n\n", ex.output));
        }
        self.add("Examples", content, Priority::Medium)
    }

    /// Add a high-priority "Tools" fragment listing tool names and
    /// descriptions.
    pub fn add_tools(&mut self, tools: &[ToolDefinition]) -> Result<&mut Self, ContextError> {
        let mut content = String::from("### Available Tools\n\n");
        for tool in tools {
            content.push_str(&format!("- **{}**: {}\n", tool.name, tool.description));
        }
        self.add("Tools", content, Priority::High)
    }

    /// Pack all fragments into one text, returning the packed context
    /// and whether any fragment was dropped.
    ///
    /// Fragments are taken in descending priority weight (insertion
    /// order breaking ties) and appended greedily: a fragment is
    /// included only while the packed length plus its rendered length
    /// stays within the budget. The loop stops at the first fragment
    /// that does not fit — it does not skip ahead to a smaller one.
    /// The separator following each fragment is not counted against
    /// the candidate's fit check, matching the reference behavior.
    pub fn pack(&self) -> (String, bool) {
        let mut ordered: Vec<&Fragment> = self.fragments.iter().collect();
        // Stable sort: equal weights keep insertion order.
        ordered.sort_by_key(|f| std::cmp::Reverse(f.priority.weight()));

        let mut packed = String::new();
        let mut packed_chars = 0usize;
        let mut truncated = false;

        for fragment in ordered {
            let rendered = fragment.render();
            let rendered_chars = rendered.chars().count();
            if packed_chars + rendered_chars <= self.max_length {
                packed.push_str(&rendered);
                packed.push_str(SEPARATOR);
                packed_chars += rendered_chars + SEPARATOR.len();
            } else {
                tracing::debug!(
                    title = %fragment.title,
                    rendered_chars,
                    packed_chars,
                    max_length = self.max_length,
                    "fragment does not fit, truncating"
                );
                truncated = true;
                break;
            }
        }

        (packed.trim_end().to_string(), truncated)
    }

    /// Size statistics for the current fragment set. See [`PackerStats`]
    /// for how its accounting differs from `pack()`'s.
    pub fn stats(&self) -> PackerStats {
        let total_rendered_length: usize = self.fragments.iter().map(|f| f.rendered_len()).sum();
        PackerStats {
            fragment_count: self.fragments.len(),
            total_rendered_length,
            within_limit: total_rendered_length <= self.max_length,
        }
    }

    /// Remove all fragments, keeping the configured budget.
    pub fn clear(&mut self) -> &mut Self {
        self.fragments.clear();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packer(max_length: usize) -> ContextPacker {
        ContextPacker::new(max_length).unwrap()
    }

    #[test]
    fn zero_max_length_rejected() {
        assert_eq!(
            ContextPacker::new(0).unwrap_err(),
            ContextError::InvalidMaxLength
        );
    }

    #[test]
    fn empty_title_rejected() {
        let mut p = packer(100);
        assert_eq!(
            p.add("", "content", Priority::Medium).unwrap_err(),
            ContextError::EmptyTitle
        );
    }

    #[test]
    fn empty_packer_packs_empty() {
        let p = packer(100);
        assert_eq!(p.pack(), (String::new(), false));
    }

    #[test]
    fn single_fragment_packs_verbatim() {
        let mut p = packer(1000);
        p.add("Goal", "Ship v1", Priority::Medium).unwrap();
        let (context, truncated) = p.pack();
        assert_eq!(context, "## Goal\n\nShip v1");
        assert!(!truncated);
    }

    #[test]
    fn chaining_through_question_mark() -> Result<(), ContextError> {
        let mut p = packer(1000);
        p.add("A", "a", Priority::High)?
            .add("B", "b", Priority::Low)?;
        assert_eq!(p.len(), 2);
        Ok(())
    }

    #[test]
    fn high_priority_packs_before_low() {
        let mut p = packer(1000);
        p.add("Notes", "Misc", Priority::Low).unwrap();
        p.add("Goal", "Ship v1", Priority::High).unwrap();
        let (context, truncated) = p.pack();
        assert!(!truncated);
        let goal = context.find("Goal").unwrap();
        let notes = context.find("Notes").unwrap();
        assert!(goal < notes);
    }

    #[test]
    fn mixed_priorities_never_invert_weight_order() {
        let mut p = packer(10_000);
        p.add("L", "low", Priority::Low).unwrap();
        p.add("M", "medium", Priority::Medium).unwrap();
        p.add("H", "high", Priority::High).unwrap();
        let (context, _) = p.pack();
        let h = context.find("## H").unwrap();
        let m = context.find("## M").unwrap();
        let l = context.find("## L").unwrap();
        assert!(h < m && m < l);
    }

    #[test]
    fn equal_priority_keeps_insertion_order() {
        let mut p = packer(10_000);
        p.add("First", "1", Priority::Medium).unwrap();
        p.add("Second", "2", Priority::Medium).unwrap();
        p.add("Third", "3", Priority::Medium).unwrap();
        let (context, _) = p.pack();
        let a = context.find("First").unwrap();
        let b = context.find("Second").unwrap();
        let c = context.find("Third").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn overwrite_is_last_write_wins() {
        let mut p = packer(1000);
        p.add("X", "a", Priority::High).unwrap();
        p.add("X", "b", Priority::Low).unwrap();
        assert_eq!(p.len(), 1);
        let frag = p.get("X").unwrap();
        assert_eq!(frag.content, "b");
        assert_eq!(frag.priority, Priority::Low);
    }

    #[test]
    fn overwrite_keeps_insertion_position() {
        let mut p = packer(10_000);
        p.add("A", "1", Priority::Medium).unwrap();
        p.add("B", "2", Priority::Medium).unwrap();
        p.add("A", "updated", Priority::Medium).unwrap();
        let (context, _) = p.pack();
        assert!(context.find("A").unwrap() < context.find("B").unwrap());
        assert!(context.contains("updated"));
    }

    #[test]
    fn pack_is_idempotent() {
        let mut p = packer(50);
        p.add("Goal", "Ship v1", Priority::High).unwrap();
        p.add("Notes", "A long note that will not fit in the budget", Priority::Low)
            .unwrap();
        let first = p.pack();
        let second = p.pack();
        assert_eq!(first, second);
    }

    #[test]
    fn pack_does_not_mutate_state() {
        let mut p = packer(10);
        p.add("Big", "This fragment cannot fit", Priority::Medium)
            .unwrap();
        let _ = p.pack();
        assert_eq!(p.len(), 1);
        assert_eq!(p.max_length(), 10);
    }

    #[test]
    fn first_fragment_too_large_yields_empty_truncated() {
        let mut p = packer(5);
        p.add("Goal", "Ship v1", Priority::High).unwrap();
        assert_eq!(p.pack(), (String::new(), true));
    }

    #[test]
    fn budget_below_shortest_fragment_yields_empty_truncated() {
        let mut p = packer(1);
        p.add("T", "c", Priority::Low).unwrap();
        assert_eq!(p.pack(), (String::new(), true));
    }

    #[test]
    fn stops_at_first_misfit_without_skipping_ahead() {
        // Two 600-char fragments against a 1000 budget: only the first
        // (by tie-break order) is included. A tiny third fragment
        // behind the misfit must NOT be packed either.
        let big = "x".repeat(600 - "## A\n\n".chars().count());
        let mut p = packer(1000);
        p.add("A", big.clone(), Priority::Medium).unwrap();
        p.add("B", big, Priority::Medium).unwrap();
        p.add("C", "tiny", Priority::Low).unwrap();
        assert_eq!(p.get("A").unwrap().rendered_len(), 600);

        let (context, truncated) = p.pack();
        assert!(truncated);
        assert!(context.contains("## A"));
        assert!(!context.contains("## B"));
        assert!(!context.contains("## C"));
    }

    #[test]
    fn everything_fits_when_total_within_budget() {
        let mut p = packer(1000);
        p.add("Goal", "Ship v1", Priority::High).unwrap();
        p.add("Notes", "Misc", Priority::Low).unwrap();
        let (context, truncated) = p.pack();
        assert!(!truncated);
        assert_eq!(context.matches("Goal").count(), 1);
        assert_eq!(context.matches("Notes").count(), 1);
        assert!(context.find("Goal").unwrap() < context.find("Notes").unwrap());
    }

    #[test]
    fn trailing_separator_is_trimmed() {
        let mut p = packer(1000);
        p.add("Goal", "Ship v1", Priority::Medium).unwrap();
        let (context, _) = p.pack();
        assert!(!context.ends_with('\n'));
    }

    #[test]
    fn exact_fit_is_not_truncated() {
        let mut p = packer("## A\n\nabc".chars().count());
        p.add("A", "abc", Priority::Medium).unwrap();
        let (context, truncated) = p.pack();
        assert_eq!(context, "## A\n\nabc");
        assert!(!truncated);
    }

    #[test]
    fn budget_counts_chars_not_bytes() {
        // The ⭐ marker is one char but three bytes; a byte-based
        // check would reject this exact fit.
        let rendered = Fragment::new("A", "abc", Priority::High).render();
        let mut p = packer(rendered.chars().count());
        p.add("A", "abc", Priority::High).unwrap();
        let (context, truncated) = p.pack();
        assert!(!truncated);
        assert_eq!(context, rendered);
    }

    #[test]
    fn stats_counts_fragments_and_lengths() {
        let mut p = packer(1000);
        p.add("A", "abc", Priority::Medium).unwrap();
        p.add("B", "defg", Priority::Low).unwrap();
        let stats = p.stats();
        assert_eq!(stats.fragment_count, 2);
        let expected =
            p.get("A").unwrap().rendered_len() + p.get("B").unwrap().rendered_len();
        assert_eq!(stats.total_rendered_length, expected);
        assert!(stats.within_limit);
    }

    #[test]
    fn stats_within_limit_ignores_separators() {
        // Two fragments whose rendered lengths sum exactly to the
        // budget: stats says within limit, but pack() — which also
        // spends separator chars — truncates. The divergence is part
        // of the contract.
        let a = Fragment::new("A", "aaaa", Priority::Medium);
        let b = Fragment::new("B", "bbbb", Priority::Medium);
        let budget = a.rendered_len() + b.rendered_len();
        let mut p = packer(budget);
        p.add("A", "aaaa", Priority::Medium).unwrap();
        p.add("B", "bbbb", Priority::Medium).unwrap();

        assert!(p.stats().within_limit);
        let (_, truncated) = p.pack();
        assert!(truncated);
    }

    #[test]
    fn clear_keeps_max_length() {
        let mut p = packer(123);
        p.add("A", "abc", Priority::Medium).unwrap();
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.max_length(), 123);
        assert_eq!(p.pack(), (String::new(), false));
    }

    #[test]
    fn add_examples_builds_numbered_block() {
        let mut p = packer(1000);
        p.add_examples(&[
            Example::new("def add(a, b): return a + b", "Simple function. Add type hints."),
            Example::new("x = 1", "Fine."),
        ])
        .unwrap();
        let frag = p.get("Examples").unwrap();
        assert_eq!(frag.priority, Priority::Medium);
        assert!(frag.content.contains("**Example 1:**"));
        assert!(frag.content.contains("**Example 2:**"));
        assert!(frag.content.contains("Input: x = 1"));
    }

    #[test]
    fn add_tools_builds_high_priority_listing() {
        let tools = vec![
            ToolDefinition {
                name: "analyze_code".into(),
                description: "Analyze code quality".into(),
                parameters: serde_json::json!({}),
            },
            ToolDefinition {
                name: "format_code".into(),
                description: "Format code".into(),
                parameters: serde_json::json!({}),
            },
        ];
        let mut p = packer(1000);
        p.add_tools(&tools).unwrap();
        let frag = p.get("Tools").unwrap();
        assert_eq!(frag.priority, Priority::High);
        assert!(frag.content.contains("- **analyze_code**: Analyze code quality"));
        assert!(frag.content.contains("- **format_code**: Format code"));
    }
}
