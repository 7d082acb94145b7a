//! Context optimizer — folds high-impact recommendations back into
//! context text and keeps the result inside a token budget.

use crate::model::{FeedbackSummary, Impact};
use ctxforge_context::token::estimate_tokens;

/// Default token budget for optimized context.
pub const DEFAULT_MAX_TOKENS: usize = 8_000;

/// Fraction of the budget kept when trimming.
const TRIM_RATIO: f64 = 0.9;

/// Marker appended when context is cut to fit the budget.
const TRIM_MARKER: &str = "\n\n[... context trimmed ...]";

/// The result of an optimization pass.
#[derive(Debug, Clone)]
pub struct Optimized {
    /// The adjusted (and possibly trimmed) context text.
    pub context: String,
    /// Token estimate of the adjusted context, measured before any
    /// trimming so callers can see how far over budget they were.
    pub tokens_used: usize,
    /// The changes that were folded in.
    pub applied: Vec<String>,
}

/// Adjusts context text based on feedback analysis.
pub struct ContextOptimizer {
    max_tokens: usize,
}

impl ContextOptimizer {
    /// Create an optimizer with the given token budget.
    pub fn new(max_tokens: usize) -> Self {
        Self { max_tokens }
    }

    /// The configured token budget.
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Fold each high-impact recommendation into the context as a
    /// `## Context Adjustment` section, then trim to 90 % of the char
    /// budget if the token estimate exceeds `max_tokens`.
    pub fn optimize(&self, context: &str, summary: &FeedbackSummary) -> Optimized {
        let mut optimized = context.to_string();
        let mut applied = Vec::new();

        for rec in &summary.recommendations {
            if rec.impact == Impact::High {
                optimized.push_str(&format!("\n\n## Context Adjustment\n{}", rec.change));
                applied.push(rec.change.clone());
            }
        }

        let tokens_used = estimate_tokens(&optimized);

        if tokens_used > self.max_tokens {
            tracing::warn!(
                tokens_used,
                max_tokens = self.max_tokens,
                "context exceeds token budget, trimming"
            );
            optimized = self.trim(&optimized);
        }

        Optimized {
            context: optimized,
            tokens_used,
            applied,
        }
    }

    /// Cut context to 90 % of the character budget and append the trim
    /// marker.
    fn trim(&self, context: &str) -> String {
        let target_chars = (self.max_tokens as f64 * 4.0 * TRIM_RATIO) as usize;
        if context.chars().count() <= target_chars {
            return context.to_string();
        }
        let mut trimmed: String = context.chars().take(target_chars).collect();
        trimmed.push_str(TRIM_MARKER);
        trimmed
    }
}

impl Default for ContextOptimizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Adjustment;

    fn summary_with(recommendations: Vec<Adjustment>) -> FeedbackSummary {
        FeedbackSummary {
            success_rate: 0.5,
            avg_duration_ms: 100.0,
            total_executions: 4,
            recommendations,
        }
    }

    fn adjustment(change: &str, impact: Impact) -> Adjustment {
        Adjustment {
            metric: "success_rate".into(),
            change: change.into(),
            reason: "test".into(),
            impact,
        }
    }

    #[test]
    fn no_recommendations_leaves_context_unchanged() {
        let optimizer = ContextOptimizer::default();
        let result = optimizer.optimize("## Task\n\nDo the thing", &summary_with(vec![]));
        assert_eq!(result.context, "## Task\n\nDo the thing");
        assert!(result.applied.is_empty());
    }

    #[test]
    fn high_impact_recommendations_are_appended() {
        let optimizer = ContextOptimizer::default();
        let summary = summary_with(vec![
            adjustment("Increase tool parameter validation", Impact::High),
            adjustment("Break tasks into smaller steps", Impact::Medium),
        ]);
        let result = optimizer.optimize("base", &summary);
        assert!(result.context.contains("## Context Adjustment"));
        assert!(result.context.contains("Increase tool parameter validation"));
        assert!(!result.context.contains("smaller steps"));
        assert_eq!(result.applied, vec!["Increase tool parameter validation".to_string()]);
    }

    #[test]
    fn tokens_used_reflects_adjusted_context() {
        let optimizer = ContextOptimizer::default();
        let summary = summary_with(vec![adjustment("Add examples", Impact::High)]);
        let result = optimizer.optimize("base", &summary);
        assert_eq!(result.tokens_used, estimate_tokens(&result.context));
    }

    #[test]
    fn over_budget_context_is_trimmed_with_marker() {
        let optimizer = ContextOptimizer::new(10); // 40-char budget
        let long = "x".repeat(200);
        let result = optimizer.optimize(&long, &summary_with(vec![]));
        assert!(result.context.ends_with("[... context trimmed ...]"));
        // 90% of 40 chars, plus the marker
        assert_eq!(
            result.context.chars().count(),
            36 + TRIM_MARKER.chars().count()
        );
        // tokens_used reports the pre-trim size
        assert_eq!(result.tokens_used, 50);
    }

    #[test]
    fn within_budget_context_is_not_trimmed() {
        let optimizer = ContextOptimizer::new(100);
        let result = optimizer.optimize("short context", &summary_with(vec![]));
        assert!(!result.context.contains("trimmed"));
    }
}
