//! Thread-safe feedback recorder — collects execution records and
//! serves summaries, recommendations, and a markdown report.

use crate::model::{Adjustment, ExecutionRecord, FeedbackSummary, Impact};
use ctxforge_core::error::FeedbackError;
use std::sync::RwLock;

/// Default target success rate.
pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 0.8;

/// Default latency above which executions count as slow, in ms.
pub const DEFAULT_SLOW_CALL_MS: u64 = 1_000;

/// Fraction of poor-rated outputs that triggers a quality adjustment.
const POOR_QUALITY_RATIO: f64 = 0.2;

/// Collects execution records and derives adjustment recommendations.
///
/// Thread-safe via `RwLock`; all methods take `&self` so one recorder
/// can be shared across the process.
pub struct FeedbackRecorder {
    /// All recorded executions (most recent last).
    records: RwLock<Vec<ExecutionRecord>>,
    /// Adjustments the caller chose to apply.
    applied: RwLock<Vec<Adjustment>>,
    /// Target success rate in (0, 1].
    success_threshold: f64,
    /// Latency threshold for the performance recommendation.
    slow_call_ms: u64,
}

impl FeedbackRecorder {
    /// Create a recorder with default thresholds (80 % success target,
    /// 1000 ms slow-call threshold).
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            applied: RwLock::new(Vec::new()),
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
            slow_call_ms: DEFAULT_SLOW_CALL_MS,
        }
    }

    /// Create a recorder with custom thresholds.
    ///
    /// # Errors
    ///
    /// `FeedbackError::InvalidThreshold` unless
    /// `success_threshold` ∈ (0, 1].
    pub fn with_thresholds(
        success_threshold: f64,
        slow_call_ms: u64,
    ) -> Result<Self, FeedbackError> {
        if !(success_threshold > 0.0 && success_threshold <= 1.0) {
            return Err(FeedbackError::InvalidThreshold(success_threshold));
        }
        Ok(Self {
            records: RwLock::new(Vec::new()),
            applied: RwLock::new(Vec::new()),
            success_threshold,
            slow_call_ms,
        })
    }

    /// Record a tool execution.
    pub fn record(&self, record: ExecutionRecord) {
        tracing::debug!(
            tool = %record.tool_name,
            success = record.success,
            duration_ms = record.duration_ms,
            quality = %record.quality,
            "execution recorded"
        );
        self.records.write().unwrap().push(record);
    }

    /// Number of recorded executions.
    pub fn count(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Analyze all recorded executions.
    ///
    /// An empty history yields the all-zero summary with no
    /// recommendations.
    pub fn analyze(&self) -> FeedbackSummary {
        let records = self.records.read().unwrap();
        if records.is_empty() {
            return FeedbackSummary::empty();
        }

        let total = records.len();
        let successes = records.iter().filter(|r| r.success).count();
        let success_rate = successes as f64 / total as f64;

        let total_ms: u64 = records.iter().map(|r| r.duration_ms).sum();
        let avg_duration_ms = total_ms as f64 / total as f64;

        let poor_count = records
            .iter()
            .filter(|r| r.quality == crate::model::Quality::Poor)
            .count();

        drop(records);

        let recommendations =
            self.recommendations(success_rate, avg_duration_ms, poor_count, total);

        FeedbackSummary {
            success_rate,
            avg_duration_ms,
            total_executions: total,
            recommendations,
        }
    }

    fn recommendations(
        &self,
        success_rate: f64,
        avg_duration_ms: f64,
        poor_count: usize,
        total: usize,
    ) -> Vec<Adjustment> {
        let mut recs = Vec::new();

        if success_rate < self.success_threshold {
            recs.push(Adjustment {
                metric: "success_rate".into(),
                change: "Increase tool parameter validation".into(),
                reason: format!(
                    "Success rate ({:.1}%) below target ({:.1}%)",
                    success_rate * 100.0,
                    self.success_threshold * 100.0
                ),
                impact: Impact::High,
            });
            recs.push(Adjustment {
                metric: "context_clarity".into(),
                change: "Add more detailed tool descriptions to prompts".into(),
                reason: "Tools may not be receiving clear enough instructions".into(),
                impact: Impact::High,
            });
        }

        if avg_duration_ms > self.slow_call_ms as f64 {
            recs.push(Adjustment {
                metric: "performance".into(),
                change: "Consider breaking complex tasks into smaller steps".into(),
                reason: format!(
                    "Average execution time ({avg_duration_ms:.0}ms) exceeds optimal threshold"
                ),
                impact: Impact::Medium,
            });
        }

        if poor_count as f64 > total as f64 * POOR_QUALITY_RATIO {
            recs.push(Adjustment {
                metric: "output_quality".into(),
                change: "Provide more context examples and expected formats".into(),
                reason: format!(
                    "{:.1}% of outputs rated as poor quality",
                    poor_count as f64 / total as f64 * 100.0
                ),
                impact: Impact::High,
            });
        }

        recs
    }

    /// Record that an adjustment was applied.
    pub fn apply(&self, adjustment: Adjustment) {
        tracing::info!(
            metric = %adjustment.metric,
            impact = %adjustment.impact,
            "adjustment applied"
        );
        self.applied.write().unwrap().push(adjustment);
    }

    /// Adjustments applied so far.
    pub fn applied(&self) -> Vec<Adjustment> {
        self.applied.read().unwrap().clone()
    }

    /// Generate a markdown report of metrics and recommendations.
    pub fn report(&self) -> String {
        let summary = self.analyze();

        let mut report = String::from("# Feedback Loop Report\n\n");
        report.push_str("## Performance Metrics\n");
        report.push_str(&format!(
            "- Success Rate: {:.1}%\n",
            summary.success_rate * 100.0
        ));
        report.push_str(&format!(
            "- Avg Execution Time: {:.0}ms\n",
            summary.avg_duration_ms
        ));
        report.push_str(&format!(
            "- Total Executions: {}\n\n",
            summary.total_executions
        ));

        report.push_str("## Recommendations\n");
        if summary.recommendations.is_empty() {
            report.push_str("✅ No adjustments needed - performance is optimal!\n");
        } else {
            for rec in &summary.recommendations {
                report.push_str(&format!(
                    "### {} ({} impact)\n",
                    rec.metric.to_uppercase(),
                    rec.impact
                ));
                report.push_str(&format!("- **Change**: {}\n", rec.change));
                report.push_str(&format!("- **Reason**: {}\n\n", rec.reason));
            }
        }

        report
    }

    /// Clear all records and applied adjustments for a new cycle.
    pub fn reset(&self) {
        self.records.write().unwrap().clear();
        self.applied.write().unwrap().clear();
        tracing::debug!("feedback recorder reset");
    }
}

impl Default for FeedbackRecorder {
    fn default() -> Self {
        Self::new()
    }
}
