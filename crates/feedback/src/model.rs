//! Data model for execution records, quality ratings, and adjustment
//! recommendations.

use chrono::{DateTime, Utc};
use ctxforge_core::error::FeedbackError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

// ── Quality ───────────────────────────────────────────────────────────────

/// Subjective rating of a tool execution's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

impl FromStr for Quality {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            other => Err(FeedbackError::UnknownQuality(other.to_string())),
        }
    }
}

// ── Execution record ──────────────────────────────────────────────────────

/// One recorded tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Unique identifier.
    pub id: String,
    /// Which tool ran.
    pub tool_name: String,
    /// When it ran.
    pub timestamp: DateTime<Utc>,
    /// Whether it succeeded.
    pub success: bool,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Context tokens the execution consumed.
    pub tokens_used: u64,
    /// Output quality rating.
    pub quality: Quality,
    /// Optional free-form feedback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ExecutionRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        tool_name: impl Into<String>,
        success: bool,
        duration_ms: u64,
        tokens_used: u64,
        quality: Quality,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tool_name: tool_name.into(),
            timestamp: Utc::now(),
            success,
            duration_ms,
            tokens_used,
            quality,
            note: None,
        }
    }

    /// Attach free-form feedback.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

// ── Adjustments ───────────────────────────────────────────────────────────

/// Expected impact of applying an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// A recommended context adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Which metric motivated the recommendation.
    pub metric: String,
    /// What to change.
    pub change: String,
    /// Why.
    pub reason: String,
    /// Expected impact.
    pub impact: Impact,
}

// ── Summary ───────────────────────────────────────────────────────────────

/// Aggregated view over all recorded executions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackSummary {
    /// Fraction of executions that succeeded (0.0–1.0).
    pub success_rate: f64,
    /// Mean execution time in milliseconds.
    pub avg_duration_ms: f64,
    /// Number of recorded executions.
    pub total_executions: usize,
    /// Recommended adjustments, highest impact first.
    pub recommendations: Vec<Adjustment>,
}

impl FeedbackSummary {
    /// The all-zero summary returned for an empty history.
    pub fn empty() -> Self {
        Self {
            success_rate: 0.0,
            avg_duration_ms: 0.0,
            total_executions: 0,
            recommendations: Vec::new(),
        }
    }
}
