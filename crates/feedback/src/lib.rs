//! Execution feedback for context engineering.
//!
//! Records tool executions (outcome, latency, token spend, a quality
//! rating), aggregates them into a summary with threshold-driven
//! adjustment recommendations, and applies high-impact recommendations
//! back onto context text under a token budget.
//!
//! The recorder is thread-safe via `RwLock` and shared behind `&self`;
//! the heuristics are deliberate mean/threshold arithmetic, not a
//! learning system.

pub mod model;
pub mod optimizer;
pub mod recorder;

pub use model::{Adjustment, ExecutionRecord, FeedbackSummary, Impact, Quality};
pub use optimizer::{ContextOptimizer, Optimized};
pub use recorder::FeedbackRecorder;
