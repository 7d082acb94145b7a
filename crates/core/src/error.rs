//! Error types for the ctxforge domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all ctxforge operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Context packing errors ---
    #[error("Context error: {0}")]
    Context(#[from] ContextError),

    // --- Code analysis errors ---
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    // --- Feedback errors ---
    #[error("Feedback error: {0}")]
    Feedback(#[from] FeedbackError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Invalid-argument class errors from the context packer. Truncation is
/// never an error — it is reported through `pack()`'s return value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("invalid argument: unknown priority level '{0}' (expected high, medium, or low)")]
    InvalidPriority(String),

    #[error("invalid argument: max_length must be at least 1")]
    InvalidMaxLength,

    #[error("invalid argument: fragment title must not be empty")]
    EmptyTitle,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("unknown language: '{0}'")]
    UnknownLanguage(String),

    #[error("unknown analysis aspect: '{0}'")]
    UnknownAspect(String),

    #[error("empty code snippet")]
    EmptySnippet,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedbackError {
    #[error("unknown quality rating: '{0}' (expected excellent, good, fair, or poor)")]
    UnknownQuality(String),

    #[error("invalid success threshold {0} (must be in (0, 1])")]
    InvalidThreshold(f64),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}
