//! # ctxforge Core
//!
//! Domain types, traits, and error definitions for the ctxforge
//! context-engineering toolkit. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Shared vocabulary lives here: the priority ranking that drives context
//! packing, the tool abstraction the registry executes, and the error
//! taxonomy. Implementations live in their respective crates, and all
//! crates depend inward on core.

pub mod error;
pub mod priority;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{AnalysisError, ContextError, Error, FeedbackError, Result, ToolError};
pub use priority::Priority;
pub use tool::{Tool, ToolCall, ToolDefinition, ToolRegistry, ToolResult};
