//! Heuristic code-quality scanning.
//!
//! Deliberately shallow: complexity comes from line and character
//! counts, issues from substring checks. This is a prompting aid that
//! produces text for context assembly, not a static analyzer — there
//! is no parsing and no semantic model, and the heuristics should stay
//! cheap enough to run on every snippet.

pub mod analysis;
pub mod language;
pub mod proof;

pub use analysis::{Analysis, analyze, analyze_with_proof};
pub use language::{Aspect, Complexity, Language};
pub use proof::{ProofSteps, generate_proof};
