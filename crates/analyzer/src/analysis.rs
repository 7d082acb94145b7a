//! The analysis entry points: size-derived complexity plus substring
//! issue checks and aspect-driven suggestions.

use crate::language::{Aspect, Complexity, Language};
use crate::proof::{ProofSteps, generate_proof};
use ctxforge_core::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Result of analyzing a code snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub language: Language,
    pub complexity: Complexity,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    /// Present only when proof generation was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_steps: Option<ProofSteps>,
}

/// Analyze a code snippet for complexity and common issues.
///
/// Complexity is derived purely from size: up to 5 trimmed lines and
/// under 200 chars is simple, up to 30 lines and under 1000 chars is
/// moderate, anything larger is complex. With no aspects given, the
/// default suggestion pair is returned.
///
/// # Errors
///
/// `AnalysisError::EmptySnippet` if `code` is blank.
pub fn analyze(
    code: &str,
    language: Language,
    aspects: &[Aspect],
) -> Result<Analysis, AnalysisError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::EmptySnippet);
    }

    let line_count = trimmed.lines().count();
    let char_count = code.chars().count();

    let complexity = if line_count <= 5 && char_count < 200 {
        Complexity::Simple
    } else if line_count <= 30 && char_count < 1000 {
        Complexity::Moderate
    } else {
        Complexity::Complex
    };

    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    if code.contains("TODO") || code.contains("FIXME") {
        issues.push("Contains TODO/FIXME comments".to_string());
    }

    if line_count > 50 {
        issues.push("Function is quite long".to_string());
        suggestions.push("Consider breaking into smaller functions".to_string());
    }

    if aspects.is_empty() {
        suggestions.push("Add type hints".to_string());
        suggestions.push("Extract duplicated logic".to_string());
    } else {
        for aspect in aspects {
            match aspect {
                Aspect::Performance => {
                    suggestions.push("Consider performance impact".to_string())
                }
                Aspect::Readability => {
                    suggestions.push("Add type hints for better readability".to_string())
                }
                Aspect::Security => {
                    suggestions.push("Review for potential security issues".to_string())
                }
            }
        }
    }

    tracing::debug!(%language, %complexity, issue_count = issues.len(), "analyzed snippet");

    Ok(Analysis {
        language,
        complexity,
        issues,
        suggestions,
        proof_steps: None,
    })
}

/// Analyze a snippet and attach proof tests for a specific issue.
///
/// The generated tests are templates that fail against the described
/// issue and pass once it is fixed.
pub fn analyze_with_proof(
    code: &str,
    language: Language,
    aspects: &[Aspect],
    issue_to_resolve: &str,
) -> Result<Analysis, AnalysisError> {
    let mut analysis = analyze(code, language, aspects)?;
    analysis.proof_steps = Some(generate_proof(code, language, issue_to_resolve));
    Ok(analysis)
}
