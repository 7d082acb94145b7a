//! Priority levels for context fragments.
//!
//! A closed enumeration replaces free-form priority strings so a typo'd
//! level is rejected at the boundary instead of silently defaulting.
//! The numeric weight table lives here, next to the variants it ranks.

use crate::error::ContextError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How strongly a fragment should be preferred when packing context.
///
/// Higher weight packs earlier. Fragments of equal weight keep their
/// insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Must-have context. Rendered with a leading ⭐ marker.
    High,
    /// Normal context.
    #[default]
    Medium,
    /// Nice-to-have context, first to be dropped under budget pressure.
    Low,
}

impl Priority {
    /// The numeric weight used to order fragments during packing.
    pub fn weight(self) -> u32 {
        match self {
            Self::High => 100,
            Self::Medium => 50,
            Self::Low => 10,
        }
    }

    /// Lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(ContextError::InvalidPriority(other.to_string())),
        }
    }
}
