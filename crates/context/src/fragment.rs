//! A titled, prioritized block of text and its rendered form.

use ctxforge_core::Priority;
use serde::{Deserialize, Serialize};

/// Marker prepended to high-priority fragments when rendering.
pub(crate) const HIGH_PRIORITY_MARKER: &str = "⭐ ";

/// A titled, prioritized block of text to be included in packed output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Unique title within a packer instance.
    pub title: String,
    /// The text body, included verbatim.
    pub content: String,
    /// Packing priority.
    pub priority: Priority,
}

impl Fragment {
    pub fn new(title: impl Into<String>, content: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            priority,
        }
    }

    /// Render this fragment: an emphasis marker for high priority, a
    /// level-2 heading with the title, a blank line, then the content.
    pub fn render(&self) -> String {
        let marker = if self.priority == Priority::High {
            HIGH_PRIORITY_MARKER
        } else {
            ""
        };
        format!("{marker}## {}\n\n{}", self.title, self.content)
    }

    /// Rendered length in characters (Unicode scalar values, so the
    /// marker counts as two: the star and the space).
    pub fn rendered_len(&self) -> usize {
        self.render().chars().count()
    }
}

/// An input/output pair for the `add_examples` convenience builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: String,
}

impl Example {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}
