//! Priority-ordered context packing.
//!
//! Builds one bounded-size prompt text from labeled, prioritized
//! fragments using a greedy, priority-ordered first-fit strategy:
//!
//! 1. Fragments are rendered (`⭐` marker for high priority, `##`
//!    heading, body) and sorted by priority weight, insertion order
//!    breaking ties.
//! 2. Rendered fragments are appended while the packed text stays
//!    within the character budget; the first fragment that does not
//!    fit stops the loop and raises the truncation flag.
//!
//! Truncation is an expected outcome, not an error — the packer never
//! fails on an over-budget fragment set.

pub mod compose;
pub mod fragment;
pub mod packer;
pub mod token;

pub use compose::{ContextMetadata, MergeEntry, context_metadata, format_context, merge_contexts};
pub use fragment::{Example, Fragment};
pub use packer::{ContextPacker, DEFAULT_MAX_LENGTH, PackerStats};
