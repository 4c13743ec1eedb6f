//! Bounds for pathological inputs.
//!
//! Every rule is a single left-to-right pass, so these cap the work a
//! hostile string can force onto one pass, or the memory a long-lived
//! cache holds.

/// Deepest heading level; `#######` falls through to plain text.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Link body segments read: url, title, rel, target.
/// Segments past this are ignored.
pub const MAX_LINK_SEGMENTS: usize = 4;

/// Backtracking budget per regex search. Exceeding it stops the rule and
/// leaves the rest of the string untouched.
pub const MAX_BACKTRACK_STEPS: usize = 1_000_000;

/// Default number of `(text, mode)` pairs a [`crate::MarkdownCache`] keeps.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;
