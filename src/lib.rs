//! ui-markdown: lightweight Markdown to HTML for UI labels and content
//!
//! A small, fixed pipeline of regex rewrite rules run over sanitized text.
//! Every UI component renders its user-supplied labels, helpers and
//! descriptions through [`markdown`], so the same call yields byte-identical
//! HTML no matter which front end invokes it.
//!
//! # Pipeline
//! 1. [`escape::sanitize`]: the five HTML-significant characters become
//!    entities, so no markup from the input survives.
//! 2. [`rule::RULES`]: ordered rewrite rules; block rules only run in
//!    [`Mode::Full`].
//! 3. [`line_break::finalize`]: `<br />` in light mode, block joining in
//!    full mode.
//! 4. Trim.
//!
//! # Example
//! ```
//! assert_eq!(
//!     ui_markdown::markdown("**Save** changes", true),
//!     "<strong class=\"ui-markdown--strong\">Save</strong> changes"
//! );
//! assert_eq!(
//!     ui_markdown::markdown("### Settings", false),
//!     "<h3 class=\"ui-title ui-title--3\">Settings</h3>"
//! );
//! ```

/// Emit a `tracing` event when the `trace` feature is on; nothing otherwise.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "trace")]
        tracing::$level!($($arg)+);
    };
}

pub mod block;
pub mod cache;
pub mod escape;
pub mod limits;
pub mod line_break;
pub mod link;
pub mod rule;
mod tag;

pub use cache::{MarkdownCache, render_map};
pub use link::{ImageParts, LinkParts};
pub use rule::{Rule, RuleKind, RuleTable, RULES};

/// Which subset of rules runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Inline rules and lists only; newlines become `<br />`. Meant for
    /// short strings such as button labels and helper text.
    #[default]
    Light,
    /// Every rule: paragraphs, headings, blockquotes, images and rules.
    Full,
}

impl Mode {
    /// `true` selects [`Mode::Light`].
    #[inline]
    pub const fn from_light(light: bool) -> Self {
        if light { Self::Light } else { Self::Full }
    }

    #[inline]
    pub const fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }
}

impl From<bool> for Mode {
    fn from(light: bool) -> Self {
        Self::from_light(light)
    }
}

/// Convert Markdown to HTML; `light` picks [`Mode::Light`] over [`Mode::Full`].
///
/// Total over all input: malformed markup degrades to literal text.
pub fn markdown(text: &str, light: bool) -> String {
    to_html_with_mode(text, Mode::from_light(light))
}

/// Convert Markdown to HTML in light mode, the default.
pub fn to_html(text: &str) -> String {
    to_html_with_mode(text, Mode::Light)
}

/// Convert Markdown to HTML.
pub fn to_html_with_mode(text: &str, mode: Mode) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    to_html_into(text, mode, &mut out);
    out
}

/// Convert Markdown to HTML, writing into a provided buffer.
///
/// The buffer is cleared first.
pub fn to_html_into(text: &str, mode: Mode, out: &mut String) {
    let mut working = escape::sanitize(text);
    match RuleTable::global() {
        Ok(table) => working = table.apply(working, mode),
        Err(_err) => {
            trace_event!(warn, error = %_err, "rule table failed to compile; emitting sanitized text");
        }
    }
    let finalized = line_break::finalize(&working, mode);
    out.clear();
    out.push_str(finalized.trim());
}
