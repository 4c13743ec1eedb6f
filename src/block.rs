//! Block constructs whose output depends on the match, not just a template.
//!
//! Each function is the computed replacement of one rule in
//! [`crate::rule::RULES`]; the pattern guarantees the shape of the match.

use fancy_regex::Captures;

use crate::limits::MAX_HEADING_LEVEL;
use crate::rule::group;

/// `# text` .. `###### text`. Group 1 is the hash run, group 2 the content.
pub(crate) fn heading(caps: &Captures<'_>) -> String {
    let level = group(caps, 1).len().clamp(1, MAX_HEADING_LEVEL);
    let content = group(caps, 2);
    format!("<h{level} class=\"ui-title ui-title--{level}\">{content}</h{level}>")
}

/// A run of consecutive `- item` lines.
pub(crate) fn unordered_list(caps: &Captures<'_>) -> String {
    list(group(caps, 0), "ul", |line| line.strip_prefix("- ").unwrap_or(line))
}

/// A run of consecutive `1. item` / `1) item` lines.
pub(crate) fn ordered_list(caps: &Captures<'_>) -> String {
    list(group(caps, 0), "ol", strip_ordered_marker)
}

fn list(run: &str, tag: &str, item: impl Fn(&str) -> &str) -> String {
    let mut out = String::with_capacity(run.len() + 32);
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for line in run.split('\n') {
        out.push_str("<li>");
        out.push_str(item(line));
        out.push_str("</li>");
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    out
}

/// Drop the `N.` or `N)` marker and its space.
fn strip_ordered_marker(line: &str) -> &str {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    line.get(digits + 2..).unwrap_or("")
}

/// `--` alone between blank lines. Group 1 is the leading separator, kept so
/// the surrounding blocks stay apart.
pub(crate) fn horizontal_rule(caps: &Captures<'_>) -> String {
    format!("{}<hr />", group(caps, 1))
}

/// A run of non-blank lines that are not already blocks.
pub(crate) fn paragraph(caps: &Captures<'_>) -> String {
    let block = group(caps, 0);
    let mut out = String::with_capacity(block.len() + 32);
    out.push_str("<p class=\"ui-p\">");
    let mut lines = block.split('\n');
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push_str("<br />");
        out.push_str(line);
    }
    out.push_str("</p>");
    out
}
