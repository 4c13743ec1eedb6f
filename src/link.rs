//! Links and images.
//!
//! Link syntax is `[label](url|title|rel|target)`; every segment after the
//! url is optional. Text reaching here is already sanitized, so segment
//! values are written into attributes as is. Urls with a script-capable
//! scheme (`javascript:`, `vbscript:`, `data:`) are not turned into links.

use fancy_regex::Captures;
use memchr::memchr_iter;
use smallvec::SmallVec;

use crate::limits::MAX_LINK_SEGMENTS;
use crate::rule::group;

/// Schemes a browser would execute or render inline from an `href`.
const BLOCKED_SCHEMES: [&str; 3] = ["javascript", "vbscript", "data"];

/// Typed captures of a link match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkParts<'a> {
    pub label: &'a str,
    pub url: &'a str,
    pub title: Option<&'a str>,
    pub rel: Option<&'a str>,
    pub target: Option<&'a str>,
}

impl<'a> LinkParts<'a> {
    /// Split a link body on `|`.
    ///
    /// Returns `None` when the url segment is empty, contains whitespace or
    /// uses a blocked scheme. Empty optional segments are treated as absent.
    pub fn parse(label: &'a str, body: &'a str) -> Option<Self> {
        let segments = split_segments(body);
        let url = segments.first().copied().unwrap_or("");
        if url.is_empty() || url.bytes().any(|b| b.is_ascii_whitespace()) || has_blocked_scheme(url) {
            return None;
        }
        let optional = |i: usize| segments.get(i).copied().filter(|s| !s.is_empty());
        Some(Self {
            label,
            url,
            title: optional(1),
            rel: optional(2),
            target: optional(3),
        })
    }

    /// Write the anchor tag into `out`.
    pub fn render_into(&self, out: &mut String) {
        out.push_str("<a class=\"ui-link\" href=\"");
        out.push_str(self.url);
        out.push('"');
        for (name, value) in [("title", self.title), ("rel", self.rel), ("target", self.target)] {
            if let Some(value) = value {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(value);
                out.push('"');
            }
        }
        out.push('>');
        out.push_str(self.label);
        out.push_str("</a>");
    }
}

/// Browsers drop leading control characters before reading the scheme.
fn has_blocked_scheme(url: &str) -> bool {
    let url = url.trim_start_matches(|c: char| c.is_ascii_control());
    let Some((scheme, _)) = url.split_once(':') else {
        return false;
    };
    BLOCKED_SCHEMES
        .iter()
        .any(|blocked| scheme.eq_ignore_ascii_case(blocked))
}

/// At most [`MAX_LINK_SEGMENTS`] `|`-separated pieces of `body`.
fn split_segments(body: &str) -> SmallVec<[&str; MAX_LINK_SEGMENTS]> {
    let mut segments = SmallVec::new();
    let mut start = 0;
    for pipe in memchr_iter(b'|', body.as_bytes()) {
        if segments.len() == MAX_LINK_SEGMENTS - 1 {
            // Drop everything after the target segment.
            segments.push(&body[start..pipe]);
            return segments;
        }
        segments.push(&body[start..pipe]);
        start = pipe + 1;
    }
    segments.push(&body[start..]);
    segments
}

/// Typed captures of an image match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageParts<'a> {
    pub alt: &'a str,
    pub src: &'a str,
}

impl ImageParts<'_> {
    /// Write the image tag into `out`.
    pub fn render_into(&self, out: &mut String) {
        out.push_str("<img class=\"ui-image\" src=\"");
        out.push_str(self.src);
        out.push_str("\" alt=\"");
        out.push_str(self.alt);
        out.push_str("\" />");
    }
}

/// Replacement for the link rule: group 1 is the label, group 2 the body.
pub(crate) fn link(caps: &Captures<'_>) -> String {
    let whole = group(caps, 0);
    match LinkParts::parse(group(caps, 1), group(caps, 2)) {
        Some(parts) => {
            let mut out = String::with_capacity(whole.len() + 32);
            parts.render_into(&mut out);
            out
        }
        None => whole.to_owned(),
    }
}

/// Replacement for the image rule: group 1 is the alt text, group 2 the src.
pub(crate) fn image(caps: &Captures<'_>) -> String {
    let parts = ImageParts {
        alt: group(caps, 1),
        src: group(caps, 2),
    };
    let mut out = String::with_capacity(parts.alt.len() + parts.src.len() + 40);
    parts.render_into(&mut out);
    out
}
