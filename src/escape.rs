//! Input sanitizer.
//!
//! Runs once, before any rule, so no markup from the caller's text can reach
//! the output. Fast-path optimized: finds the first escapable byte with
//! `memchr`, then bulk-copies the runs between escapes.
//!
//! `&` is handled in the same single left-to-right scan as the others, so
//! entities produced here are never escaped a second time.

use memchr::{memchr2, memchr3};

/// Lookup table for the five HTML-significant bytes.
/// Index by byte value, true if needs escaping.
const ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table[b'"' as usize] = true;
    table[b'\'' as usize] = true;
    table
};

/// Entity for an escapable byte.
#[inline]
fn entity(b: u8) -> &'static str {
    match b {
        b'<' => "&lt;",
        b'>' => "&gt;",
        b'&' => "&amp;",
        b'"' => "&quot;",
        b'\'' => "&#039;",
        // Only reachable for bytes outside ESCAPE_TABLE.
        _ => "",
    }
}

/// Escape `input` into `out`.
///
/// # Example
/// ```
/// use ui_markdown::escape::sanitize_into;
///
/// let mut out = String::new();
/// sanitize_into(&mut out, "<b>\"Tom & Jerry's\"</b>");
/// assert_eq!(out, "&lt;b&gt;&quot;Tom &amp; Jerry&#039;s&quot;&lt;/b&gt;");
/// ```
pub fn sanitize_into(out: &mut String, input: &str) {
    let bytes = input.as_bytes();
    let Some(first) = first_escape(bytes) else {
        out.push_str(input);
        return;
    };

    out.push_str(&input[..first]);
    let mut pos = first;
    while pos < bytes.len() {
        let scan_start = pos;
        while pos < bytes.len() && !ESCAPE_TABLE[bytes[pos] as usize] {
            pos += 1;
        }
        // Escapable bytes are ASCII, so both ends are char boundaries.
        if pos > scan_start {
            out.push_str(&input[scan_start..pos]);
        }
        if pos < bytes.len() {
            out.push_str(entity(bytes[pos]));
            pos += 1;
        }
    }
}

/// Escape `input` into a new string.
///
/// Prefer [`sanitize_into`] to reuse buffers.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    sanitize_into(&mut out, input);
    out
}

/// Check if a string contains any byte the sanitizer would rewrite.
#[inline]
pub fn needs_escape(input: &str) -> bool {
    first_escape(input.as_bytes()).is_some()
}

#[inline]
fn first_escape(input: &[u8]) -> Option<usize> {
    let a = memchr3(b'<', b'>', b'&', input);
    let b = memchr2(b'"', b'\'', input);
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
