//! Line-break finalization, run after the last rule.
//!
//! Light mode turns each newline sitting between two non-newline bytes into
//! `<br />`. Full mode has already folded paragraph lines together, so the
//! only newlines left separate blocks and are dropped.

use std::borrow::Cow;

use memchr::{memchr, memchr_iter};

use crate::Mode;

const BR: &str = "<br />";

/// Finalize line breaks for `mode`.
pub fn finalize(text: &str, mode: Mode) -> Cow<'_, str> {
    match mode {
        Mode::Light => break_lines(text),
        Mode::Full => join_blocks(text),
    }
}

/// Replace each single newline between content with `<br />`.
///
/// Newlines at either end, or next to another newline, are kept.
pub fn break_lines(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut out: Option<String> = None;
    let mut last = 0;
    for pos in memchr_iter(b'\n', bytes) {
        let single = pos > 0
            && bytes[pos - 1] != b'\n'
            && bytes.get(pos + 1).is_some_and(|&b| b != b'\n');
        if !single {
            continue;
        }
        let out = out.get_or_insert_with(|| String::with_capacity(text.len() + text.len() / 8));
        out.push_str(&text[last..pos]);
        out.push_str(BR);
        last = pos + 1;
    }
    match out {
        Some(mut out) => {
            out.push_str(&text[last..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(text),
    }
}

/// Drop every newline.
pub fn join_blocks(text: &str) -> Cow<'_, str> {
    if memchr(b'\n', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.split('\n').collect())
}
