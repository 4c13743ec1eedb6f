//! Where generated tags sit in the working string.
//!
//! Sanitized user text has no raw `<` or `>`, so after any rule has run
//! every `<` opens a tag some rule emitted and the next `>` closes it. One
//! `memchr` scan per pass is enough to tell markup from text.

use memchr::memchr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Open,
    Close,
    /// `<br />`, `<hr />`, `<img ... />`.
    Void,
}

#[derive(Debug, Clone, Copy)]
struct Tag {
    start: usize,
    /// One past the `>`.
    end: usize,
    kind: TagKind,
}

/// Every tag in a string, in order.
#[derive(Debug, Default)]
pub(crate) struct TagSpans {
    tags: Vec<Tag>,
}

impl TagSpans {
    pub(crate) fn scan(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut tags = Vec::new();
        let mut pos = 0;
        while let Some(lt) = memchr(b'<', &bytes[pos..]) {
            let start = pos + lt;
            let Some(gt) = memchr(b'>', &bytes[start..]) else {
                break;
            };
            let end = start + gt + 1;
            let kind = if bytes.get(start + 1) == Some(&b'/') {
                TagKind::Close
            } else if end >= 2 && bytes[end - 2] == b'/' {
                TagKind::Void
            } else {
                TagKind::Open
            };
            tags.push(Tag { start, end, kind });
            pos = end;
        }
        Self { tags }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// End of the tag whose `<` .. `>` contains `pos`, if any.
    pub(crate) fn end_of_tag_at(&self, pos: usize) -> Option<usize> {
        let next = self.tags.partition_point(|t| t.start < pos);
        let tag = self.tags[..next].last()?;
        (pos < tag.end).then_some(tag.end)
    }

    /// Whether every tag starting in `start..end` is closed in the same
    /// range, and nothing in it closes a tag opened before `start`.
    pub(crate) fn is_balanced(&self, start: usize, end: usize) -> bool {
        let first = self.tags.partition_point(|t| t.start < start);
        let mut depth = 0usize;
        for tag in self.tags[first..].iter().take_while(|t| t.start < end) {
            if tag.end > end {
                return false;
            }
            match tag.kind {
                TagKind::Open => depth += 1,
                TagKind::Close => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                },
                TagKind::Void => {}
            }
        }
        depth == 0
    }
}

/// Whether the byte at `pos` is preceded by an odd run of backslashes.
pub(crate) fn is_escaped(text: &str, pos: usize) -> bool {
    let run = text.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();
    run % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "x <a class=\"ui-link\" href=\"/a_b\">y</a> z";

    #[test]
    fn test_scan_kinds() {
        let spans = TagSpans::scan("<p class=\"ui-p\">a<br />b</p>");
        let kinds: Vec<TagKind> = spans.tags.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, [TagKind::Open, TagKind::Void, TagKind::Close]);
        assert!(TagSpans::scan("plain &lt;text&gt;").is_empty());
    }

    #[test]
    fn test_end_of_tag_at() {
        let spans = TagSpans::scan(LINK);
        let underscore = LINK.find('_').unwrap();
        assert_eq!(spans.end_of_tag_at(underscore), Some(LINK.find('y').unwrap()));
        assert_eq!(spans.end_of_tag_at(0), None);
        assert_eq!(spans.end_of_tag_at(LINK.find('y').unwrap()), None);
        assert_eq!(spans.end_of_tag_at(LINK.len() - 1), None);
    }

    #[test]
    fn test_is_balanced() {
        let spans = TagSpans::scan(LINK);
        assert!(spans.is_balanced(0, LINK.len()));
        // Opens the anchor but stops inside its content.
        assert!(!spans.is_balanced(0, LINK.find('y').unwrap() + 1));
        // Starts inside the anchor content and runs past `</a>`.
        assert!(!spans.is_balanced(LINK.find('y').unwrap(), LINK.len()));
        // Ends in the middle of a tag.
        assert!(!spans.is_balanced(0, 5));
        assert!(TagSpans::scan("a<br />b").is_balanced(0, 8));
    }

    #[test]
    fn test_is_escaped() {
        assert!(!is_escaped("*a", 0));
        assert!(is_escaped("\\*a", 1));
        assert!(!is_escaped("\\\\*a", 2));
        assert!(is_escaped("\\\\\\*a", 3));
    }
}
