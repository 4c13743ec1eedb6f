//! Memoized rendering.
//!
//! The transformer is pure, so a given `(text, mode)` pair always renders
//! to the same HTML. Components whose labels rarely change can keep one of
//! these instead of re-running the rule table on every render.

use rustc_hash::FxBuildHasher as FastHashBuilder;
use std::collections::HashMap;

use crate::limits::DEFAULT_CACHE_CAPACITY;
use crate::{Mode, to_html_with_mode};

/// A bounded `(text, mode) -> html` map.
///
/// When full, the cache is cleared before the next entry goes in.
///
/// # Example
/// ```
/// use ui_markdown::{MarkdownCache, Mode};
///
/// let mut cache = MarkdownCache::default();
/// assert_eq!(cache.render("**Save**", Mode::Light), "<strong class=\"ui-markdown--strong\">Save</strong>");
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownCache {
    light: HashMap<String, String, FastHashBuilder>,
    full: HashMap<String, String, FastHashBuilder>,
    capacity: usize,
}

impl Default for MarkdownCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl MarkdownCache {
    /// Create a cache holding at most `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            light: HashMap::default(),
            full: HashMap::default(),
            capacity: capacity.max(1),
        }
    }

    /// Render `text`, reusing the stored HTML when this pair was seen before.
    pub fn render(&mut self, text: &str, mode: Mode) -> &str {
        if !self.map(mode).contains_key(text) {
            if self.len() >= self.capacity {
                self.clear();
            }
            let html = to_html_with_mode(text, mode);
            self.map_mut(mode).insert(text.to_owned(), html);
        }
        self.map(mode).get(text).map_or("", String::as_str)
    }

    /// Stored HTML for `text`, without rendering.
    pub fn get(&self, text: &str, mode: Mode) -> Option<&str> {
        self.map(mode).get(text).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.light.len() + self.full.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.light.clear();
        self.full.clear();
    }

    #[inline]
    fn map(&self, mode: Mode) -> &HashMap<String, String, FastHashBuilder> {
        match mode {
            Mode::Light => &self.light,
            Mode::Full => &self.full,
        }
    }

    #[inline]
    fn map_mut(&mut self, mode: Mode) -> &mut HashMap<String, String, FastHashBuilder> {
        match mode {
            Mode::Light => &mut self.light,
            Mode::Full => &mut self.full,
        }
    }
}

/// Render every label once, e.g. when an options list changes.
///
/// Duplicate labels are rendered once.
pub fn render_map<'a, I>(labels: I, mode: Mode) -> HashMap<&'a str, String, FastHashBuilder>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut map = HashMap::default();
    for label in labels {
        map.entry(label).or_insert_with(|| to_html_with_mode(label, mode));
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_memoized_per_mode() {
        let mut cache = MarkdownCache::default();
        assert_eq!(cache.render("# Title", Mode::Light), "# Title");
        assert_eq!(
            cache.render("# Title", Mode::Full),
            "<h1 class=\"ui-title ui-title--1\">Title</h1>"
        );
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("# Title", Mode::Light), Some("# Title"));
        assert_eq!(cache.get("missing", Mode::Light), None);
    }

    #[test]
    fn test_repeat_render_does_not_grow() {
        let mut cache = MarkdownCache::default();
        cache.render("*a*", Mode::Light);
        cache.render("*a*", Mode::Light);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_full_cache_is_cleared() {
        let mut cache = MarkdownCache::with_capacity(2);
        cache.render("a", Mode::Light);
        cache.render("b", Mode::Light);
        assert_eq!(cache.len(), 2);
        cache.render("c", Mode::Full);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a", Mode::Light), None);
        assert_eq!(cache.get("c", Mode::Full), Some("<p class=\"ui-p\">c</p>"));
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut cache = MarkdownCache::with_capacity(0);
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.render("x", Mode::Light), "x");
        assert!(!cache.is_empty());
    }

    #[test]
    fn test_render_map() {
        let map = render_map(["**a**", "b", "**a**"], Mode::Light);
        assert_eq!(map.len(), 2);
        assert_eq!(map["**a**"], "<strong class=\"ui-markdown--strong\">a</strong>");
        assert_eq!(map["b"], "b");
    }
}
