//! The rule table.
//!
//! Every rule is one global regex substitution over the whole working
//! string. Order matters: later rules see the tags earlier rules produced.
//! Links and images run before the delimiter rules so urls are not
//! rewritten, and the paragraph rule runs after every block rule so it can
//! skip lines that already open a block.
//!
//! Links and delimiter pairs (strong, emphasis, underline, italic, code) are
//! checked outside the regex: neither end may sit inside a generated tag,
//! and group 1 must hold whole elements only. Delimiters escaped by an odd
//! run of backslashes are skipped as well. A candidate touching a tag
//! resumes after that tag; any other rejected candidate is retried one byte
//! past its start.

use std::borrow::Cow;
use std::sync::LazyLock;

use fancy_regex::{Captures, Expander, Regex, RegexBuilder};

use crate::limits::MAX_BACKTRACK_STEPS;
use crate::tag::{TagSpans, is_escaped};
use crate::{Mode, block, link};

/// Which markdown construct a rule handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Leading and trailing horizontal whitespace on each line.
    EdgeWhitespace,
    Image,
    Link,
    Strong,
    Emphasis,
    Underline,
    Italic,
    Blockquote,
    Heading,
    HorizontalRule,
    UnorderedList,
    OrderedList,
    InlineCode,
    Paragraph,
    /// Backslashes left over from escaped delimiters.
    EscapeCleanup,
}

impl RuleKind {
    /// Inline rules whose group 1 sits between two delimiters.
    #[inline]
    pub const fn is_delimiter_pair(self) -> bool {
        matches!(
            self,
            Self::Strong | Self::Emphasis | Self::Underline | Self::Italic | Self::InlineCode
        )
    }

    /// Rules that run after other rules have emitted tags and must not
    /// match across them.
    #[inline]
    pub const fn respects_tags(self) -> bool {
        matches!(self, Self::Link) || self.is_delimiter_pair()
    }
}

/// How a match is rewritten.
#[derive(Debug, Clone, Copy)]
pub enum Replacement {
    /// Remove the match.
    Delete,
    /// Surround capture group 1.
    Wrap {
        open: &'static str,
        close: &'static str,
    },
    /// `$1`-style template.
    Template(&'static str),
    /// Output depends on the captures (heading level, link segments, ...).
    Computed(fn(&Captures<'_>) -> String),
}

impl Replacement {
    fn append(&self, caps: &Captures<'_>, out: &mut String) {
        match *self {
            Self::Delete => {}
            Self::Wrap { open, close } => {
                out.push_str(open);
                out.push_str(group(caps, 1));
                out.push_str(close);
            }
            Self::Template(template) => Expander::default().append_expansion(out, template, caps),
            Self::Computed(replace) => out.push_str(&replace(caps)),
        }
    }
}

/// One step of the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub kind: RuleKind,
    pub pattern: &'static str,
    pub replacement: Replacement,
    pub applies_in_light_mode: bool,
}

impl Rule {
    /// Whether this rule runs in `mode`. Full mode runs every rule.
    #[inline]
    pub const fn applies_to(&self, mode: Mode) -> bool {
        match mode {
            Mode::Light => self.applies_in_light_mode,
            Mode::Full => true,
        }
    }
}

/// The pipeline, in application order.
pub const RULES: &[Rule] = &[
    Rule {
        kind: RuleKind::EdgeWhitespace,
        pattern: r"(?m)^[ \t]+|[ \t\r]+$",
        replacement: Replacement::Delete,
        applies_in_light_mode: true,
    },
    Rule {
        kind: RuleKind::Image,
        pattern: r"!\[([^\]\n]*)\]\(([^)\s|]+)\)",
        replacement: Replacement::Computed(link::image),
        applies_in_light_mode: false,
    },
    Rule {
        kind: RuleKind::Link,
        pattern: r"\[([^\]\n]+)\]\(([^)\n]+)\)",
        replacement: Replacement::Computed(link::link),
        applies_in_light_mode: true,
    },
    Rule {
        kind: RuleKind::Strong,
        pattern: r"\*\*([^*\n]+)\*\*",
        replacement: Replacement::Wrap {
            open: "<strong class=\"ui-markdown--strong\">",
            close: "</strong>",
        },
        applies_in_light_mode: true,
    },
    Rule {
        kind: RuleKind::Emphasis,
        pattern: r"\*([^*\n]+)\*",
        replacement: Replacement::Wrap {
            open: "<span class=\"ui-markdown--emphasis\">",
            close: "</span>",
        },
        applies_in_light_mode: true,
    },
    Rule {
        kind: RuleKind::Underline,
        pattern: r"_([^_\n]+)_",
        replacement: Replacement::Wrap {
            open: "<span class=\"ui-markdown--underline\">",
            close: "</span>",
        },
        applies_in_light_mode: true,
    },
    Rule {
        kind: RuleKind::Italic,
        pattern: r"~([^~\n]+)~",
        replacement: Replacement::Wrap {
            open: "<span class=\"ui-markdown--italic\">",
            close: "</span>",
        },
        applies_in_light_mode: true,
    },
    Rule {
        // `>` is already `&gt;` here.
        kind: RuleKind::Blockquote,
        pattern: r"(?m)^&gt; ([^\n]+)$",
        replacement: Replacement::Wrap {
            open: "<blockquote>",
            close: "</blockquote>",
        },
        applies_in_light_mode: false,
    },
    Rule {
        kind: RuleKind::Heading,
        pattern: r"(?m)^(#{1,6}) ([^\n]+)$",
        replacement: Replacement::Computed(block::heading),
        applies_in_light_mode: false,
    },
    Rule {
        kind: RuleKind::HorizontalRule,
        pattern: r"(\A|\n\n)--(?=\n\n|\z)",
        replacement: Replacement::Computed(block::horizontal_rule),
        applies_in_light_mode: false,
    },
    Rule {
        kind: RuleKind::UnorderedList,
        pattern: r"(?m)^- [^\n]*(?:\n- [^\n]*)*",
        replacement: Replacement::Computed(block::unordered_list),
        applies_in_light_mode: true,
    },
    Rule {
        // Markers have at most nine digits.
        kind: RuleKind::OrderedList,
        pattern: r"(?m)^[0-9]{1,9}[.)] [^\n]*(?:\n[0-9]{1,9}[.)] [^\n]*)*",
        replacement: Replacement::Computed(block::ordered_list),
        applies_in_light_mode: true,
    },
    Rule {
        kind: RuleKind::InlineCode,
        pattern: r"`([^`\n]+)`",
        replacement: Replacement::Wrap {
            open: "<code>",
            close: "</code>",
        },
        applies_in_light_mode: true,
    },
    Rule {
        kind: RuleKind::Paragraph,
        pattern: r"(?m)^(?!<(?:h|br|blockquote|img|ul|ol))[^\n]+(?:\n(?!<(?:h|br|blockquote|img|ul|ol))[^\n]+)*",
        replacement: Replacement::Computed(block::paragraph),
        applies_in_light_mode: false,
    },
    Rule {
        // `\\` keeps one backslash.
        kind: RuleKind::EscapeCleanup,
        pattern: r"\\(.?)",
        replacement: Replacement::Template("${1}"),
        applies_in_light_mode: false,
    },
];

/// Capture group `i`, or `""` when it did not participate.
#[inline]
pub(crate) fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// A rule with its pattern compiled.
#[derive(Debug)]
pub struct CompiledRule {
    rule: &'static Rule,
    regex: Regex,
}

impl CompiledRule {
    pub fn compile(rule: &'static Rule) -> Result<Self, fancy_regex::Error> {
        let regex = RegexBuilder::new(rule.pattern)
            .backtrack_limit(MAX_BACKTRACK_STEPS)
            .build()?;
        Ok(Self { rule, regex })
    }

    #[inline]
    pub fn rule(&self) -> &'static Rule {
        self.rule
    }

    /// Rewrite every non-overlapping match, left to right.
    ///
    /// Borrows when nothing matched. A regex runtime error (backtrack limit)
    /// stops the rule; the text after the last good match is kept as is.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.rule.kind.respects_tags() {
            return self.apply_outside_tags(text);
        }
        let mut rewrite = Rewrite::new(text);
        for caps in self.regex.captures_iter(text) {
            match caps {
                Ok(caps) => rewrite.replace(&caps, self.rule.replacement),
                Err(_err) => {
                    trace_event!(warn, rule = ?self.rule.kind, error = %_err, "rule stopped early");
                    break;
                }
            }
        }
        rewrite.finish()
    }

    fn apply_outside_tags<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let kind = self.rule.kind;
        let tags = TagSpans::scan(text);
        let mut rewrite = Rewrite::new(text);
        let mut pos = 0;
        while pos < text.len() {
            let caps = match self.regex.captures_from_pos(text, pos) {
                Ok(Some(caps)) => caps,
                Ok(None) => break,
                Err(_err) => {
                    trace_event!(warn, rule = ?kind, error = %_err, "rule stopped early");
                    break;
                }
            };
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            if !tags.is_empty() {
                let touched = tags
                    .end_of_tag_at(whole.start())
                    .or_else(|| tags.end_of_tag_at(inner.end()));
                if let Some(end) = touched {
                    // Every candidate starting before `end` opens or closes in that tag.
                    pos = end;
                    continue;
                }
            }
            let escaped = kind.is_delimiter_pair()
                && (is_escaped(text, whole.start()) || is_escaped(text, inner.end()));
            if !escaped && tags.is_balanced(inner.start(), inner.end()) {
                rewrite.replace(&caps, self.rule.replacement);
                pos = whole.end();
            } else {
                // Delimiters are ASCII, so this stays on a char boundary.
                pos = whole.start() + 1;
            }
        }
        rewrite.finish()
    }
}

/// Output of one rule pass, allocated on the first replacement.
struct Rewrite<'t> {
    text: &'t str,
    out: String,
    last: usize,
    replaced: bool,
}

impl<'t> Rewrite<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            text,
            out: String::new(),
            last: 0,
            replaced: false,
        }
    }

    fn replace(&mut self, caps: &Captures<'_>, replacement: Replacement) {
        let Some(whole) = caps.get(0) else { return };
        if !self.replaced {
            self.out.reserve(self.text.len() + self.text.len() / 4);
            self.replaced = true;
        }
        self.out.push_str(&self.text[self.last..whole.start()]);
        replacement.append(caps, &mut self.out);
        self.last = whole.end();
    }

    fn finish(mut self) -> Cow<'t, str> {
        if !self.replaced {
            return Cow::Borrowed(self.text);
        }
        self.out.push_str(&self.text[self.last..]);
        Cow::Owned(self.out)
    }
}

/// [`RULES`], compiled.
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<CompiledRule>,
}

static GLOBAL: LazyLock<Result<RuleTable, fancy_regex::Error>> = LazyLock::new(RuleTable::compile);

impl RuleTable {
    /// Compile every rule in [`RULES`].
    pub fn compile() -> Result<Self, fancy_regex::Error> {
        let rules = RULES.iter().map(CompiledRule::compile).collect::<Result<_, _>>()?;
        Ok(Self { rules })
    }

    /// The process-wide table, compiled on first use.
    pub fn global() -> Result<&'static Self, &'static fancy_regex::Error> {
        Result::as_ref(&GLOBAL)
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Run every rule that applies to `mode`, in order.
    pub fn apply(&self, mut text: String, mode: Mode) -> String {
        for compiled in self.rules.iter().filter(|c| c.rule.applies_to(mode)) {
            if let Cow::Owned(next) = compiled.apply(&text) {
                trace_event!(
                    trace,
                    rule = ?compiled.rule.kind,
                    before = text.len(),
                    after = next.len(),
                    "rule applied"
                );
                text = next;
            }
        }
        text
    }
}
