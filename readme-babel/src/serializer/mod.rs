//! HTML → Markdown serialization
//!
//!     The serializer walks the node model depth first. Children are converted before their
//!     parent, then the parent's replacement is chosen: the first matching rule of the
//!     serializer's [`RuleSet`], or the generic conversion (see [`generic`]) when nothing
//!     matches.
//!
//!     Replacements signal block boundaries with leading / trailing newlines. Joining two
//!     replacements collapses the newlines at the seam to at most a blank line, so rules never
//!     need to know what comes before or after them.
//!
//!     Whitespace follows the browser model: runs collapse to one space, and whitespace next to
//!     a block boundary disappears. Text inside `<pre>` is taken verbatim by the code rules.
//!
//!     Output conventions: ATX headings, `-` bullets, `**bold**`, `*italic*`, `---` rules and
//!     backtick fences. Bullet marker and fence character are configurable.

pub mod builtin;
pub mod escape;
pub mod generic;
pub mod rules;

pub use rules::{ConversionRule, FnRule, NodeContext, RuleSet};

use crate::dom::{self, Element, Node};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\r\n\x0C]+").expect("valid whitespace pattern"));

/// Serializer output knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Bullet for unordered list items: `-`, `*` or `+`.
    pub bullet_marker: char,
    /// Code fence character: `` ` `` or `~`.
    pub fence_char: char,
    /// Escape Markdown-significant characters in text nodes.
    pub escape_text: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            bullet_marker: '-',
            fence_char: '`',
            escape_text: true,
        }
    }
}

/// Converts HTML (or an already parsed tree) to Markdown with a fixed rule set.
#[derive(Debug)]
pub struct MarkdownSerializer {
    rules: RuleSet,
    options: SerializeOptions,
}

impl Default for MarkdownSerializer {
    fn default() -> Self {
        Self::new(RuleSet::builtin(), SerializeOptions::default())
    }
}

impl MarkdownSerializer {
    pub fn new(rules: RuleSet, options: SerializeOptions) -> Self {
        Self { rules, options }
    }

    pub fn with_options(options: SerializeOptions) -> Self {
        Self::new(RuleSet::builtin(), options)
    }

    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Serialize an HTML fragment. Deterministic for a given tree shape; never fails.
    pub fn serialize(&self, html: &str) -> String {
        let root = dom::parse_fragment(html);
        let markdown = self.serialize_element(&root);
        tracing::debug!(
            html_len = html.len(),
            markdown_len = markdown.len(),
            "serialized html to markdown"
        );
        markdown
    }

    /// Serialize the children of `root`.
    pub fn serialize_element(&self, root: &Element) -> String {
        finish(&self.convert_children(root))
    }

    /// Convert the children of `element` and join them. Rules use this to convert sub-trees
    /// (table cells, summaries) on their own.
    pub fn convert_children(&self, element: &Element) -> String {
        let mut output = String::new();
        for (index, child) in element.children.iter().enumerate() {
            let replacement = match child {
                Node::Element(child_el) => {
                    self.convert_element(&NodeContext::new(child_el, Some(element), index))
                }
                Node::Text(text) => self.convert_text(text, element, index),
                Node::Comment(_) => continue,
            };
            output = join(&output, &replacement);
        }
        output
    }

    fn convert_element(&self, ctx: &NodeContext<'_>) -> String {
        let content = self.convert_children(ctx.element);
        match self.rules.find(ctx) {
            Some(rule) => {
                tracing::trace!(rule = rule.name(), tag = %ctx.element.tag, "conversion rule");
                rule.replacement(&content, ctx, self)
            }
            None => generic::replacement(&content, ctx, self),
        }
    }

    fn convert_text(&self, text: &str, parent: &Element, index: usize) -> String {
        let collapsed = WHITESPACE_RUN.replace_all(text, " ");
        let prev = index.checked_sub(1).and_then(|i| parent.children.get(i));
        let next = parent.children.get(index + 1);
        let parent_is_block = dom::is_block(&parent.tag);

        let after_boundary = match prev {
            Some(node) => breaks_line(node),
            None => parent_is_block,
        };
        let before_boundary = match next {
            Some(node) => node.as_element().is_some_and(|el| dom::is_block(&el.tag)),
            None => parent_is_block,
        };

        let mut text: &str = &collapsed;
        if after_boundary {
            text = text.trim_start_matches(' ');
        }
        if before_boundary {
            text = text.trim_end_matches(' ');
        }
        if text.is_empty() {
            return String::new();
        }
        if self.options.escape_text {
            escape::escape_text(text)
        } else {
            text.to_string()
        }
    }
}

/// Whether `node` ends a line, so whitespace after it is insignificant.
fn breaks_line(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|el| el.is("br") || dom::is_block(&el.tag))
}

/// Join two replacements, collapsing the newlines at the seam to at most two.
pub(crate) fn join(output: &str, replacement: &str) -> String {
    let head = output.trim_end_matches('\n');
    let tail = replacement.trim_start_matches('\n');
    let trailing = output.len() - head.len();
    let leading = replacement.len() - tail.len();

    let head = if leading > 0 {
        head.trim_end_matches([' ', '\t'])
    } else {
        head
    };
    let tail = if trailing > 0 || leading > 0 {
        tail.trim_start_matches([' ', '\t'])
    } else {
        tail
    };
    let separator = "\n".repeat(trailing.max(leading).min(2));
    format!("{head}{separator}{tail}")
}

/// Final cleanup: no leading or trailing blank space.
fn finish(markdown: &str) -> String {
    markdown
        .trim_start_matches(['\n', '\r', '\t'])
        .trim_end()
        .to_string()
}
