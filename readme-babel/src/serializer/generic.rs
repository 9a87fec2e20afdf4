//! Generic element conversion
//!
//! Everything a rule does not claim ends up here: headings, paragraphs, emphasis, inline
//! code, links, lists, blockquotes, rules and plain block containers. Unknown elements fall
//! through to their children's content.

use super::escape::{code_span, escape_link_destination, fence_for, link_title};
use super::{MarkdownSerializer, NodeContext};
use crate::dom::{self, Element};

/// Elements dropped together with their content.
const DISCARDED: &[&str] = &[
    "script", "style", "head", "title", "meta", "link", "noscript", "template", "input",
    "button", "select", "textarea",
];

pub fn replacement(
    content: &str,
    ctx: &NodeContext<'_>,
    serializer: &MarkdownSerializer,
) -> String {
    let el = ctx.element;
    match el.tag.as_str() {
        tag if DISCARDED.contains(&tag) => String::new(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => heading(content, el),
        "p" => block(content),
        "hr" => "\n\n---\n\n".to_string(),
        "br" => "  \n".to_string(),
        "em" | "i" => emphasis(content, "*"),
        "strong" | "b" => emphasis(content, "**"),
        "code" | "kbd" | "samp" | "tt" if !ctx.parent_is("pre") => inline_code(el),
        "a" => link(content, el),
        "blockquote" => blockquote(content),
        "ul" | "ol" => list(content, ctx),
        "li" => {
            let marker = list_marker(ctx, serializer);
            list_item(&marker, content, ctx)
        }
        "pre" => fenced_code(el, None, serializer.options().fence_char),
        tag if dom::is_block(tag) => block(content),
        _ => content.to_string(),
    }
}

/// A block wrapped in blank lines; empty blocks vanish.
pub fn block(content: &str) -> String {
    let content = content.trim();
    if content.is_empty() {
        String::new()
    } else {
        format!("\n\n{content}\n\n")
    }
}

fn heading(content: &str, el: &Element) -> String {
    let level = el.tag[1..].parse::<usize>().unwrap_or(1).clamp(1, 6);
    let text = content.trim().replace("  \n", " ").replace('\n', " ");
    if text.is_empty() {
        return String::new();
    }
    format!("\n\n{} {text}\n\n", "#".repeat(level))
}

/// Wrap `content` in `delimiter`, moving flanking whitespace outside the delimiters.
pub fn emphasis(content: &str, delimiter: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return if content.is_empty() {
            String::new()
        } else {
            " ".to_string()
        };
    }
    let leading = if content.starts_with(char::is_whitespace) {
        " "
    } else {
        ""
    };
    let trailing = if content.ends_with(char::is_whitespace) {
        " "
    } else {
        ""
    };
    format!("{leading}{delimiter}{trimmed}{delimiter}{trailing}")
}

fn inline_code(el: &Element) -> String {
    let text = el.text_content();
    if text.is_empty() {
        return String::new();
    }
    code_span(&text)
}

fn link(content: &str, el: &Element) -> String {
    let text = content.trim();
    match el.attr("href").map(str::trim) {
        Some(href) if !href.is_empty() && !text.is_empty() => format!(
            "[{text}]({}{})",
            escape_link_destination(href),
            link_title(el.attr("title"))
        ),
        _ => content.to_string(),
    }
}

fn blockquote(content: &str) -> String {
    let content = content.trim_matches('\n').trim_end();
    if content.is_empty() {
        return String::new();
    }
    format!("\n\n{}\n\n", quote_lines(content))
}

/// Prefix every line with `> ` (bare `>` for blank lines).
pub fn quote_lines(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn list(content: &str, ctx: &NodeContext<'_>) -> String {
    if ctx.parent_is("li") && ctx.is_last_element() {
        format!("\n{}", content.trim_end_matches('\n'))
    } else {
        format!("\n\n{}\n\n", content.trim_matches('\n'))
    }
}

/// `- ` for bullets, `N. ` for ordered lists (honoring `start`).
pub fn list_marker(ctx: &NodeContext<'_>, serializer: &MarkdownSerializer) -> String {
    match ctx.parent {
        Some(parent) if parent.is("ol") => {
            let start = parent
                .attr("start")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .unwrap_or(1);
            format!("{}. ", start + ctx.element_index())
        }
        _ => format!("{} ", serializer.options().bullet_marker),
    }
}

/// Format one list item: `marker` then the content, continuation lines indented to the
/// marker's width.
pub fn list_item(marker: &str, content: &str, ctx: &NodeContext<'_>) -> String {
    list_item_indented(marker, marker.chars().count(), content, ctx)
}

/// A list item whose continuation lines are indented by `indent` columns.
pub fn list_item_indented(
    marker: &str,
    indent: usize,
    content: &str,
    ctx: &NodeContext<'_>,
) -> String {
    let content = content.trim_start().trim_end();
    let indent = " ".repeat(indent);
    let body = content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    let trailing = if ctx.next_element().is_some() { "\n" } else { "" };
    let marker = if body.is_empty() {
        marker.trim_end()
    } else {
        marker
    };
    format!("{marker}{body}{trailing}")
}

/// A fenced code block holding `el`'s text verbatim.
pub fn fenced_code(el: &Element, language: Option<&str>, fence_char: char) -> String {
    let code = el.text_content();
    let code = code.trim_end();
    let fence = fence_for(code, fence_char);
    let language = language.unwrap_or("");
    format!("\n\n{fence}{language}\n{code}\n{fence}\n\n")
}
