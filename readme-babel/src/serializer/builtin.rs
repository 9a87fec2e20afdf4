//! Built-in conversion rules for GitHub READMEs
//!
//! Registered in preference order by [`rules`]. The task-item rule comes first so it wins
//! over the generic list-item conversion.

use super::escape::{escape_link_destination, link_title};
use super::generic::{block, emphasis, fenced_code, list_item_indented, list_marker};
use super::rules::{ConversionRule, NodeContext, RuleSet};
use super::MarkdownSerializer;
use crate::blocks::{Alert, AlertKind, Collapsible, Diagram};
use crate::dom::Element;
use once_cell::sync::Lazy;
use regex::Regex;

static LANGUAGE_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"language-([\w#+-]+)").expect("valid language class pattern"));

/// Inline tags kept as raw HTML because Markdown has no syntax for them.
const INLINE_HTML_TAGS: &[&str] = &["u", "kbd", "sup", "sub"];

/// The built-in rules, in preference order.
pub fn rules() -> RuleSet {
    RuleSet::empty()
        .with_rule(TaskItem)
        .with_rule(Strikethrough)
        .with_rule(InlineHtml)
        .with_rule(HardBreak)
        .with_rule(FencedCode)
        .with_rule(Image)
        .with_rule(AlertBlock)
        .with_rule(Details)
        .with_rule(Summary)
        .with_rule(MermaidBlock)
        .with_rule(Centered)
        .with_rule(Table)
}

/// `li` with a checkbox (or an editor task item): `- [ ] text` / `- [x] text`.
pub struct TaskItem;

impl TaskItem {
    fn is_checkbox(el: &Element) -> bool {
        el.is("input")
            && el
                .attr("type")
                .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
    }

    /// The item's own leading checkbox: its first child element, or the first child element
    /// of a leading `<p>` / `<label>`. Checkboxes of nested lists never count.
    fn checkbox(el: &Element) -> Option<&Element> {
        let first = el.child_elements().next()?;
        if Self::is_checkbox(first) {
            return Some(first);
        }
        if first.is_any(&["p", "label"]) {
            return first.child_elements().next().filter(|e| Self::is_checkbox(e));
        }
        None
    }

    fn is_checked(el: &Element) -> bool {
        match Self::checkbox(el).and_then(|input| input.attr("checked")) {
            Some(value) => !value.eq_ignore_ascii_case("false"),
            None => el.attr("data-checked") == Some("true"),
        }
    }
}

impl ConversionRule for TaskItem {
    fn name(&self) -> &'static str {
        "task-item"
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        let el = ctx.element;
        el.is("li")
            && (el.attr("data-type") == Some("taskItem") || Self::checkbox(el).is_some())
    }

    fn replacement(
        &self,
        content: &str,
        ctx: &NodeContext<'_>,
        serializer: &MarkdownSerializer,
    ) -> String {
        let check = if Self::is_checked(ctx.element) { "x" } else { " " };
        let bullet = list_marker(ctx, serializer);
        let marker = format!("{bullet}[{check}] ");
        list_item_indented(&marker, bullet.chars().count(), content, ctx)
    }
}

/// `<del>`, `<s>`, `<strike>`: `~~text~~`.
pub struct Strikethrough;

impl ConversionRule for Strikethrough {
    fn name(&self) -> &'static str {
        "strikethrough"
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        ctx.element.is_any(&["del", "s", "strike"])
    }

    fn replacement(&self, content: &str, _: &NodeContext<'_>, _: &MarkdownSerializer) -> String {
        emphasis(content, "~~")
    }
}

/// `<u>` and friends stay as inline HTML.
pub struct InlineHtml;

impl ConversionRule for InlineHtml {
    fn name(&self) -> &'static str {
        "inline-html"
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        ctx.element.is_any(INLINE_HTML_TAGS)
    }

    fn replacement(&self, content: &str, ctx: &NodeContext<'_>, _: &MarkdownSerializer) -> String {
        if content.is_empty() {
            return String::new();
        }
        let tag = &ctx.element.tag;
        format!("<{tag}>{content}</{tag}>")
    }
}

/// `<br>`: two trailing spaces and a newline.
pub struct HardBreak;

impl ConversionRule for HardBreak {
    fn name(&self) -> &'static str {
        "hard-break"
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        ctx.element.is("br")
    }

    fn replacement(&self, _: &str, _: &NodeContext<'_>, _: &MarkdownSerializer) -> String {
        "  \n".to_string()
    }
}

/// `<pre>` with a `<code>` child (or a highlight.js block): fenced code with language.
pub struct FencedCode;

impl FencedCode {
    fn code(el: &Element) -> Option<&Element> {
        el.child_elements().find(|child| child.is("code"))
    }

    /// `data-language` on the code element, then on the `pre`, then a `language-xxx` class.
    fn language(pre: &Element) -> Option<String> {
        let code = Self::code(pre);
        code.and_then(|c| c.attr("data-language"))
            .or_else(|| pre.attr("data-language"))
            .filter(|lang| !lang.trim().is_empty())
            .map(|lang| lang.trim().to_string())
            .or_else(|| {
                let class = code?.attr("class")?;
                LANGUAGE_CLASS
                    .captures(class)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str().to_string())
            })
    }
}

impl ConversionRule for FencedCode {
    fn name(&self) -> &'static str {
        "fenced-code"
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        let el = ctx.element;
        el.is("pre") && (Self::code(el).is_some() || el.has_class("hljs"))
    }

    fn replacement(
        &self,
        _: &str,
        ctx: &NodeContext<'_>,
        serializer: &MarkdownSerializer,
    ) -> String {
        let pre = ctx.element;
        let source = Self::code(pre).unwrap_or(pre);
        let language = Self::language(pre);
        fenced_code(
            source,
            language.as_deref(),
            serializer.options().fence_char,
        )
    }
}

/// `<img>`: `![alt](src "title")`.
pub struct Image;

impl ConversionRule for Image {
    fn name(&self) -> &'static str {
        "image"
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        ctx.element.is("img")
    }

    fn replacement(&self, _: &str, ctx: &NodeContext<'_>, _: &MarkdownSerializer) -> String {
        let el = ctx.element;
        let src = el.attr("src").map(str::trim).unwrap_or("");
        let alt = el
            .attr("alt")
            .unwrap_or("")
            .replace(['\r', '\n'], " ")
            .replace('[', "\\[")
            .replace(']', "\\]");
        if src.is_empty() {
            return format!("![{alt}]()");
        }
        format!(
            "![{alt}]({}{})",
            escape_link_destination(src),
            link_title(el.attr("title"))
        )
    }
}

/// Alert blockquotes (tagged by the renderer, or still carrying their marker) and editor
/// alert containers: `> [!TYPE]` followed by the quoted body.
pub struct AlertBlock;

impl AlertBlock {
    fn kind(el: &Element) -> Option<AlertKind> {
        let tagged = el.has_class("github-alert") || el.is("blockquote");
        if !tagged {
            return None;
        }
        if let Some(kind) = el.attr("data-type").and_then(|t| t.parse().ok()) {
            return Some(kind);
        }
        if let Some(kind) = el
            .classes()
            .filter_map(|class| class.strip_prefix("github-alert-"))
            .find_map(|kind| kind.parse().ok())
        {
            return Some(kind);
        }
        if el.is("blockquote") {
            return AlertKind::detect(&el.text_content());
        }
        None
    }
}

impl ConversionRule for AlertBlock {
    fn name(&self) -> &'static str {
        "alert"
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        ctx.element.is_any(&["blockquote", "div"]) && Self::kind(ctx.element).is_some()
    }

    fn replacement(&self, content: &str, ctx: &NodeContext<'_>, _: &MarkdownSerializer) -> String {
        let Some(kind) = Self::kind(ctx.element) else {
            return block(content);
        };
        let body = AlertKind::strip_marker(content.trim_matches('\n'));
        block(&Alert::new(kind, body).to_markdown())
    }
}

/// `<details>`: the collapsible idiom, body converted as Markdown.
pub struct Details;

impl ConversionRule for Details {
    fn name(&self) -> &'static str {
        "details"
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        ctx.element.is("details")
    }

    fn replacement(&self, content: &str, ctx: &NodeContext<'_>, _: &MarkdownSerializer) -> String {
        let el = ctx.element;
        let summary = el
            .child_elements()
            .find(|child| child.is("summary"))
            .map(|summary| summary.text_content())
            .unwrap_or_default();
        let summary = summary.split_whitespace().collect::<Vec<_>>().join(" ");
        let collapsible = Collapsible::new(summary, content.trim()).opened(el.has_attr("open"));
        block(&collapsible.to_markdown())
    }
}

/// `<summary>` inside `<details>` is emitted by the details rule.
pub struct Summary;

impl ConversionRule for Summary {
    fn name(&self) -> &'static str {
        "summary"
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        ctx.element.is("summary") && ctx.parent_is("details")
    }

    fn replacement(&self, _: &str, _: &NodeContext<'_>, _: &MarkdownSerializer) -> String {
        String::new()
    }
}

/// Editor diagram nodes (`data-type="mermaid"` with the source in `data-code`).
pub struct MermaidBlock;

impl ConversionRule for MermaidBlock {
    fn name(&self) -> &'static str {
        "mermaid"
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        let el = ctx.element;
        el.attr("data-type") == Some("mermaid") && el.has_attr("data-code")
    }

    fn replacement(&self, _: &str, ctx: &NodeContext<'_>, _: &MarkdownSerializer) -> String {
        let code = ctx.element.attr("data-code").unwrap_or("");
        block(&Diagram::new(code).to_markdown())
    }
}

/// Centered `<div>` / `<p>` (`align="center"` or `text-align: center`).
pub struct Centered;

impl Centered {
    fn is_centered(el: &Element) -> bool {
        el.attr("align")
            .is_some_and(|align| align.trim().eq_ignore_ascii_case("center"))
            || el
                .style("text-align")
                .is_some_and(|align| align.eq_ignore_ascii_case("center"))
    }
}

impl ConversionRule for Centered {
    fn name(&self) -> &'static str {
        "centered"
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        ctx.element.is_any(&["div", "p"]) && Self::is_centered(ctx.element)
    }

    fn replacement(&self, content: &str, _: &NodeContext<'_>, _: &MarkdownSerializer) -> String {
        let content = content.trim();
        if content.is_empty() {
            return String::new();
        }
        format!("\n\n<div align=\"center\">\n\n{content}\n\n</div>\n\n")
    }
}

/// GFM pipe tables. The first row is the header; alignment comes from `align` or
/// `text-align` on its cells.
pub struct Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    fn of(cell: &Element) -> Self {
        let value = cell
            .attr("align")
            .map(str::to_string)
            .or_else(|| cell.style("text-align"))
            .unwrap_or_default();
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Alignment::Left,
            "center" => Alignment::Center,
            "right" => Alignment::Right,
            _ => Alignment::None,
        }
    }

    fn border(&self) -> &'static str {
        match self {
            Alignment::None => "---",
            Alignment::Left => ":---",
            Alignment::Center => ":---:",
            Alignment::Right => "---:",
        }
    }
}

impl Table {
    fn rows(table: &Element) -> Vec<&Element> {
        let mut rows = Vec::new();
        for child in table.child_elements() {
            if child.is("tr") {
                rows.push(child);
            } else if child.is_any(&["thead", "tbody", "tfoot"]) {
                rows.extend(child.child_elements().filter(|row| row.is("tr")));
            }
        }
        rows
    }

    fn cells(row: &Element) -> Vec<&Element> {
        row.child_elements()
            .filter(|cell| cell.is_any(&["th", "td"]))
            .collect()
    }

    fn cell_text(cell: &Element, serializer: &MarkdownSerializer) -> String {
        serializer
            .convert_children(cell)
            .trim()
            .replace("  \n", " ")
            .replace('\n', " ")
            .replace('|', "\\|")
    }

    /// The pipe table for `table`'s rows; the first row is the header.
    fn grid(table: &Element, serializer: &MarkdownSerializer) -> Option<String> {
        let rows = Self::rows(table);
        let header = rows.first()?;
        let width = rows
            .iter()
            .map(|row| Self::cells(row).len())
            .max()
            .unwrap_or(0);
        if width == 0 {
            return None;
        }

        let header_cells = Self::cells(header);
        let borders: Vec<String> = (0..width)
            .map(|i| {
                header_cells
                    .get(i)
                    .map(|cell| Alignment::of(cell))
                    .unwrap_or(Alignment::None)
                    .border()
                    .to_string()
            })
            .collect();

        let mut lines = Vec::with_capacity(rows.len() + 1);
        for (i, row) in rows.iter().enumerate() {
            let texts: Vec<String> = Self::cells(row)
                .iter()
                .map(|cell| Self::cell_text(cell, serializer))
                .collect();
            lines.push(Self::format_row(&texts, width));
            if i == 0 {
                lines.push(Self::format_row(&borders, width));
            }
        }
        Some(lines.join("\n"))
    }

    fn format_row(cells: &[String], width: usize) -> String {
        let mut line = String::from("|");
        for i in 0..width {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            line.push(' ');
            line.push_str(cell);
            line.push_str(" |");
        }
        line
    }
}

impl ConversionRule for Table {
    fn name(&self) -> &'static str {
        "table"
    }

    fn matches(&self, ctx: &NodeContext<'_>) -> bool {
        ctx.element.is("table")
    }

    fn replacement(
        &self,
        _: &str,
        ctx: &NodeContext<'_>,
        serializer: &MarkdownSerializer,
    ) -> String {
        let caption = ctx
            .element
            .child_elements()
            .find(|child| child.is("caption"))
            .map(|caption| serializer.convert_children(caption).trim().to_string())
            .filter(|text| !text.is_empty());
        let table = Self::grid(ctx.element, serializer);
        match (caption, table) {
            (Some(caption), Some(table)) => format!("\n\n{caption}\n\n{table}\n\n"),
            (Some(caption), None) => format!("\n\n{caption}\n\n"),
            (None, Some(table)) => format!("\n\n{table}\n\n"),
            (None, None) => String::new(),
        }
    }
}
