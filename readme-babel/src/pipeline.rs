//! The assembled conversion pipeline
//!
//! A [`Pipeline`] owns everything a conversion needs: the renderer (with its options and the
//! rendered sanitize policy), the Markdown serializer (with its rule set), the paste policy
//! and the routing options. It is built once and never mutated afterwards, so a single
//! instance can be shared freely between threads.

use crate::classify::{classify, ContentKind};
use crate::dom;
use crate::error::RenderDegraded;
use crate::paste::{self, Clipboard, PasteOptions};
use crate::render::{RenderOptions, Renderer};
use crate::sanitize::{sanitize, PolicyKind, SanitizePolicy};
use crate::serializer::{MarkdownSerializer, SerializeOptions};
use once_cell::sync::Lazy;
use regex::Regex;

/// Markdown constructs that give away Markdown pasted or saved as HTML text.
static MARKDOWN_SYNTAX: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"!\[[^\]]*\]\([^)]+\)",
        r"\[[^\]]+\]\([^)]+\)",
        r"\*\*[^*\n]+\*\*",
        r"(?m)^#{1,6}\s+\S",
        r"(?m)^\s*(```|~~~)",
        r"(?m)^\s*([-*+]|\d+\.)\s+\S",
        r"(?m)^>\s?",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("valid markdown syntax pattern"))
    .collect()
});

/// Whether `text` carries recognizable Markdown syntax.
pub fn looks_like_markdown(text: &str) -> bool {
    MARKDOWN_SYNTAX.iter().any(|pattern| pattern.is_match(text))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Render the text of imported HTML as Markdown when it looks like Markdown.
    pub detect_markdown_in_html: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            detect_markdown_in_html: true,
        }
    }
}

/// Every option a pipeline is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub render: RenderOptions,
    pub serialize: SerializeOptions,
    pub paste: PasteOptions,
    pub import: ImportOptions,
}

/// How [`Pipeline::import`] treated its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportRoute {
    /// Plain Markdown, rendered.
    Markdown,
    /// Markdown carrying inline HTML blocks (`<details>`, `<div align>`), rendered as is.
    MarkdownWithHtml,
    /// HTML whose text is Markdown; the text is rendered.
    MarkdownInHtml,
    /// HTML, sanitized with the paste policy.
    Html,
}

/// Whether the fragment has non-blank text outside any element.
fn has_top_level_text(root: &dom::Element) -> bool {
    root.children.iter().any(|node| match node {
        dom::Node::Text(text) => !text.trim().is_empty(),
        _ => false,
    })
}

#[derive(Debug)]
pub struct Pipeline {
    renderer: Renderer,
    serializer: MarkdownSerializer,
    paste_policy: SanitizePolicy,
    paste: PasteOptions,
    import: ImportOptions,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            renderer: Renderer::new(options.render),
            serializer: MarkdownSerializer::with_options(options.serialize),
            paste_policy: SanitizePolicy::paste(),
            paste: options.paste,
            import: options.import,
        }
    }

    /// Replace the serializer, e.g. one built with a custom rule set.
    pub fn with_serializer(mut self, serializer: MarkdownSerializer) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn serializer(&self) -> &MarkdownSerializer {
        &self.serializer
    }

    pub fn classify(&self, input: &str) -> ContentKind {
        classify(input)
    }

    pub fn render(&self, markdown: &str) -> Result<String, RenderDegraded> {
        self.renderer.render(markdown)
    }

    pub fn render_markdown(&self, markdown: &str) -> String {
        self.renderer.render_markdown(markdown)
    }

    pub fn serialize(&self, html: &str) -> String {
        self.serializer.serialize(html)
    }

    pub fn policy(&self, kind: PolicyKind) -> &SanitizePolicy {
        match kind {
            PolicyKind::Paste => &self.paste_policy,
            PolicyKind::Rendered | PolicyKind::Custom => self.renderer.policy(),
        }
    }

    pub fn sanitize(&self, html: &str, kind: PolicyKind) -> String {
        sanitize(html, self.policy(kind))
    }

    pub fn route_paste(&self, clipboard: &Clipboard) -> String {
        paste::route_paste(clipboard, &self.renderer, &self.paste_policy, &self.paste)
    }

    /// How `input` would be imported.
    pub fn import_route(&self, input: &str) -> ImportRoute {
        match classify(input) {
            ContentKind::Markdown => ImportRoute::Markdown,
            ContentKind::Html if !self.import.detect_markdown_in_html => ImportRoute::Html,
            ContentKind::Html => {
                let root = dom::parse_fragment(input);
                if !looks_like_markdown(&root.inner_text()) {
                    ImportRoute::Html
                } else if has_top_level_text(&root) {
                    ImportRoute::MarkdownWithHtml
                } else {
                    ImportRoute::MarkdownInHtml
                }
            }
        }
    }

    /// Import content of unknown origin (a file, a drop, a fetched README) as editor HTML.
    pub fn import(&self, input: &str) -> String {
        let route = self.import_route(input);
        tracing::debug!(?route, len = input.len(), "importing content");
        match route {
            ImportRoute::Markdown | ImportRoute::MarkdownWithHtml => self.render_markdown(input),
            ImportRoute::MarkdownInHtml => {
                let text = dom::parse_fragment(input).inner_text();
                self.render_markdown(&text)
            }
            ImportRoute::Html => sanitize(input, &self.paste_policy),
        }
    }

    /// Render then serialize: the Markdown an editing session would persist for `markdown`.
    pub fn normalize(&self, markdown: &str) -> String {
        self.serialize(&self.render_markdown(markdown))
    }

    /// Whether `markdown` survives a second render / serialize cycle unchanged.
    pub fn is_round_trip_stable(&self, markdown: &str) -> bool {
        let once = self.normalize(markdown);
        let twice = self.normalize(&once);
        if once != twice {
            tracing::debug!(%once, %twice, "round trip is not stable");
        }
        once == twice
    }
}
