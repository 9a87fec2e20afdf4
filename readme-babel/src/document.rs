//! A README held in both of its representations
//!
//! The rich side is the HTML the editing surface displays; the Markdown side is what gets
//! persisted. Every edit goes through [`Document::apply_edit`], which re-serializes, so after
//! each edit the Markdown is exactly what the rich tree serializes to.

use crate::pipeline::Pipeline;
use crate::sanitize::PolicyKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    rich: String,
    markdown: String,
}

impl Document {
    /// Load Markdown. The Markdown is kept as written; the rich side is its rendering.
    pub fn from_markdown(markdown: impl Into<String>, pipeline: &Pipeline) -> Self {
        let markdown = markdown.into();
        let rich = pipeline.render_markdown(&markdown);
        Self { rich, markdown }
    }

    /// Load HTML from a trusted editor state. The rich side is sanitized with the rendered
    /// policy and the Markdown derived from it.
    pub fn from_html(html: &str, pipeline: &Pipeline) -> Self {
        let rich = pipeline.sanitize(html, PolicyKind::Rendered);
        let markdown = pipeline.serialize(&rich);
        Self { rich, markdown }
    }

    /// Load content of unknown origin through the import route.
    pub fn import(input: &str, pipeline: &Pipeline) -> Self {
        let rich = pipeline.import(input);
        let markdown = pipeline.serialize(&rich);
        Self { rich, markdown }
    }

    pub fn rich(&self) -> &str {
        &self.rich
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Replace the rich side after an edit and re-derive the Markdown. Returns whether the
    /// Markdown changed.
    pub fn apply_edit(&mut self, html: &str, pipeline: &Pipeline) -> bool {
        self.rich = pipeline.sanitize(html, PolicyKind::Rendered);
        let markdown = pipeline.serialize(&self.rich);
        let changed = markdown != self.markdown;
        self.markdown = markdown;
        changed
    }

    /// Whether the persisted Markdown round-trips unchanged through render and serialize.
    pub fn is_round_trip_stable(&self, pipeline: &Pipeline) -> bool {
        pipeline.serialize(&self.rich) == pipeline.normalize(&self.markdown)
            && pipeline.is_round_trip_stable(&self.markdown)
    }

    pub fn into_parts(self) -> (String, String) {
        (self.rich, self.markdown)
    }
}
