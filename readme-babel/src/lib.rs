//! Bidirectional Markdown / HTML conversion for GitHub READMEs
//!
//!     This crate keeps the two representations of a README in step: the rich HTML an editing
//!     surface displays and the Markdown string that gets persisted. It is a pure lib, that
//!     is, it powers readme-cli but is shell agnostic: no code here supposes a shell
//!     environment, be it std print, env vars etc.
//!
//!     TLDR:
//!         - Markdown → HTML goes through `comrak`, then through passes over a small owned node
//!           tree, then through the sanitizer. See ./render/mod.rs.
//!         - HTML → Markdown walks the same node tree with an ordered rule set and a generic
//!           fallback. See ./serializer/mod.rs.
//!         - Every piece of HTML that leaves this crate has been through ./sanitize.rs.
//!         - Public conversion functions are total: they degrade, they never fail.
//!
//! Architecture
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── classify.rs             # HTML vs Markdown detection
//!     ├── sanitize.rs             # allow-list policies (ammonia)
//!     ├── dom                     # owned node model, html5ever parse / serialize
//!     ├── render                  # Markdown → HTML
//!     │   ├── preprocess.rs       # source rewrites before comrak
//!     │   └── postprocess.rs      # passes over the rendered tree
//!     ├── serializer              # HTML → Markdown
//!     │   ├── rules.rs            # ConversionRule, RuleSet
//!     │   ├── builtin.rs          # task items, code fences, alerts, tables ...
//!     │   ├── generic.rs          # fallback conversion
//!     │   └── escape.rs
//!     ├── blocks                  # badge, alert, collapsible, diagram models
//!     ├── paste.rs                # clipboard routing
//!     ├── pipeline.rs             # everything assembled, plus import
//!     ├── inspect.rs              # README block report
//!     └── document.rs             # the two representations held together
//!
//!     Neither conversion direction touches a parser's DOM. Both work on dom::Element, and
//!     html5ever is confined to ./dom/parser.rs and ./dom/serializer.rs. That keeps rules and
//!     passes testable from plain values.
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     └── <area>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Round Trips
//!
//!     Only the syntax a README editor produces is guaranteed to round-trip: headings, emphasis,
//!     lists and task lists, tables, fenced code, badges, alerts, collapsible sections,
//!     diagrams and centered blocks. The guarantee is stability, not identity: the first
//!     render / serialize cycle may normalize (loose lists tighten, `*` bullets become `-`),
//!     every cycle after that is a fixed point.
//!
//!     Full CommonMark compliance is not a goal.
//!
pub mod blocks;
pub mod classify;
pub mod document;
pub mod dom;
pub mod error;
pub mod inspect;
pub mod paste;
pub mod pipeline;
pub mod render;
pub mod sanitize;
pub mod serializer;

pub use classify::{classify, ContentKind};
pub use document::Document;
pub use error::{BabelError, RenderDegraded};
pub use inspect::Inspection;
pub use paste::{Clipboard, PasteOptions};
pub use pipeline::{ImportOptions, ImportRoute, Pipeline, PipelineOptions};
pub use render::{CodeBlockStyle, RenderOptions, Renderer};
pub use sanitize::{sanitize, PolicyKind, SanitizePolicy};
pub use serializer::{MarkdownSerializer, SerializeOptions};

use once_cell::sync::Lazy;

static DEFAULT_PIPELINE: Lazy<Pipeline> = Lazy::new(Pipeline::default);

/// The pipeline behind the free functions below, built with default options.
pub fn default_pipeline() -> &'static Pipeline {
    &DEFAULT_PIPELINE
}

/// Renders Markdown to sanitized HTML.
///
/// Fails only when the base conversion panics or the rendered tree cannot be written back;
/// the error carries the original input.
pub fn render(markdown: &str) -> Result<String, RenderDegraded> {
    DEFAULT_PIPELINE.render(markdown)
}

/// Renders Markdown to sanitized HTML, falling back to the original Markdown on failure.
pub fn render_markdown(markdown: &str) -> String {
    DEFAULT_PIPELINE.render_markdown(markdown)
}

/// Serializes HTML to Markdown with the built-in rules.
pub fn serialize_to_markdown(html: &str) -> String {
    DEFAULT_PIPELINE.serialize(html)
}

/// HTML to insert for a paste.
pub fn route_paste(clipboard: &Clipboard) -> String {
    DEFAULT_PIPELINE.route_paste(clipboard)
}

/// Imports content of unknown origin as editor HTML.
pub fn import(input: &str) -> String {
    DEFAULT_PIPELINE.import(input)
}
