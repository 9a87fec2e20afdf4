//! Paste routing
//!
//! Decides what a clipboard paste inserts into the editor. Plain text wins by default and is
//! rendered as Markdown, even when the clipboard also carries HTML: READMEs are mostly pasted
//! from other Markdown sources, and the HTML flavor browsers attach to copied text is noisy.
//! HTML alone is sanitized with the narrow paste policy and never run through Markdown.

use crate::render::Renderer;
use crate::sanitize::{sanitize, SanitizePolicy};
use serde::{Deserialize, Serialize};

/// The two clipboard flavors the editor reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clipboard {
    pub html: Option<String>,
    pub text: Option<String>,
}

impl Clipboard {
    pub fn new(text: Option<String>, html: Option<String>) -> Self {
        Self { html, text }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Some(text.into()), None)
    }

    pub fn html(html: impl Into<String>) -> Self {
        Self::new(None, Some(html.into()))
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn non_empty(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteOptions {
    /// Use the plain-text flavor whenever it is present.
    pub prefer_plain_text: bool,
}

impl Default for PasteOptions {
    fn default() -> Self {
        Self {
            prefer_plain_text: true,
        }
    }
}

/// Which clipboard flavor a paste used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PasteSource {
    Text,
    Html,
    Empty,
}

/// Pick the flavor to insert according to `options`.
pub fn paste_source(clipboard: &Clipboard, options: &PasteOptions) -> PasteSource {
    let text = Clipboard::non_empty(&clipboard.text).is_some();
    let html = Clipboard::non_empty(&clipboard.html).is_some();
    match (text, html) {
        (true, true) if options.prefer_plain_text => PasteSource::Text,
        (true, true) => PasteSource::Html,
        (true, false) => PasteSource::Text,
        (false, true) => PasteSource::Html,
        (false, false) => PasteSource::Empty,
    }
}

/// HTML to insert for `clipboard`. Never fails; an empty clipboard inserts nothing.
pub fn route_paste(
    clipboard: &Clipboard,
    renderer: &Renderer,
    policy: &SanitizePolicy,
    options: &PasteOptions,
) -> String {
    let source = paste_source(clipboard, options);
    tracing::debug!(?source, "routing paste");
    match source {
        PasteSource::Text => {
            let text = Clipboard::non_empty(&clipboard.text).unwrap_or_default();
            renderer.render_markdown(text)
        }
        PasteSource::Html => {
            let html = Clipboard::non_empty(&clipboard.html).unwrap_or_default();
            sanitize(html, policy)
        }
        PasteSource::Empty => String::new(),
    }
}
