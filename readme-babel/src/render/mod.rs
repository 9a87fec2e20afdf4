//! Markdown → HTML rendering
//!
//!     Rendering runs in a fixed order:
//!
//!     1. Source rewrites (see [`preprocess`]): `align="center"` blocks become inline
//!        `text-align` styles, and lines carrying a run of badges get a `badge-container`
//!        wrapper so the badges stay on one row.
//!     2. Base GFM conversion with `comrak`: tables, strikethrough, autolinks, task lists and
//!        hard breaks on single newlines. Raw HTML passes through untouched; the sanitizer
//!        is the XSS defense, not the Markdown parser.
//!     3. Tree passes (see [`postprocess`]): badge styling, centered-div spacing, external
//!        link hardening, code-block styling and alert tagging.
//!     4. Sanitization with the rendered policy. Never skipped.
//!
//!     A panic inside the base conversion, or a failure writing the tree back out, is
//!     reported as [`RenderDegraded`] carrying the original Markdown.

pub mod postprocess;
pub mod preprocess;

use crate::blocks::badge::DEFAULT_BADGE_MARKERS;
use crate::dom;
use crate::error::RenderDegraded;
use crate::sanitize::{sanitize, SanitizePolicy};
use comrak::{markdown_to_html, ComrakOptions};
use std::panic::{self, AssertUnwindSafe};

/// Inline styling for `<pre>` blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockStyle {
    pub background: String,
    pub padding: String,
    pub border_radius: String,
}

impl Default for CodeBlockStyle {
    fn default() -> Self {
        Self {
            background: "#161b22".to_string(),
            padding: "16px".to_string(),
            border_radius: "6px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Treat single newlines as hard breaks.
    pub hard_breaks: bool,
    /// Add `target="_blank" rel="noopener noreferrer"` to `http(s)` links.
    pub external_links_new_tab: bool,
    /// Substrings marking an image as a badge.
    pub badge_markers: Vec<String>,
    pub code_block: CodeBlockStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            hard_breaks: true,
            external_links_new_tab: true,
            badge_markers: DEFAULT_BADGE_MARKERS.iter().map(|m| m.to_string()).collect(),
            code_block: CodeBlockStyle::default(),
        }
    }
}

/// Markdown renderer with fixed options and the rendered sanitize policy.
#[derive(Debug, Clone)]
pub struct Renderer {
    options: RenderOptions,
    policy: SanitizePolicy,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            policy: SanitizePolicy::rendered(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn policy(&self) -> &SanitizePolicy {
        &self.policy
    }

    /// Render Markdown to sanitized HTML.
    pub fn render(&self, markdown: &str) -> Result<String, RenderDegraded> {
        let source = preprocess::center_aligned_blocks(markdown);
        let source = preprocess::wrap_badge_runs(&source, &self.options.badge_markers);
        tracing::debug!(len = source.len(), "preprocessed markdown");

        let comrak_options = self.comrak_options();
        let html = panic::catch_unwind(AssertUnwindSafe(|| {
            markdown_to_html(&source, &comrak_options)
        }))
        .map_err(|payload| RenderDegraded::new(markdown, panic_reason(payload.as_ref())))?;

        let mut root = dom::parse_fragment(&html);
        postprocess::apply(&mut root, &self.options);
        let html = dom::to_html(&root).map_err(|e| RenderDegraded::new(markdown, e.to_string()))?;

        let clean = sanitize(&html, &self.policy);
        tracing::debug!(
            markdown_len = markdown.len(),
            html_len = clean.len(),
            "rendered markdown"
        );
        Ok(clean)
    }

    /// Total variant of [`Renderer::render`]: on failure the original Markdown is returned.
    pub fn render_markdown(&self, markdown: &str) -> String {
        match self.render(markdown) {
            Ok(html) => html,
            Err(degraded) => {
                tracing::warn!(reason = %degraded.reason, "markdown rendering degraded");
                degraded.into_original()
            }
        }
    }

    fn comrak_options(&self) -> ComrakOptions<'static> {
        let mut options = ComrakOptions::default();
        options.extension.table = true;
        options.extension.strikethrough = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.render.hardbreaks = self.options.hard_breaks;
        options.render.unsafe_ = true;
        options
    }
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "markdown conversion panicked".to_string()
    }
}
