//! Error types for conversion operations

use thiserror::Error;

/// Errors that can occur inside the conversion pipeline.
///
/// The public conversion entry points are total and never surface these directly; they are
/// used by the fallible building blocks and folded into degraded output at the boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BabelError {
    /// Error while serializing the node model back to markup
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A badge URL that does not follow the static badge layout
    #[error("Invalid badge: {0}")]
    Badge(String),
}

/// Markdown rendering failed; carries the untouched input so callers can still display it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Markdown rendering degraded: {reason}")]
pub struct RenderDegraded {
    /// The Markdown exactly as it was handed to the renderer
    pub original: String,
    /// What went wrong
    pub reason: String,
}

impl RenderDegraded {
    pub fn new(original: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            reason: reason.into(),
        }
    }

    /// Consume the error and return the content to show instead of rendered HTML.
    pub fn into_original(self) -> String {
        self.original
    }
}
