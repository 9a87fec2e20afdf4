//! Content-type classification
//!
//! Decides whether incoming text should be treated as HTML or as Markdown. A single pattern
//! ("an opening tag `<letter …>` anywhere") is enough for the editor's inputs; Markdown with
//! one inline HTML tag is classified as HTML and that is accepted.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static OPENING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<[a-z][\s\S]*>").expect("valid opening-tag pattern"));

/// What kind of markup a string carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Html,
    Markdown,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Html => "html",
            ContentKind::Markdown => "markdown",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `input`. Total; the empty string is Markdown.
pub fn classify(input: &str) -> ContentKind {
    if OPENING_TAG.is_match(input) {
        ContentKind::Html
    } else {
        ContentKind::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown() {
        assert_eq!(classify("# Title\n\nSome *text*"), ContentKind::Markdown);
        assert_eq!(classify(""), ContentKind::Markdown);
        assert_eq!(classify("a < b and c > d"), ContentKind::Markdown);
        assert_eq!(classify("<3 you >"), ContentKind::Markdown);
    }

    #[test]
    fn test_html() {
        assert_eq!(classify("<p>Hello</p>"), ContentKind::Html);
        assert_eq!(classify("<DIV ALIGN=center>x</DIV>"), ContentKind::Html);
        assert_eq!(classify("text\n<br\n/>"), ContentKind::Html);
    }

    #[test]
    fn test_markdown_with_inline_tag_is_html() {
        assert_eq!(classify("Press <kbd>Ctrl</kbd> to copy"), ContentKind::Html);
    }

    #[test]
    fn test_display() {
        assert_eq!(ContentKind::Html.to_string(), "html");
        assert_eq!(ContentKind::Markdown.as_str(), "markdown");
    }
}
