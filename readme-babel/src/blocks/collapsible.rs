//! Collapsible sections (`<details><summary>`)

use crate::serializer::escape::escape_html;

/// A `<details>` block: the summary line, whether it starts expanded, and a Markdown body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Collapsible {
    pub summary: String,
    pub open: bool,
    pub body: String,
}

impl Collapsible {
    pub fn new(summary: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            open: false,
            body: body.into(),
        }
    }

    pub fn opened(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Markdown form. The summary is HTML-escaped because it lives inside a raw HTML block;
    /// the body is separated by blank lines so it is parsed as Markdown again.
    pub fn to_markdown(&self) -> String {
        let open = if self.open { " open" } else { "" };
        let summary = escape_html(self.summary.trim());
        let body = self.body.trim();
        if body.is_empty() {
            format!("<details{open}><summary>{summary}</summary>\n\n</details>")
        } else {
            format!("<details{open}><summary>{summary}</summary>\n\n{body}\n\n</details>")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_markdown() {
        let block = Collapsible::new("Details", "Hidden *text*");
        assert_eq!(
            block.to_markdown(),
            "<details><summary>Details</summary>\n\nHidden *text*\n\n</details>"
        );
    }

    #[test]
    fn test_open_and_escaped_summary() {
        let block = Collapsible::new("a < b & c", "").opened(true);
        assert_eq!(
            block.to_markdown(),
            "<details open><summary>a &lt; b &amp; c</summary>\n\n</details>"
        );
    }
}
