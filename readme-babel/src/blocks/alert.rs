//! GitHub alert blocks (`> [!NOTE]` … `> [!CAUTION]`)

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// `[!TYPE]` at the very start of a blockquote's text, optionally backslash-escaped.
static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*\\?\[!(note|tip|important|warning|caution)\\?\]")
        .expect("valid alert marker pattern")
});

/// The five alert kinds GitHub recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    pub const ALL: [AlertKind; 5] = [
        AlertKind::Note,
        AlertKind::Tip,
        AlertKind::Important,
        AlertKind::Warning,
        AlertKind::Caution,
    ];

    /// Lowercase name, as used in `data-type` and CSS classes.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Note => "note",
            AlertKind::Tip => "tip",
            AlertKind::Important => "important",
            AlertKind::Warning => "warning",
            AlertKind::Caution => "caution",
        }
    }

    /// The Markdown marker, e.g. `[!NOTE]`.
    pub fn marker(&self) -> String {
        format!("[!{}]", self.as_str().to_ascii_uppercase())
    }

    /// Detect a leading `[!TYPE]` marker in `text`. Case-insensitive; leading whitespace and a
    /// backslash-escaped form (`\[!NOTE\]`) are accepted.
    pub fn detect(text: &str) -> Option<AlertKind> {
        let caps = MARKER.captures(text)?;
        caps.get(1)?.as_str().parse().ok()
    }

    /// Remove the leading marker (and the rest of its line) from `text`.
    pub fn strip_marker(text: &str) -> &str {
        match MARKER.find(text) {
            Some(found) => {
                let rest = &text[found.end()..];
                let rest = rest.trim_start_matches([' ', '\t']);
                rest.strip_prefix('\n').unwrap_or(rest)
            }
            None => text,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlertKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown alert kind '{s}'"))
    }
}

/// An alert: its kind and Markdown body (without the `> ` prefixes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub body: String,
}

impl Alert {
    pub fn new(kind: AlertKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }

    /// Parse a blockquote body (already stripped of `> `) that starts with a marker.
    pub fn from_quote_body(text: &str) -> Option<Self> {
        let kind = AlertKind::detect(text)?;
        Some(Self::new(kind, AlertKind::strip_marker(text).trim()))
    }

    pub fn to_markdown(&self) -> String {
        let mut out = format!("> {}", self.kind.marker());
        let body = self.body.trim();
        if !body.is_empty() {
            for line in body.lines() {
                out.push('\n');
                if line.trim().is_empty() {
                    out.push('>');
                } else {
                    out.push_str("> ");
                    out.push_str(line);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(AlertKind::detect("[!NOTE]\nbody"), Some(AlertKind::Note));
        assert_eq!(AlertKind::detect("  [!warning] x"), Some(AlertKind::Warning));
        assert_eq!(AlertKind::detect(r"\[!TIP\]"), Some(AlertKind::Tip));
        assert_eq!(AlertKind::detect("[!DANGER]"), None);
        assert_eq!(AlertKind::detect("see [!NOTE]"), None);
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(AlertKind::strip_marker("[!NOTE]  \nbody"), "body");
        assert_eq!(AlertKind::strip_marker(r"\[!CAUTION\] careful"), "careful");
        assert_eq!(AlertKind::strip_marker("plain"), "plain");
    }

    #[test]
    fn test_to_markdown() {
        let alert = Alert::new(AlertKind::Important, "line one\n\nline two");
        assert_eq!(
            alert.to_markdown(),
            "> [!IMPORTANT]\n> line one\n>\n> line two"
        );
        assert_eq!(Alert::new(AlertKind::Tip, "").to_markdown(), "> [!TIP]");
    }

    #[test]
    fn test_from_quote_body() {
        let alert = Alert::from_quote_body("[!caution]\nDo not").unwrap();
        assert_eq!(alert.kind, AlertKind::Caution);
        assert_eq!(alert.body, "Do not");
        assert!(Alert::from_quote_body("just a quote").is_none());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("NOTE".parse::<AlertKind>(), Ok(AlertKind::Note));
        assert!("nope".parse::<AlertKind>().is_err());
    }
}
