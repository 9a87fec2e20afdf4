//! Escaping helpers for Markdown output
//!
//! Text nodes are escaped so that literal Markdown-significant characters survive a render /
//! serialize round trip. The set follows the classic HTML→Markdown converters: characters that
//! are significant anywhere are always escaped, while line-start constructs (`-`, `+ `, `#`,
//! `>`, `1. `) only at the start of a text node.

use once_cell::sync::Lazy;
use regex::Regex;

struct Escape {
    pattern: Regex,
    replacement: &'static str,
}

static ESCAPES: Lazy<Vec<Escape>> = Lazy::new(|| {
    [
        (r"\\", r"\\"),
        (r"\*", r"\*"),
        (r"^-", r"\-"),
        (r"^\+ ", r"\+ "),
        (r"^(=+)", r"\$1"),
        (r"^(#{1,6}) ", r"\$1 "),
        (r"`", r"\`"),
        (r"^~~~", r"\~~~"),
        (r"\[", r"\["),
        (r"\]", r"\]"),
        (r"^>", r"\>"),
        (r"_", r"\_"),
        (r"^(\d+)\. ", r"$1\. "),
        (r"<([A-Za-z/!?])", r"\<$1"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| Escape {
        pattern: Regex::new(pattern).expect("valid escape pattern"),
        replacement,
    })
    .collect()
});

/// Escape Markdown-significant characters in a text node.
pub fn escape_text(text: &str) -> String {
    ESCAPES.iter().fold(text.to_string(), |acc, escape| {
        escape
            .pattern
            .replace_all(&acc, escape.replacement)
            .into_owned()
    })
}

/// Longest run of `marker` in `text`.
fn longest_run(text: &str, marker: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == marker {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Opening/closing fence for a code block: at least three `marker`s, longer than any run of
/// the same character inside the code.
pub fn fence_for(code: &str, marker: char) -> String {
    let length = (longest_run(code, marker) + 1).max(3);
    std::iter::repeat(marker).take(length).collect()
}

/// Inline code span: the shortest backtick delimiter that does not occur in `code`, padded
/// with spaces when the code starts or ends with a backtick or is space-wrapped.
pub fn code_span(code: &str) -> String {
    let code = code.replace(['\r', '\n'], " ");
    let mut runs = Vec::new();
    let mut current = 0;
    for c in code.chars() {
        if c == '`' {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    let mut width = 1;
    while runs.contains(&width) {
        width += 1;
    }
    let delimiter = "`".repeat(width);
    let space_wrapped =
        code.len() > 2 && code.starts_with(' ') && code.ends_with(' ') && !code.trim().is_empty();
    let pad = if code.starts_with('`') || code.ends_with('`') || space_wrapped {
        " "
    } else {
        ""
    };
    format!("{delimiter}{pad}{code}{pad}{delimiter}")
}

/// Escape characters that would break a link destination.
pub fn escape_link_destination(href: &str) -> String {
    href.replace('(', "\\(")
        .replace(')', "\\)")
        .replace(' ', "%20")
}

/// Quote a link or image title.
pub fn link_title(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(title) if !title.is_empty() => {
            let title = title.replace('"', "\\\"").replace(['\r', '\n'], " ");
            format!(" \"{title}\"")
        }
        _ => String::new(),
    }
}

/// Escape text for use inside raw HTML.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_inline_characters() {
        assert_eq!(escape_text("a*b_c"), r"a\*b\_c");
        assert_eq!(escape_text("[link] `code`"), r"\[link\] \`code\`");
        assert_eq!(escape_text(r"back\slash"), r"back\\slash");
    }

    #[test]
    fn test_escape_line_start_characters() {
        assert_eq!(escape_text("- item"), r"\- item");
        assert_eq!(escape_text("# heading"), r"\# heading");
        assert_eq!(escape_text("> quote"), r"\> quote");
        assert_eq!(escape_text("1. first"), r"1\. first");
        assert_eq!(escape_text("+ plus"), r"\+ plus");
        assert_eq!(escape_text("a - b"), "a - b");
        assert_eq!(escape_text("2024 release"), "2024 release");
    }

    #[test]
    fn test_escape_html_like_text() {
        assert_eq!(escape_text("use <div> here"), r"use \<div> here");
        assert_eq!(escape_text("1 < 2"), "1 < 2");
    }

    #[test]
    fn test_fence_for() {
        assert_eq!(fence_for("let x = 1;", '`'), "```");
        assert_eq!(fence_for("```\nnested\n```", '`'), "````");
        assert_eq!(fence_for("~~~~", '~'), "~~~~~");
    }

    #[test]
    fn test_code_span() {
        assert_eq!(code_span("cargo test"), "`cargo test`");
        assert_eq!(code_span("a `b` c"), "``a `b` c``");
        assert_eq!(code_span("`tick"), "`` `tick ``");
    }

    #[test]
    fn test_link_helpers() {
        assert_eq!(escape_link_destination("a b(c)"), r"a%20b\(c\)");
        assert_eq!(link_title(Some("Say \"hi\"")), r#" "Say \"hi\"""#);
        assert_eq!(link_title(None), "");
        assert_eq!(link_title(Some("  ")), "");
    }
}
