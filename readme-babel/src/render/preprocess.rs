//! Source rewrites applied to Markdown before the base conversion

use crate::blocks::badge::looks_like_badge;
use once_cell::sync::Lazy;
use regex::Regex;

/// Class given to the inline wrapper around a run of badges.
pub const BADGE_CONTAINER: &str = "badge-container";

static CENTER_ALIGN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<(div|p)\s+align\s*=\s*(?:"center"|'center'|center)\s*>"#)
        .expect("valid center-align pattern")
});

static IMAGE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)").expect("valid image-link pattern"));

/// List, quote and heading markers that may precede a line's content.
static LINE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*(?:[-*+]\s+|\d+[.)]\s+|>\s*|#{1,6}\s+)*)").expect("valid prefix pattern")
});

static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{0,3}(`{3,}|~{3,})").expect("valid fence pattern"));

/// Rewrite `<div align="center">` / `<p align="center">` to an inline `text-align` style.
/// Fenced code and inline code spans are left alone.
pub fn center_aligned_blocks(markdown: &str) -> String {
    rewrite_prose_lines(markdown, |line| {
        if !CENTER_ALIGN.is_match(line) {
            return None;
        }
        Some(outside_code_spans(line, |text| {
            CENTER_ALIGN
                .replace_all(text, r#"<$1 style="text-align: center;">"#)
                .into_owned()
        }))
    })
}

/// Wrap every line holding two or more image links, at least one of them a badge, in an
/// inline badge-container span. Lines inside fenced code are left alone.
pub fn wrap_badge_runs<S: AsRef<str>>(markdown: &str, markers: &[S]) -> String {
    rewrite_prose_lines(markdown, |line| wrap_line(line, markers))
}

/// Apply `rewrite` to every line outside fenced code. `rewrite` receives the line without its
/// newline and returns `None` to keep it as is.
fn rewrite_prose_lines(markdown: &str, mut rewrite: impl FnMut(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut open_fence: Option<(char, usize)> = None;

    for line in markdown.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };

        if let Some(caps) = FENCE.captures(body) {
            let fence = &caps[1];
            let marker = fence.chars().next().unwrap_or('`');
            match open_fence {
                None => open_fence = Some((marker, fence.len())),
                Some((open, len)) if open == marker && fence.len() >= len => open_fence = None,
                Some(_) => {}
            }
            out.push_str(line);
            continue;
        }
        if open_fence.is_some() {
            out.push_str(line);
            continue;
        }

        match rewrite(body) {
            Some(rewritten) => {
                out.push_str(&rewritten);
                out.push_str(newline);
            }
            None => out.push_str(line),
        }
    }
    out
}

/// Apply `rewrite` to the parts of `line` outside backtick code spans. A backtick run with no
/// closing run of the same length is literal text.
fn outside_code_spans(line: &str, rewrite: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(start) = rest.find('`') {
        let run = backtick_run(&rest[start..]);
        let after = &rest[start + run..];
        out.push_str(&rewrite(&rest[..start]));
        match closing_run(after, run) {
            Some(end) => {
                let span_end = start + run + end + run;
                out.push_str(&rest[start..span_end]);
                rest = &rest[span_end..];
            }
            None => {
                out.push_str(&rest[start..start + run]);
                rest = after;
            }
        }
    }
    out.push_str(&rewrite(rest));
    out
}

fn backtick_run(text: &str) -> usize {
    text.bytes().take_while(|&b| b == b'`').count()
}

/// Byte offset of the first backtick run in `text` exactly `len` long.
fn closing_run(text: &str, len: usize) -> Option<usize> {
    let mut offset = 0;
    while let Some(found) = text[offset..].find('`') {
        let start = offset + found;
        let run = backtick_run(&text[start..]);
        if run == len {
            return Some(start);
        }
        offset = start + run;
    }
    None
}

fn wrap_line<S: AsRef<str>>(line: &str, markers: &[S]) -> Option<String> {
    let images: Vec<&str> = IMAGE_LINK.find_iter(line).map(|m| m.as_str()).collect();
    if images.len() < 2 || !images.iter().any(|image| looks_like_badge(image, markers)) {
        return None;
    }

    let prefix_len = LINE_PREFIX.find(line).map(|m| m.end()).unwrap_or(0);
    let (prefix, rest) = line.split_at(prefix_len);
    let content = rest.trim_end();
    if content.is_empty() || content.starts_with('|') {
        return None;
    }
    let trailing = &rest[content.len()..];
    Some(format!(
        "{prefix}<span class=\"{BADGE_CONTAINER}\">{content}</span>{trailing}"
    ))
}
