//! shields.io static badges
//!
//! A static badge URL has the layout `https://img.shields.io/badge/<label>-<message>-<color>`,
//! or `badge/<message>-<color>` when there is no label. Inside a segment `--` is a literal
//! dash, `__` a literal underscore and `_` a space; everything else is percent-encoded.
//! `style`, `logo` and `logoColor` travel in the query string.

use crate::error::BabelError;
use serde::Serialize;
use url::{form_urlencoded, Url};

const BADGE_HOST: &str = "img.shields.io";

/// Substrings that mark an image URL (or alt text) as a badge.
pub const DEFAULT_BADGE_MARKERS: &[&str] = &["shields.io", "badge", "style=for-the-badge"];

/// Whether `text` (an image URL or alt text) looks like a badge, case-insensitively.
pub fn looks_like_badge<S: AsRef<str>>(text: &str, markers: &[S]) -> bool {
    let text = text.to_ascii_lowercase();
    markers
        .iter()
        .any(|marker| text.contains(&marker.as_ref().to_ascii_lowercase()))
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Badge {
    pub label: String,
    pub message: String,
    pub color: String,
    pub style: Option<String>,
    pub logo: Option<String>,
    pub logo_color: Option<String>,
}

impl Badge {
    pub fn new(
        label: impl Into<String>,
        message: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
            color: color.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn with_logo_color(mut self, color: impl Into<String>) -> Self {
        self.logo_color = Some(color.into());
        self
    }

    /// Parse a shields.io static badge URL.
    pub fn from_url(input: &str) -> Result<Self, BabelError> {
        let url = Url::parse(input).map_err(|e| BabelError::Badge(format!("{input}: {e}")))?;
        if !url.host_str().is_some_and(|host| host.ends_with("shields.io")) {
            return Err(BabelError::Badge(format!("{input}: not a shields.io URL")));
        }

        let mut segments = url
            .path_segments()
            .ok_or_else(|| BabelError::Badge(format!("{input}: missing path")))?;
        if segments.next() != Some("badge") {
            return Err(BabelError::Badge(format!(
                "{input}: only static /badge/ URLs are supported"
            )));
        }
        let content = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| BabelError::Badge(format!("{input}: empty badge content")))?;

        let parts: Vec<String> = split_segment(content)
            .iter()
            .map(|part| percent_decode(part))
            .collect();
        let mut badge = match parts.as_slice() {
            [label, message, color] => Badge::new(label, message, color),
            [message, color] => Badge::new("", message, color),
            _ => {
                return Err(BabelError::Badge(format!(
                    "{input}: expected <label>-<message>-<color>"
                )))
            }
        };

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "style" => badge.style = Some(value.into_owned()),
                "logo" => badge.logo = Some(value.into_owned()),
                "logoColor" => badge.logo_color = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(badge)
    }

    pub fn to_url(&self) -> String {
        let mut path = String::new();
        if !self.label.is_empty() {
            path.push_str(&encode_part(&self.label));
            path.push('-');
        }
        path.push_str(&encode_part(&self.message));
        path.push('-');
        path.push_str(&encode_part(&self.color));

        let mut url = format!("https://{BADGE_HOST}/badge/{path}");
        let query: Vec<(&str, &str)> = [
            ("style", self.style.as_deref()),
            ("logo", self.logo.as_deref()),
            ("logoColor", self.logo_color.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect();
        if !query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    /// Alt text: label and message separated by a space.
    pub fn alt_text(&self) -> String {
        format!("{} {}", self.label, self.message).trim().to_string()
    }

    pub fn to_markdown(&self) -> String {
        format!("![{}]({})", self.alt_text(), self.to_url())
    }
}

/// Split a raw badge segment on single dashes, resolving `--`, `__` and `_`.
fn split_segment(segment: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = segment.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '-' if chars.peek() == Some(&'-') => {
                chars.next();
                current.push('-');
            }
            '-' => parts.push(std::mem::take(&mut current)),
            '_' if chars.peek() == Some(&'_') => {
                chars.next();
                current.push('_');
            }
            '_' => current.push(' '),
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts
}

fn percent_decode(part: &str) -> String {
    // form_urlencoded treats '+' as a space and '&' / '=' as separators; a path segment does not.
    let escaped = part
        .replace('+', "%2B")
        .replace('&', "%26")
        .replace('=', "%3D");
    form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}

fn encode_part(part: &str) -> String {
    let escaped = part.replace('-', "--").replace('_', "__").replace(' ', "_");
    form_urlencoded::byte_serialize(escaped.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url_three_parts() {
        let badge = Badge::from_url(
            "https://img.shields.io/badge/build-passing-brightgreen?style=for-the-badge&logo=github&logoColor=white",
        )
        .unwrap();
        assert_eq!(badge.label, "build");
        assert_eq!(badge.message, "passing");
        assert_eq!(badge.color, "brightgreen");
        assert_eq!(badge.style.as_deref(), Some("for-the-badge"));
        assert_eq!(badge.logo.as_deref(), Some("github"));
        assert_eq!(badge.logo_color.as_deref(), Some("white"));
    }

    #[test]
    fn test_from_url_escapes() {
        let badge =
            Badge::from_url("https://img.shields.io/badge/rust--lang-1.75__beta_build%20ok-orange")
                .unwrap();
        assert_eq!(badge.label, "rust-lang");
        assert_eq!(badge.message, "1.75_beta build ok");
        assert_eq!(badge.color, "orange");
    }

    #[test]
    fn test_from_url_two_parts() {
        let badge = Badge::from_url("https://img.shields.io/badge/MIT-blue").unwrap();
        assert_eq!(badge.label, "");
        assert_eq!(badge.message, "MIT");
        assert_eq!(badge.alt_text(), "MIT");
    }

    #[test]
    fn test_from_url_rejects_other_urls() {
        assert!(Badge::from_url("https://example.com/badge/a-b-c").is_err());
        assert!(Badge::from_url("https://img.shields.io/github/stars/x").is_err());
        assert!(Badge::from_url("https://img.shields.io/badge/a-b-c-d").is_err());
        assert!(Badge::from_url("not a url").is_err());
    }

    #[test]
    fn test_to_url() {
        let badge = Badge::new("rust-lang", "1.75 stable", "orange").with_style("flat");
        assert_eq!(
            badge.to_url(),
            "https://img.shields.io/badge/rust--lang-1.75_stable-orange?style=flat"
        );
        assert_eq!(Badge::from_url(&badge.to_url()).unwrap(), badge);
    }

    #[test]
    fn test_to_markdown() {
        let badge = Badge::new("license", "MIT", "blue");
        assert_eq!(
            badge.to_markdown(),
            "![license MIT](https://img.shields.io/badge/license-MIT-blue)"
        );
    }

    #[test]
    fn test_looks_like_badge() {
        assert!(looks_like_badge(
            "https://img.shields.io/badge/a-b-c",
            DEFAULT_BADGE_MARKERS
        ));
        assert!(looks_like_badge("CI Badge", DEFAULT_BADGE_MARKERS));
        assert!(!looks_like_badge("logo.png", DEFAULT_BADGE_MARKERS));
    }
}
