//! Allow-list sanitization
//!
//! The only XSS defense in the pipeline. Built on `ammonia`, which parses with html5ever and
//! re-serializes only what the allow-lists admit. Two policies exist:
//!
//! - [`SanitizePolicy::paste`]: raw HTML arriving from the clipboard or an import. Structural
//!   and inline formatting only.
//! - [`SanitizePolicy::rendered`]: the renderer's own output. Adds the styling attributes the
//!   post-processing passes write (`style`, `align`, `data-language`) and the GitHub extras
//!   (`kbd`, `sup`, `sub`, `details`, `summary`).
//!
//! Regardless of policy, `<script>` and `<style>` are removed together with their content,
//! comments are dropped, `on*` handlers never pass (they are never on an allow-list) and URL
//! attributes are restricted to safe schemes.

use ammonia::Builder;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Tags whose content is discarded along with the tag.
const CLEAN_CONTENT_TAGS: &[&str] = &["script", "style"];

const BASE_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "br", "hr", "ul", "ol", "li", "blockquote",
    "strong", "b", "em", "i", "u", "s", "del", "strike", "code", "pre", "a", "img", "table",
    "caption", "colgroup", "col", "thead", "tbody", "tfoot", "tr", "th", "td", "div", "span",
    "input",
];

const RENDERED_EXTRA_TAGS: &[&str] = &["kbd", "sup", "sub", "details", "summary"];

const BASE_ATTRIBUTES: &[&str] = &[
    "href", "src", "alt", "title", "class", "id", "target", "rel", "type", "checked",
    "disabled", "open",
];

const RENDERED_EXTRA_ATTRIBUTES: &[&str] = &["data-language", "style", "align"];

const URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel", "ftp"];

/// CSS fragments that can load or run code from a `style` attribute.
const UNSAFE_STYLE_MARKERS: &[&str] = &[
    "expression(",
    "javascript:",
    "url(",
    "behavior:",
    "-moz-binding",
];

/// Which allow-list a [`SanitizePolicy`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Paste,
    Rendered,
    Custom,
}

/// An explicit allow-list of tags and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizePolicy {
    kind: PolicyKind,
    tags: BTreeSet<String>,
    attributes: BTreeSet<String>,
    allow_data_attributes: bool,
    url_schemes: BTreeSet<String>,
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl SanitizePolicy {
    /// Policy for pasted or imported HTML of unknown origin.
    pub fn paste() -> Self {
        Self {
            kind: PolicyKind::Paste,
            tags: to_set(BASE_TAGS),
            attributes: to_set(BASE_ATTRIBUTES),
            allow_data_attributes: true,
            url_schemes: to_set(URL_SCHEMES),
        }
    }

    /// Policy for HTML produced by the Markdown renderer.
    pub fn rendered() -> Self {
        let mut policy = Self::paste();
        policy.kind = PolicyKind::Rendered;
        policy.tags.extend(to_set(RENDERED_EXTRA_TAGS));
        policy.attributes.extend(to_set(RENDERED_EXTRA_ATTRIBUTES));
        policy
    }

    /// An empty policy: every tag is stripped, text is kept.
    pub fn text_only() -> Self {
        Self {
            kind: PolicyKind::Custom,
            tags: BTreeSet::new(),
            attributes: BTreeSet::new(),
            allow_data_attributes: false,
            url_schemes: to_set(URL_SCHEMES),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    /// Allow an additional tag. Tags whose content is always discarded are ignored.
    pub fn allow_tag(mut self, tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        if !CLEAN_CONTENT_TAGS.contains(&tag.as_str()) {
            self.kind = PolicyKind::Custom;
            self.tags.insert(tag);
        }
        self
    }

    /// Allow an additional attribute. Event handlers are ignored.
    pub fn allow_attribute(mut self, attribute: &str) -> Self {
        let attribute = attribute.to_ascii_lowercase();
        if !attribute.starts_with("on") {
            self.kind = PolicyKind::Custom;
            self.attributes.insert(attribute);
        }
        self
    }

    pub fn with_data_attributes(mut self, allow: bool) -> Self {
        self.kind = PolicyKind::Custom;
        self.allow_data_attributes = allow;
        self
    }

    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag.to_ascii_lowercase())
    }

    pub fn allows_attribute(&self, attribute: &str) -> bool {
        let attribute = attribute.to_ascii_lowercase();
        self.attributes.contains(&attribute)
            || (self.allow_data_attributes && attribute.starts_with("data-"))
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    fn builder(&self) -> Builder<'_> {
        let tags: HashSet<&str> = self
            .tags
            .iter()
            .map(String::as_str)
            .filter(|tag| !CLEAN_CONTENT_TAGS.contains(tag))
            .collect();
        let attributes: HashSet<&str> = self
            .attributes
            .iter()
            .map(String::as_str)
            .filter(|attr| !attr.starts_with("on"))
            .collect();
        let prefixes: HashSet<&str> = if self.allow_data_attributes {
            ["data-"].into_iter().collect()
        } else {
            HashSet::new()
        };

        let mut builder = Builder::default();
        builder
            .tags(tags)
            .tag_attributes(HashMap::new())
            .generic_attributes(attributes)
            .generic_attribute_prefixes(prefixes)
            .url_schemes(self.url_schemes.iter().map(String::as_str).collect())
            .clean_content_tags(CLEAN_CONTENT_TAGS.iter().copied().collect())
            .strip_comments(true)
            .link_rel(None)
            .attribute_filter(filter_attribute);
        builder
    }
}

fn filter_attribute<'u>(_element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    if attribute != "style" {
        return Some(Cow::Borrowed(value));
    }
    let is_unsafe = |decl: &str| {
        let decl = decl.to_ascii_lowercase();
        UNSAFE_STYLE_MARKERS.iter().any(|marker| decl.contains(marker))
    };
    if !is_unsafe(value) {
        return Some(Cow::Borrowed(value));
    }
    let kept: Vec<&str> = value
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty() && !is_unsafe(decl))
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(Cow::Owned(kept.join("; ")))
    }
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self::rendered()
    }
}

/// Clean `html` against `policy`.
pub fn sanitize(html: &str, policy: &SanitizePolicy) -> String {
    let cleaned = policy.builder().clean(html).to_string();
    tracing::trace!(
        policy = ?policy.kind(),
        input_len = html.len(),
        output_len = cleaned.len(),
        "sanitized html"
    );
    cleaned
}
