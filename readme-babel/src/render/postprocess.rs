//! Passes over the rendered tree
//!
//! Each pass is a plain function over the node model so it can be tested on hand-built trees.
//! [`apply`] runs them in their fixed order.

use super::preprocess::BADGE_CONTAINER;
use super::{CodeBlockStyle, RenderOptions};
use crate::blocks::badge::looks_like_badge;
use crate::blocks::AlertKind;
use crate::dom::{Element, Node};
use once_cell::sync::Lazy;
use regex::Regex;

static LANGUAGE_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"language-([\w#+-]+)").expect("valid language class pattern"));

pub fn apply(root: &mut Element, options: &RenderOptions) {
    promote_badge_containers(root);
    style_badge_images(root, &options.badge_markers);
    style_centered_blocks(root);
    if options.external_links_new_tab {
        harden_external_links(root);
    }
    style_code_blocks(root, &options.code_block);
    tag_alerts(root);
}

fn no_wrap(el: &mut Element) {
    el.set_style("white-space", "nowrap");
    el.set_style("overflow-x", "auto");
}

/// Unwrap badge-container spans, moving the class and no-wrap styling to their parent.
pub fn promote_badge_containers(el: &mut Element) {
    for child in el.children.iter_mut() {
        if let Node::Element(child) = child {
            promote_badge_containers(child);
        }
    }

    let is_marker = |node: &Node| {
        node.as_element()
            .is_some_and(|e| e.is("span") && e.has_class(BADGE_CONTAINER))
    };
    if !el.children.iter().any(is_marker) {
        return;
    }

    let children = std::mem::take(&mut el.children);
    for child in children {
        match child {
            Node::Element(span) if span.is("span") && span.has_class(BADGE_CONTAINER) => {
                el.children.extend(span.children)
            }
            other => el.children.push(other),
        }
    }
    el.add_class(BADGE_CONTAINER);
    no_wrap(el);
}

fn is_badge_image<S: AsRef<str>>(el: &Element, markers: &[S]) -> bool {
    el.is("img")
        && (el.attr("src").is_some_and(|src| looks_like_badge(src, markers))
            || el.attr("alt").is_some_and(|alt| looks_like_badge(alt, markers)))
}

/// Badge images sit inline on one row; their paragraph does not wrap.
pub fn style_badge_images<S: AsRef<str>>(root: &mut Element, markers: &[S]) {
    root.walk_mut(&mut |el| {
        if el.is("img") && is_badge_image(el, markers) {
            el.set_style("display", "inline-block");
            el.set_style("vertical-align", "middle");
            el.set_style("margin", "0 4px");
        } else if el.is("p") {
            let holds_badge = el.child_elements().any(|child| {
                is_badge_image(child, markers)
                    || (child.is("a") && child.child_elements().any(|c| is_badge_image(c, markers)))
            });
            if holds_badge {
                no_wrap(el);
            }
        }
    });
}

/// Centered divs get vertical breathing room.
pub fn style_centered_blocks(root: &mut Element) {
    root.walk_mut(&mut |el| {
        let centered = el
            .style("text-align")
            .is_some_and(|align| align.eq_ignore_ascii_case("center"));
        if el.is("div") && centered {
            el.set_style("text-align", "center");
            el.set_style("margin", "1em 0");
        }
    });
}

/// External links open in a new tab without handing over `window.opener`.
pub fn harden_external_links(root: &mut Element) {
    root.walk_mut(&mut |el| {
        let external = el
            .attr("href")
            .is_some_and(|href| href.trim_start().to_ascii_lowercase().starts_with("http"));
        if el.is("a") && external {
            el.set_attr("target", "_blank");
            el.set_attr("rel", "noopener noreferrer");
        }
    });
}

/// Dark code-block styling and a `data-language` attribute taken from the code's class.
pub fn style_code_blocks(root: &mut Element, style: &CodeBlockStyle) {
    root.walk_mut(&mut |el| {
        if !el.is("pre") {
            return;
        }
        el.set_style("background-color", &style.background);
        el.set_style("padding", &style.padding);
        el.set_style("border-radius", &style.border_radius);
        el.set_style("overflow", "auto");

        let language = el
            .child_elements()
            .find(|child| child.is("code"))
            .and_then(|code| code.attr("class"))
            .and_then(|class| LANGUAGE_CLASS.captures(class))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());
        if let Some(language) = language {
            el.set_attr("data-language", language);
        }
    });
}

/// Blockquotes opening with `[!NOTE]` … `[!CAUTION]` become alert blocks.
pub fn tag_alerts(root: &mut Element) {
    root.walk_mut(&mut |el| {
        if !el.is("blockquote") {
            return;
        }
        if let Some(kind) = AlertKind::detect(&el.text_content()) {
            el.add_class("github-alert");
            el.add_class(&format!("github-alert-{kind}"));
            el.set_attr("data-type", kind.as_str());
        }
    });
}
