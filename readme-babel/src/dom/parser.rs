//! HTML → node model
//!
//! Parses with `html5ever` into an `RcDom`, then copies the `<body>` subtree into the owned
//! [`Element`] model. Parsing never fails: html5ever recovers from any malformed input the
//! way a browser would.
//!
//! Elements nested deeper than [`MAX_DEPTH`] are flattened into their text, so every
//! recursive pass over the model (serializing, converting, walking) has a bounded depth.

use super::{Element, Node};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Nesting depth below `<body>` past which content is kept as plain text.
pub const MAX_DEPTH: usize = 128;

/// Parse an HTML fragment. The returned element is the document's `<body>`.
pub fn parse_fragment(html: &str) -> Element {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    let mut body = Element::new("body");
    if let Some(handle) = find_element(&dom.document, "body") {
        body.children = convert_children(&handle, 0);
    }
    body
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let NodeData::Element { ref name, .. } = child.data {
            if &*name.local == tag {
                return Some(child.clone());
            }
        }
        if let Some(found) = find_element(child, tag) {
            return Some(found);
        }
    }
    None
}

fn convert_children(handle: &Handle, depth: usize) -> Vec<Node> {
    if depth >= MAX_DEPTH {
        let text = flattened_text(handle);
        return if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::Text(text)]
        };
    }
    handle
        .children
        .borrow()
        .iter()
        .filter_map(|child| convert_node(child, depth))
        .collect()
}

fn convert_node(handle: &Handle, depth: usize) -> Option<Node> {
    match handle.data {
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => {
            let mut element = Element::new(&*name.local);
            element.attrs = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            element.children = convert_children(handle, depth + 1);
            Some(Node::Element(element))
        }
        NodeData::Text { ref contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Comment { ref contents } => Some(Node::Comment(contents.to_string())),
        _ => None,
    }
}

/// All text below `handle` in document order, collected without recursion.
fn flattened_text(handle: &Handle) -> String {
    let mut out = String::new();
    let mut stack: Vec<Handle> = handle.children.borrow().iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        if let NodeData::Text { ref contents } = node.data {
            out.push_str(&contents.borrow());
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    out
}
