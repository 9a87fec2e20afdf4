//! Node model → HTML
//!
//! Rebuilds `markup5ever_rcdom` handles from the owned tree and lets `html5ever`'s serializer
//! handle escaping, void elements and raw-text rules.

use super::{Element, Node as DomNode};
use crate::error::BabelError;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

/// Serialize the children of `root` (the root element itself is not emitted).
pub fn to_html(root: &Element) -> Result<String, BabelError> {
    let mut output = Vec::new();

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in &root.children {
        let serializable = SerializableHandle::from(to_handle(child));
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            BabelError::Serialization(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| BabelError::Serialization(format!("UTF-8 conversion failed: {e}")))
}

fn to_handle(node: &DomNode) -> Handle {
    match node {
        DomNode::Element(el) => {
            let handle = create_element(&el.tag, &el.attrs);
            for child in &el.children {
                handle.children.borrow_mut().push(to_handle(child));
            }
            handle
        }
        DomNode::Text(text) => create_text(text),
        DomNode::Comment(text) => create_comment(text),
    }
}

fn create_element(tag: &str, attrs: &[(String, String)]) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name.as_str())),
            value: value.clone().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

fn create_comment(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Comment {
            contents: text.to_string().into(),
        },
    })
}
