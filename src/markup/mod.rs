//! HTML parsing for gallery markup
//!
//! Wraps html5ever so the collector can walk server-rendered fragments the
//! same way it walks the initial page: parse once, then scan element nodes
//! in document order. Fragments are read with the document parser, which
//! wraps loose entry markup in `html`/`body` without changing its order.

pub mod dialect;

pub use dialect::MarkupDialect;

use crate::utils::error::MarkupError;
use crate::utils::Result;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// A parsed gallery fragment
pub struct Fragment {
    dom: RcDom,
}

impl Fragment {
    /// Parse an HTML fragment into a walkable tree
    pub fn parse(html: &str) -> Result<Self> {
        let opts = ParseOpts {
            tree_builder: TreeBuilderOpts {
                drop_doctype: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let dom = parse_document(RcDom::default(), opts)
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .map_err(|e| MarkupError::Parse(e.to_string()))?;

        Ok(Self { dom })
    }

    /// Every node under the document root, in document order
    pub fn nodes(&self) -> Vec<Handle> {
        descendants(&self.dom.document)
    }
}

/// Collect `node` and everything beneath it, in document order
pub fn descendants(node: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    let mut stack = vec![node.clone()];
    while let Some(current) = stack.pop() {
        for child in current.children.borrow().iter().rev() {
            stack.push(child.clone());
        }
        out.push(current);
    }
    out
}

/// Lowercased tag name, if the node is an element
pub fn element_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref().to_string()),
        _ => None,
    }
}

/// Attribute value by name, if present on an element node
pub fn attr(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// True if the element's class list contains `class`
pub fn has_class(node: &Handle, class: &str) -> bool {
    attr(node, "class")
        .map(|classes| classes.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// First descendant element with the given tag name
pub fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    descendants(node)
        .into_iter()
        .find(|n| element_name(n).as_deref() == Some(tag))
}
