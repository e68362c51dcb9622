//! Parsed-element tree: the boundary between the item graph and any
//! tokenizer or serializer.
//!
//! An [`Element`] is what a parser hands the [`Reader`](super::reader::Reader)
//! and what the [`ElementWriter`](crate::io::element_writer::ElementWriter)
//! produces: a tag, an ordered attribute map, ordered children and optional
//! text content.

use serde::{Deserialize, Serialize};

use crate::graph::properties::PropertyMap;

/// One tagged element of a parsed document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Element name.
    pub tag: String,
    /// Attribute name → value, ordered by name.
    pub attributes: PropertyMap,
    /// Child elements in document order.
    pub children: Vec<Element>,
    /// Text payload, consumed by data-bearing items.
    pub text: Option<String>,
}

impl Element {
    /// Element with no attributes, children or text.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder: set one attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: append a child.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: set the text payload.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Children with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }
}
