//! XML text ⇄ element trees.
//!
//! Parsing goes through `roxmltree`. Text content is the concatenation of
//! an element's text nodes with surrounding whitespace trimmed; whitespace
//! only text is dropped. Output uses two-space indentation and escapes
//! markup characters in attribute values and text.

use std::borrow::Cow;
use std::io::{Read, Write};

use roxmltree::{Document, Node};

use crate::graph::element::Element;
use crate::graph::item::ItemRef;
use crate::graph::reader::Reader;
use crate::io::element_writer::{ElementWriter, WriterConfig};
use crate::io::{DocumentReader, DocumentWriter};
use crate::xdmf_error::XdmfError;

/// Parse XML text into an element tree rooted at the document element.
pub fn parse_element(text: &str) -> Result<Element, XdmfError> {
    let document = Document::parse(text).map_err(|err| XdmfError::XmlParse(err.to_string()))?;
    Ok(convert(document.root_element()))
}

fn convert(node: Node<'_, '_>) -> Element {
    let mut element = Element::new(node.tag_name().name());
    for attribute in node.attributes() {
        element
            .attributes
            .insert(attribute.name().to_string(), attribute.value().to_string());
    }
    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            element.children.push(convert(child));
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        }
    }
    let text = text.trim();
    if !text.is_empty() {
        element.text = Some(text.to_string());
    }
    element
}

/// Write `element` as an XML document, declaration included.
pub fn write_element<W: Write>(element: &Element, mut writer: W) -> Result<(), XdmfError> {
    writeln!(writer, "<?xml version=\"1.0\" ?>")?;
    write_node(&mut writer, element, 0)?;
    writer.flush()?;
    Ok(())
}

fn write_node<W: Write>(writer: &mut W, element: &Element, depth: usize) -> std::io::Result<()> {
    let indent = "  ".repeat(depth);
    write!(writer, "{indent}<{}", element.tag)?;
    for (name, value) in &element.attributes {
        write!(writer, " {name}=\"{}\"", escape(value))?;
    }
    if element.text.is_none() && element.children.is_empty() {
        return writeln!(writer, "/>");
    }
    writeln!(writer, ">")?;
    if let Some(text) = &element.text {
        writeln!(writer, "{indent}  {}", escape(text))?;
    }
    for child in &element.children {
        write_node(writer, child, depth + 1)?;
    }
    writeln!(writer, "{indent}</{}>", element.tag)
}

fn escape(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'', '\n', '\t']) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\n' => escaped.push_str("&#10;"),
            '\t' => escaped.push_str("&#9;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Reads `<Xdmf>` documents from XML text.
#[derive(Debug, Clone, Default)]
pub struct XmlReader {
    reader: Reader,
}

impl XmlReader {
    pub fn new(reader: Reader) -> Self {
        Self { reader }
    }

    /// Parse and read a document held in memory.
    pub fn read_str(&self, text: &str) -> Result<Vec<ItemRef>, XdmfError> {
        self.reader.read_document(&parse_element(text)?)
    }
}

impl DocumentReader for XmlReader {
    fn read<R: Read>(&self, mut reader: R) -> Result<Vec<ItemRef>, XdmfError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.read_str(&text)
    }
}

/// Writes item graphs as `<Xdmf>` XML documents.
#[derive(Debug, Clone, Default)]
pub struct XmlWriter {
    config: WriterConfig,
}

impl XmlWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Render `items` to a string.
    pub fn write_string(&self, items: &[ItemRef]) -> Result<String, XdmfError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, items)?;
        String::from_utf8(buffer).map_err(|err| XdmfError::Io(err.to_string()))
    }
}

impl DocumentWriter for XmlWriter {
    fn write<W: Write>(&self, writer: W, items: &[ItemRef]) -> Result<(), XdmfError> {
        let document = ElementWriter::new(self.config.clone()).write_document(items)?;
        write_element(&document, writer)
    }
}
