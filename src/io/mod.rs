//! Document I/O: rendering item graphs to element trees and XML, and
//! reading them back.
//!
//! Readers and writers are trait based so other light-data encodings can
//! sit next to the XML one.

pub mod element_writer;
pub mod xml;

use std::io::{Read, Write};

use crate::graph::item::ItemRef;
use crate::xdmf_error::XdmfError;

pub use element_writer::{ElementWriter, WriterConfig};
pub use xml::{XmlReader, XmlWriter};

/// Reads a whole document into the items under its root.
pub trait DocumentReader {
    /// Parse a document from `reader`.
    fn read<R: Read>(&self, reader: R) -> Result<Vec<ItemRef>, XdmfError>;
}

/// Writes items as a whole document.
pub trait DocumentWriter {
    /// Serialize `items` under a document root into `writer`.
    fn write<W: Write>(&self, writer: W, items: &[ItemRef]) -> Result<(), XdmfError>;
}
