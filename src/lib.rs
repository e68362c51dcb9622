#![cfg_attr(docsrs, feature(doc_cfg))]
//! # xdmf-graph
//!
//! xdmf-graph models XDMF light data as an in-memory graph of
//! self-describing items. Every node reports its own tag and property map,
//! hands a visitor to its children for writing, and can be rebuilt by a
//! reader that knows nothing but the tag, the properties and the already
//! built children.
//!
//! ## Layout
//! - [`graph`]: the [`Item`](graph::Item) trait, the [`ItemRef`](graph::ItemRef)
//!   sum type, [`ChildCollection`](graph::ChildCollection), the visitor and
//!   the tag-dispatching [`Reader`](graph::Reader).
//! - [`model`]: grids, topologies, geometries, attributes and the other
//!   domain entities, plus the descriptor registries
//!   ([`TopologyType`](model::TopologyType) and friends).
//! - [`data`]: scalar types and the non-owning [`DataBuffer`](data::DataBuffer)
//!   binding to heavy data held elsewhere.
//! - [`io`]: element-tree and XML readers/writers.
//!
//! ## Usage
//!
//! ```rust
//! use xdmf_graph::prelude::*;
//!
//! let mut grid = Grid::new("mesh");
//! grid.set_geometry(Geometry::new(GeometryType::Xyz));
//! grid.set_topology(Topology::new(TopologyType::triangle()));
//! let domain = Domain::new().with_grid(grid);
//!
//! let xml = XmlWriter::default().write_string(&[ItemRef::from(domain)])?;
//! let items = XmlReader::default().read_str(&xml)?;
//! let domain = items[0].as_domain().expect("domain");
//! assert_eq!(domain.grids().get_by_name("mesh").map(|g| g.name()), Some("mesh"));
//! # Ok::<(), XdmfError>(())
//! ```
//!
//! ## Sharing
//! Children are held as `Arc`s, so one node may sit under several parents.
//! The element writer emits such nodes once with an `Id` and refers to them
//! afterwards with `Reference`; the reader turns those back into a single
//! shared node.
//!
//! ## Features
//! - `rayon`: [`Reader::read_documents_par`](graph::Reader) reads independent
//!   documents in parallel.

pub mod data;
pub mod graph;
pub mod io;
pub mod model;
pub mod xdmf_error;

pub use xdmf_error::XdmfError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::{
        DataBuffer, HeavyDataHandle, HeavyDataResolver, HeavyDataStore, InMemoryHandle,
        ScalarType,
    };
    pub use crate::graph::{
        ChildCollection, Element, Item, ItemRef, Named, PropertyMap, ReadItem, Reader,
        ReaderConfig, ReaderContext, UnknownTagPolicy, Visitor,
    };
    pub use crate::io::{
        DocumentReader, DocumentWriter, ElementWriter, WriterConfig, XmlReader, XmlWriter,
    };
    pub use crate::model::{
        Attribute, AttributeCenter, AttributeType, CellType, CollectionType, DataFormat,
        DataItem, Domain, Geometry, GeometryType, Grid, GridCollection, Information, Map, Set,
        SetType, Time, Topology, TopologyType,
    };
    pub use crate::xdmf_error::XdmfError;
}
