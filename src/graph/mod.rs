//! Item graph core: the node abstraction, child collections, property maps
//! and the visitor/reader protocols.

pub mod children;
pub mod element;
pub mod item;
pub mod properties;
pub mod reader;
pub mod visitor;

pub use children::{ChildCollection, Named};
pub use element::Element;
pub use item::{Item, ItemRef, ReadItem, populate_information};
pub use properties::{ItemProperty, PropertyMap};
pub use reader::{ItemFactory, Reader, ReaderConfig, ReaderContext, UnknownTagPolicy};
pub use visitor::Visitor;
