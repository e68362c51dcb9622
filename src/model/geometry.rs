//! Node coordinates of a grid.

use std::sync::Arc;

use crate::graph::children::ChildCollection;
use crate::graph::item::{Item, ItemRef, ReadItem, populate_information, visit_all};
use crate::graph::properties::{ItemProperty, PropertyMap};
use crate::graph::reader::ReaderContext;
use crate::graph::visitor::Visitor;
use crate::model::{DataItem, GeometryType, Information};
use crate::xdmf_error::XdmfError;

/// Coordinate layout plus the data items that hold the coordinates.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    geometry_type: GeometryType,
    data_items: ChildCollection<DataItem>,
    information: ChildCollection<Information>,
}

impl Geometry {
    pub fn new(geometry_type: GeometryType) -> Self {
        Self {
            geometry_type,
            ..Self::default()
        }
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    pub fn set_geometry_type(&mut self, geometry_type: GeometryType) {
        self.geometry_type = geometry_type;
    }

    pub fn data_items(&self) -> &ChildCollection<DataItem> {
        &self.data_items
    }

    pub fn data_items_mut(&mut self) -> &mut ChildCollection<DataItem> {
        &mut self.data_items
    }

    /// Builder form of appending a data item.
    pub fn with_data_item(mut self, data_item: impl Into<Arc<DataItem>>) -> Self {
        self.data_items.insert(data_item.into());
        self
    }
}

impl Item for Geometry {
    fn item_tag(&self) -> &'static str {
        Self::ITEM_TAG
    }

    fn item_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        self.geometry_type.collect_properties(&mut properties);
        properties
    }

    fn information(&self) -> &ChildCollection<Information> {
        &self.information
    }

    fn traverse(&self, visitor: &mut dyn Visitor) -> Result<(), XdmfError> {
        visit_all(visitor, &self.information)?;
        visit_all(visitor, &self.data_items)
    }
}

impl ReadItem for Geometry {
    const ITEM_TAG: &'static str = "Geometry";

    fn construct(_properties: &PropertyMap) -> Result<Self, XdmfError> {
        Ok(Self::default())
    }

    fn information_mut(&mut self) -> &mut ChildCollection<Information> {
        &mut self.information
    }

    fn populate_item(
        &mut self,
        properties: &PropertyMap,
        children: &[ItemRef],
        _context: &ReaderContext,
    ) -> Result<(), XdmfError> {
        self.geometry_type = GeometryType::from_properties(properties)?;
        populate_information(&mut self.information, children);
        self.data_items
            .extend(children.iter().filter_map(ItemRef::as_data_item).cloned());
        Ok(())
    }
}
