//! Maps between the node numberings of partitioned grids.

use std::sync::Arc;

use crate::graph::children::{ChildCollection, Named};
use crate::graph::item::{Item, ItemRef, ReadItem, populate_information, visit_all};
use crate::graph::properties::PropertyMap;
use crate::graph::reader::ReaderContext;
use crate::graph::visitor::Visitor;
use crate::model::{DataItem, Information};
use crate::xdmf_error::XdmfError;

/// Boundary-communication map: data items pairing local and remote node
/// IDs.
#[derive(Debug, Clone, Default)]
pub struct Map {
    name: Option<String>,
    data_items: ChildCollection<DataItem>,
    information: ChildCollection<Information>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
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

impl Named for Map {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

impl Item for Map {
    fn item_tag(&self) -> &'static str {
        Self::ITEM_TAG
    }

    fn item_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        if let Some(name) = &self.name {
            properties.insert("Name".into(), name.clone());
        }
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

impl ReadItem for Map {
    const ITEM_TAG: &'static str = "Map";

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
        self.name = properties.get("Name").cloned();
        populate_information(&mut self.information, children);
        self.data_items
            .extend(children.iter().filter_map(ItemRef::as_data_item).cloned());
        Ok(())
    }
}
