//! Element connectivity of a grid.

use std::sync::Arc;

use crate::graph::children::ChildCollection;
use crate::graph::item::{Item, ItemRef, ReadItem, populate_information, visit_all};
use crate::graph::properties::{ItemProperty, PropertyMap, first_of, optional};
use crate::graph::reader::ReaderContext;
use crate::graph::visitor::Visitor;
use crate::model::topology_type::{LEGACY_TYPE_KEY, TOPOLOGY_TYPE_KEY};
use crate::model::{DataItem, Information, TopologyType};
use crate::xdmf_error::XdmfError;

const NUMBER_OF_ELEMENTS_KEY: &str = "NumberOfElements";

/// Element shape plus the data items holding the connectivity.
#[derive(Debug, Clone)]
pub struct Topology {
    topology_type: Arc<TopologyType>,
    number_of_elements: Option<u64>,
    data_items: ChildCollection<DataItem>,
    information: ChildCollection<Information>,
}

impl Topology {
    pub fn new(topology_type: Arc<TopologyType>) -> Self {
        Self {
            topology_type,
            number_of_elements: None,
            data_items: ChildCollection::new(),
            information: ChildCollection::new(),
        }
    }

    pub fn topology_type(&self) -> &Arc<TopologyType> {
        &self.topology_type
    }

    pub fn set_topology_type(&mut self, topology_type: Arc<TopologyType>) {
        self.topology_type = topology_type;
    }

    pub fn number_of_elements(&self) -> Option<u64> {
        self.number_of_elements
    }

    pub fn set_number_of_elements(&mut self, count: u64) {
        self.number_of_elements = Some(count);
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

impl Item for Topology {
    fn item_tag(&self) -> &'static str {
        Self::ITEM_TAG
    }

    fn item_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        self.topology_type.collect_properties(&mut properties);
        if let Some(count) = self.number_of_elements {
            properties.insert(NUMBER_OF_ELEMENTS_KEY.into(), count.to_string());
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

impl ReadItem for Topology {
    const ITEM_TAG: &'static str = "Topology";

    /// The shape is part of a topology's identity, so it is resolved before
    /// population.
    fn construct(properties: &PropertyMap) -> Result<Self, XdmfError> {
        if first_of(properties, &[TOPOLOGY_TYPE_KEY, LEGACY_TYPE_KEY]).is_none() {
            return Err(XdmfError::property(
                Self::ITEM_TAG,
                TOPOLOGY_TYPE_KEY,
                "required property is missing",
            ));
        }
        Ok(Self::new(TopologyType::lookup_by_properties(properties)?))
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
        self.number_of_elements = optional(properties, Self::ITEM_TAG, NUMBER_OF_ELEMENTS_KEY)?;
        populate_information(&mut self.information, children);
        self.data_items
            .extend(children.iter().filter_map(ItemRef::as_data_item).cloned());
        Ok(())
    }
}
