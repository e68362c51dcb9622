//! Time stamp of a grid or grid collection.

use crate::graph::children::ChildCollection;
use crate::graph::item::{Item, ItemRef, ReadItem, populate_information, visit_all};
use crate::graph::properties::{PropertyMap, required};
use crate::graph::reader::ReaderContext;
use crate::graph::visitor::Visitor;
use crate::model::Information;
use crate::xdmf_error::XdmfError;

/// A single time value.
#[derive(Debug, Clone, Default)]
pub struct Time {
    value: f64,
    information: ChildCollection<Information>,
}

impl Time {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            information: ChildCollection::new(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}

impl Item for Time {
    fn item_tag(&self) -> &'static str {
        Self::ITEM_TAG
    }

    fn item_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        properties.insert("Value".into(), self.value.to_string());
        properties
    }

    fn information(&self) -> &ChildCollection<Information> {
        &self.information
    }

    fn traverse(&self, visitor: &mut dyn Visitor) -> Result<(), XdmfError> {
        visit_all(visitor, &self.information)
    }
}

impl ReadItem for Time {
    const ITEM_TAG: &'static str = "Time";

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
        self.value = required(properties, Self::ITEM_TAG, "Value")?;
        populate_information(&mut self.information, children);
        Ok(())
    }
}
