//! Field values attached to a grid's entities.

use std::sync::Arc;

use crate::graph::children::{ChildCollection, Named};
use crate::graph::item::{Item, ItemRef, ReadItem, populate_information, visit_all};
use crate::graph::properties::{ItemProperty, PropertyMap};
use crate::graph::reader::ReaderContext;
use crate::graph::visitor::Visitor;
use crate::model::{AttributeCenter, AttributeType, DataItem, Information};
use crate::xdmf_error::XdmfError;

/// A named field: rank, centering and the data items holding its values.
#[derive(Debug, Clone, Default)]
pub struct Attribute {
    name: String,
    attribute_type: AttributeType,
    center: AttributeCenter,
    data_items: ChildCollection<DataItem>,
    information: ChildCollection<Information>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, attribute_type: AttributeType, center: AttributeCenter) -> Self {
        Self {
            name: name.into(),
            attribute_type,
            center,
            ..Self::default()
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    pub fn set_attribute_type(&mut self, attribute_type: AttributeType) {
        self.attribute_type = attribute_type;
    }

    pub fn center(&self) -> AttributeCenter {
        self.center
    }

    pub fn set_center(&mut self, center: AttributeCenter) {
        self.center = center;
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

impl Named for Attribute {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Item for Attribute {
    fn item_tag(&self) -> &'static str {
        Self::ITEM_TAG
    }

    fn item_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        properties.insert("Name".into(), self.name.clone());
        self.attribute_type.collect_properties(&mut properties);
        self.center.collect_properties(&mut properties);
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

impl ReadItem for Attribute {
    const ITEM_TAG: &'static str = "Attribute";

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
        self.name = properties
            .get("Name")
            .cloned()
            .ok_or_else(|| XdmfError::property(Self::ITEM_TAG, "Name", "required property is missing"))?;
        self.attribute_type = AttributeType::from_properties(properties)?;
        self.center = AttributeCenter::from_properties(properties)?;
        populate_information(&mut self.information, children);
        self.data_items
            .extend(children.iter().filter_map(ItemRef::as_data_item).cloned());
        Ok(())
    }
}
