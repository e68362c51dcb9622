//! Named selections of mesh entities.

use std::sync::Arc;

use crate::graph::children::{ChildCollection, Named};
use crate::graph::item::{Item, ItemRef, ReadItem, populate_information, visit_all};
use crate::graph::properties::{ItemProperty, PropertyMap};
use crate::graph::reader::ReaderContext;
use crate::graph::visitor::Visitor;
use crate::model::set_type::SET_TYPE_KEY;
use crate::model::{Attribute, DataItem, Information, SetType};
use crate::xdmf_error::XdmfError;

/// A subset of nodes, cells, faces or edges, optionally with its own
/// attributes.
#[derive(Debug, Clone)]
pub struct Set {
    name: Option<String>,
    set_type: SetType,
    data_items: ChildCollection<DataItem>,
    attributes: ChildCollection<Attribute>,
    information: ChildCollection<Information>,
}

impl Set {
    pub fn new(name: impl Into<String>, set_type: SetType) -> Self {
        Self::unnamed(set_type).with_name(name)
    }

    pub fn unnamed(set_type: SetType) -> Self {
        Self {
            name: None,
            set_type,
            data_items: ChildCollection::new(),
            attributes: ChildCollection::new(),
            information: ChildCollection::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn clear_name(&mut self) {
        self.name = None;
    }

    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    pub fn set_type(&self) -> SetType {
        self.set_type
    }

    pub fn set_set_type(&mut self, set_type: SetType) {
        self.set_type = set_type;
    }

    pub fn data_items(&self) -> &ChildCollection<DataItem> {
        &self.data_items
    }

    pub fn data_items_mut(&mut self) -> &mut ChildCollection<DataItem> {
        &mut self.data_items
    }

    pub fn attributes(&self) -> &ChildCollection<Attribute> {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut ChildCollection<Attribute> {
        &mut self.attributes
    }

    /// Builder form of appending a data item.
    pub fn with_data_item(mut self, data_item: impl Into<Arc<DataItem>>) -> Self {
        self.data_items.insert(data_item.into());
        self
    }
}

impl Named for Set {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

impl Item for Set {
    fn item_tag(&self) -> &'static str {
        Self::ITEM_TAG
    }

    fn item_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        if let Some(name) = &self.name {
            properties.insert("Name".into(), name.clone());
        }
        self.set_type.collect_properties(&mut properties);
        properties
    }

    fn information(&self) -> &ChildCollection<Information> {
        &self.information
    }

    fn traverse(&self, visitor: &mut dyn Visitor) -> Result<(), XdmfError> {
        visit_all(visitor, &self.information)?;
        visit_all(visitor, &self.data_items)?;
        visit_all(visitor, &self.attributes)
    }
}

impl ReadItem for Set {
    const ITEM_TAG: &'static str = "Set";

    fn construct(_properties: &PropertyMap) -> Result<Self, XdmfError> {
        Ok(Self::unnamed(SetType::NoSetType))
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
        self.set_type = SetType::from_properties(properties)?.ok_or_else(|| {
            XdmfError::property(Self::ITEM_TAG, SET_TYPE_KEY, "required property is missing")
        })?;
        populate_information(&mut self.information, children);
        for child in children {
            match child {
                ItemRef::DataItem(data_item) => self.data_items.insert(Arc::clone(data_item)),
                ItemRef::Attribute(attribute) => self.attributes.insert(Arc::clone(attribute)),
                _ => {}
            }
        }
        Ok(())
    }
}
