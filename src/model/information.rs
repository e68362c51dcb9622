//! Free-form key/value annotations attachable to any item.

use crate::graph::children::{ChildCollection, Named};
use crate::graph::item::{Item, ItemRef, ReadItem, populate_information, visit_all};
use crate::graph::properties::PropertyMap;
use crate::graph::reader::ReaderContext;
use crate::graph::visitor::Visitor;
use crate::xdmf_error::XdmfError;

/// A `Key`/`Value` annotation. May carry nested information.
#[derive(Debug, Clone, Default)]
pub struct Information {
    key: String,
    value: Option<String>,
    information: ChildCollection<Information>,
}

impl Information {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::keyed(key)
        }
    }

    /// An annotation with a key and no value.
    pub fn keyed(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            information: ChildCollection::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    pub fn clear_value(&mut self) {
        self.value = None;
    }
}

impl Named for Information {
    fn name(&self) -> &str {
        &self.key
    }
}

impl Item for Information {
    fn item_tag(&self) -> &'static str {
        Self::ITEM_TAG
    }

    fn item_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        properties.insert("Key".into(), self.key.clone());
        if let Some(value) = &self.value {
            properties.insert("Value".into(), value.clone());
        }
        properties
    }

    fn information(&self) -> &ChildCollection<Information> {
        &self.information
    }

    fn traverse(&self, visitor: &mut dyn Visitor) -> Result<(), XdmfError> {
        visit_all(visitor, &self.information)
    }
}

impl ReadItem for Information {
    const ITEM_TAG: &'static str = "Information";

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
        self.key = properties
            .get("Key")
            .cloned()
            .ok_or_else(|| XdmfError::property(Self::ITEM_TAG, "Key", "required property is missing"))?;
        self.value = properties.get("Value").cloned();
        populate_information(&mut self.information, children);
        Ok(())
    }
}
