//! DataItem: the light-data description of a heavy-data array.
//!
//! A data item records shape, storage format and scalar type, and binds a
//! [`DataBuffer`] to whatever backend actually holds the values. Its text
//! content is the backend's reference (a file path, a dataset name, inline
//! values); on read the reader's [`HeavyDataResolver`](crate::data::HeavyDataResolver)
//! turns that text back into a binding when it can.
//!
//! Content is held trimmed of surrounding whitespace, the same form the XML
//! reader produces.

use std::sync::Arc;

use log::debug;

use crate::data::{DataBuffer, HeavyDataHandle, ScalarType};
use crate::graph::children::{ChildCollection, Named};
use crate::graph::item::{Item, ItemRef, ReadItem, populate_information, visit_all};
use crate::graph::properties::{PropertyMap, format_dimensions, parse_dimensions};
use crate::graph::reader::{CONTENT_KEY, ReaderContext};
use crate::graph::visitor::Visitor;
use crate::model::Information;
use crate::xdmf_error::XdmfError;

/// Storage format of the heavy data.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DataFormat {
    /// Values inline in the light data.
    #[default]
    Xml,
    /// HDF5 dataset reference.
    Hdf,
    /// Raw binary file reference.
    Binary,
}

descriptor_names!(DataFormat {
    Xml => "XML",
    Hdf => "HDF",
    Binary => "Binary",
});

/// Light-data description of one array.
#[derive(Debug, Clone, Default)]
pub struct DataItem {
    name: Option<String>,
    dimensions: Option<Vec<usize>>,
    format: DataFormat,
    scalar_type: Option<ScalarType>,
    content: Option<String>,
    buffer: DataBuffer,
    information: ChildCollection<Information>,
}

impl DataItem {
    /// An unnamed, unbound XML data item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`DataItem::set_name`].
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn dimensions(&self) -> Option<&[usize]> {
        self.dimensions.as_deref()
    }

    pub fn set_dimensions(&mut self, dimensions: Vec<usize>) {
        self.dimensions = Some(dimensions);
    }

    pub fn format(&self) -> DataFormat {
        self.format
    }

    pub fn set_format(&mut self, format: DataFormat) {
        self.format = format;
    }

    /// Declared scalar type, or the bound one once a handle is attached.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        self.buffer.scalar_type().or(self.scalar_type)
    }

    pub fn buffer(&self) -> &DataBuffer {
        &self.buffer
    }

    /// Bind heavy data. The handle's scalar type and reference replace the
    /// declared ones; dimensions default to the flat element count.
    pub fn bind(&mut self, handle: &Arc<dyn HeavyDataHandle>) {
        self.buffer.bind(handle);
        self.scalar_type = Some(handle.scalar_type());
        self.content = Some(handle.reference());
        if self.dimensions.is_none() {
            self.dimensions = Some(vec![handle.element_count()]);
        }
    }

    /// Builder form of [`DataItem::bind`].
    pub fn bound_to(mut self, handle: &Arc<dyn HeavyDataHandle>) -> Self {
        self.bind(handle);
        self
    }

    /// Text content: the live handle's reference, else the text read or
    /// recorded at the last bind.
    pub fn content(&self) -> Option<String> {
        match self.buffer.handle() {
            Ok(handle) => Some(handle.reference()),
            Err(_) => self.content.clone(),
        }
    }

    /// Replace the text content without touching the binding. Surrounding
    /// whitespace is dropped.
    pub fn set_content(&mut self, content: impl AsRef<str>) {
        self.content = Some(content.as_ref().trim().to_string());
    }
}

impl Named for DataItem {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

impl Item for DataItem {
    fn item_tag(&self) -> &'static str {
        Self::ITEM_TAG
    }

    fn item_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        if let Some(name) = &self.name {
            properties.insert("Name".into(), name.clone());
        }
        if let Some(dimensions) = &self.dimensions {
            properties.insert("Dimensions".into(), format_dimensions(dimensions));
        }
        properties.insert("Format".into(), self.format.as_str().into());
        if let Some(scalar_type) = self.scalar_type() {
            properties.insert("NumberType".into(), scalar_type.number_type().into());
            properties.insert("Precision".into(), scalar_type.precision());
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

impl ReadItem for DataItem {
    const ITEM_TAG: &'static str = "DataItem";

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
        context: &ReaderContext,
    ) -> Result<(), XdmfError> {
        let tag = Self::ITEM_TAG;
        self.name = properties.get("Name").cloned();
        self.dimensions = properties
            .get("Dimensions")
            .map(|raw| parse_dimensions(tag, "Dimensions", raw))
            .transpose()?;
        if let Some(raw) = properties.get("Format") {
            self.format = DataFormat::parse(raw)
                .ok_or_else(|| XdmfError::unknown_type("DataFormat", format!("name `{raw}`")))?;
        }
        let number_type = properties.get("NumberType").map(String::as_str);
        let precision = properties.get("Precision").map(String::as_str);
        self.scalar_type = match (number_type, precision) {
            (None, None) => None,
            (number_type, precision) => Some(
                ScalarType::from_xdmf(number_type.unwrap_or("Float"), precision).ok_or_else(
                    || {
                        XdmfError::property(
                            tag,
                            "NumberType",
                            format!(
                                "unsupported NumberType/Precision `{}`/`{}`",
                                number_type.unwrap_or("Float"),
                                precision.unwrap_or("-")
                            ),
                        )
                    },
                )?,
            ),
        };

        self.content = properties.get(CONTENT_KEY).map(|text| text.trim().to_string());
        if let Some(content) = &self.content {
            if let Some(handle) = context.resolve_heavy_data(content) {
                let scalar_type = self.scalar_type.unwrap_or_else(|| handle.scalar_type());
                debug!("bound DataItem to heavy data `{}`", handle.reference());
                self.buffer.bind_as(&handle, scalar_type);
                self.scalar_type = Some(scalar_type);
            }
        }
        populate_information(&mut self.information, children);
        Ok(())
    }
}
