//! Collections of grids: spatial partitions or time series.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::graph::children::{ChildCollection, Named};
use crate::graph::item::{Item, ItemRef, ReadItem, populate_information, visit_all, visit_opt};
use crate::graph::properties::{ItemProperty, PropertyMap};
use crate::graph::reader::ReaderContext;
use crate::graph::visitor::Visitor;
use crate::model::grid::GRID_TYPE_KEY;
use crate::model::{Grid, Information, Time};
use crate::xdmf_error::XdmfError;

/// Property key for the collection kind.
pub const COLLECTION_TYPE_KEY: &str = "CollectionType";

const DEFAULT_NAME: &str = "Collection";

/// How the members of a collection relate.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CollectionType {
    /// Members partition space.
    Spatial,
    /// Members are successive time steps.
    Temporal,
}

descriptor_names!(CollectionType {
    Spatial => "Spatial",
    Temporal => "Temporal",
});

impl ItemProperty for CollectionType {
    fn collect_properties(&self, properties: &mut PropertyMap) {
        properties.insert(COLLECTION_TYPE_KEY.into(), self.as_str().into());
    }
}

/// A `Grid` element with `GridType="Collection"`.
///
/// Member grids and nested collections are kept in separate collections,
/// so a mixed member list is written back grids first.
#[derive(Debug, Clone)]
pub struct GridCollection {
    name: String,
    collection_type: Option<CollectionType>,
    time: Option<Arc<Time>>,
    grids: ChildCollection<Grid>,
    collections: ChildCollection<GridCollection>,
    information: ChildCollection<Information>,
}

impl Default for GridCollection {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, None)
    }
}

impl GridCollection {
    pub fn new(name: impl Into<String>, collection_type: Option<CollectionType>) -> Self {
        Self {
            name: name.into(),
            collection_type,
            time: None,
            grids: ChildCollection::new(),
            collections: ChildCollection::new(),
            information: ChildCollection::new(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn collection_type(&self) -> Option<CollectionType> {
        self.collection_type
    }

    pub fn set_collection_type(&mut self, collection_type: Option<CollectionType>) {
        self.collection_type = collection_type;
    }

    pub fn time(&self) -> Option<&Arc<Time>> {
        self.time.as_ref()
    }

    pub fn set_time(&mut self, time: impl Into<Arc<Time>>) -> Option<Arc<Time>> {
        self.time.replace(time.into())
    }

    pub fn grids(&self) -> &ChildCollection<Grid> {
        &self.grids
    }

    pub fn grids_mut(&mut self) -> &mut ChildCollection<Grid> {
        &mut self.grids
    }

    pub fn collections(&self) -> &ChildCollection<GridCollection> {
        &self.collections
    }

    pub fn collections_mut(&mut self) -> &mut ChildCollection<GridCollection> {
        &mut self.collections
    }
}

impl Named for GridCollection {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Item for GridCollection {
    fn item_tag(&self) -> &'static str {
        Self::ITEM_TAG
    }

    fn item_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        properties.insert("Name".into(), self.name.clone());
        properties.insert(GRID_TYPE_KEY.into(), "Collection".into());
        if let Some(collection_type) = self.collection_type {
            collection_type.collect_properties(&mut properties);
        }
        properties
    }

    fn information(&self) -> &ChildCollection<Information> {
        &self.information
    }

    fn traverse(&self, visitor: &mut dyn Visitor) -> Result<(), XdmfError> {
        visit_all(visitor, &self.information)?;
        visit_opt(visitor, self.time.as_ref())?;
        visit_all(visitor, &self.grids)?;
        visit_all(visitor, &self.collections)
    }
}

impl ReadItem for GridCollection {
    const ITEM_TAG: &'static str = "Grid";

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
        if let Some(name) = properties.get("Name") {
            self.name = name.clone();
        }
        self.collection_type = properties
            .get(COLLECTION_TYPE_KEY)
            .map(|raw| {
                CollectionType::parse(raw).ok_or_else(|| {
                    XdmfError::unknown_type("CollectionType", format!("name `{raw}`"))
                })
            })
            .transpose()?;
        populate_information(&mut self.information, children);
        for child in children {
            match child {
                ItemRef::Time(time) if self.time.is_none() => self.time = Some(Arc::clone(time)),
                ItemRef::Grid(grid) => self.grids.insert(Arc::clone(grid)),
                ItemRef::GridCollection(nested) => self.collections.insert(Arc::clone(nested)),
                _ => {}
            }
        }
        Ok(())
    }
}
