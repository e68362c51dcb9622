//! Top-level container of a document's grids.

use std::sync::Arc;

use crate::graph::children::{ChildCollection, Named};
use crate::graph::item::{Item, ItemRef, ReadItem, populate_information, visit_all};
use crate::graph::properties::PropertyMap;
use crate::graph::reader::ReaderContext;
use crate::graph::visitor::Visitor;
use crate::model::{Grid, GridCollection, Information};
use crate::xdmf_error::XdmfError;

#[derive(Debug, Clone, Default)]
pub struct Domain {
    name: Option<String>,
    grids: ChildCollection<Grid>,
    grid_collections: ChildCollection<GridCollection>,
    information: ChildCollection<Information>,
}

impl Domain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn grids(&self) -> &ChildCollection<Grid> {
        &self.grids
    }

    pub fn grids_mut(&mut self) -> &mut ChildCollection<Grid> {
        &mut self.grids
    }

    pub fn grid_collections(&self) -> &ChildCollection<GridCollection> {
        &self.grid_collections
    }

    pub fn grid_collections_mut(&mut self) -> &mut ChildCollection<GridCollection> {
        &mut self.grid_collections
    }

    /// Builder form of appending a grid.
    pub fn with_grid(mut self, grid: impl Into<Arc<Grid>>) -> Self {
        self.grids.insert(grid.into());
        self
    }
}

impl Named for Domain {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

impl Item for Domain {
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
        visit_all(visitor, &self.grids)?;
        visit_all(visitor, &self.grid_collections)
    }
}

impl ReadItem for Domain {
    const ITEM_TAG: &'static str = "Domain";

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
        for child in children {
            match child {
                ItemRef::Grid(grid) => self.grids.insert(Arc::clone(grid)),
                ItemRef::GridCollection(collection) => {
                    self.grid_collections.insert(Arc::clone(collection))
                }
                _ => {}
            }
        }
        Ok(())
    }
}
