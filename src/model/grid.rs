//! Uniform grid: one geometry, one topology and the fields defined on them.
//!
//! A grid read from a document may lack its geometry or topology; that is
//! only reported when the missing part is asked for (`geometry`,
//! `topology`) or when the grid is written.

use std::sync::Arc;

use log::warn;

use crate::graph::children::{ChildCollection, Named};
use crate::graph::item::{Item, ItemRef, ReadItem, populate_information, visit_all, visit_opt};
use crate::graph::properties::PropertyMap;
use crate::graph::reader::ReaderContext;
use crate::graph::visitor::Visitor;
use crate::model::{Attribute, Geometry, Information, Map, Set, Time, Topology};
use crate::xdmf_error::XdmfError;

/// Property key distinguishing uniform grids from collections.
pub const GRID_TYPE_KEY: &str = "GridType";

const DEFAULT_NAME: &str = "Grid";

/// A single uniform grid.
#[derive(Debug, Clone)]
pub struct Grid {
    name: String,
    geometry: Option<Arc<Geometry>>,
    topology: Option<Arc<Topology>>,
    time: Option<Arc<Time>>,
    attributes: ChildCollection<Attribute>,
    sets: ChildCollection<Set>,
    maps: ChildCollection<Map>,
    information: ChildCollection<Information>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_NAME)
    }
}

impl Grid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geometry: None,
            topology: None,
            time: None,
            attributes: ChildCollection::new(),
            sets: ChildCollection::new(),
            maps: ChildCollection::new(),
            information: ChildCollection::new(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The grid's geometry.
    ///
    /// # Errors
    /// `LatentStructural` if the grid has none.
    pub fn geometry(&self) -> Result<&Arc<Geometry>, XdmfError> {
        self.geometry.as_ref().ok_or(XdmfError::LatentStructural {
            tag: Self::ITEM_TAG,
            missing: "geometry",
        })
    }

    /// The grid's topology.
    ///
    /// # Errors
    /// `LatentStructural` if the grid has none.
    pub fn topology(&self) -> Result<&Arc<Topology>, XdmfError> {
        self.topology.as_ref().ok_or(XdmfError::LatentStructural {
            tag: Self::ITEM_TAG,
            missing: "topology",
        })
    }

    /// Replace the geometry, returning the previous one.
    pub fn set_geometry(&mut self, geometry: impl Into<Arc<Geometry>>) -> Option<Arc<Geometry>> {
        self.geometry.replace(geometry.into())
    }

    /// Replace the topology, returning the previous one.
    pub fn set_topology(&mut self, topology: impl Into<Arc<Topology>>) -> Option<Arc<Topology>> {
        self.topology.replace(topology.into())
    }

    pub fn time(&self) -> Option<&Arc<Time>> {
        self.time.as_ref()
    }

    pub fn set_time(&mut self, time: impl Into<Arc<Time>>) -> Option<Arc<Time>> {
        self.time.replace(time.into())
    }

    pub fn attributes(&self) -> &ChildCollection<Attribute> {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut ChildCollection<Attribute> {
        &mut self.attributes
    }

    pub fn sets(&self) -> &ChildCollection<Set> {
        &self.sets
    }

    pub fn sets_mut(&mut self) -> &mut ChildCollection<Set> {
        &mut self.sets
    }

    pub fn maps(&self) -> &ChildCollection<Map> {
        &self.maps
    }

    pub fn maps_mut(&mut self) -> &mut ChildCollection<Map> {
        &mut self.maps
    }
}

impl Named for Grid {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Item for Grid {
    fn item_tag(&self) -> &'static str {
        Self::ITEM_TAG
    }

    fn item_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        properties.insert("Name".into(), self.name.clone());
        properties.insert(GRID_TYPE_KEY.into(), "Uniform".into());
        properties
    }

    fn information(&self) -> &ChildCollection<Information> {
        &self.information
    }

    fn traverse(&self, visitor: &mut dyn Visitor) -> Result<(), XdmfError> {
        visit_all(visitor, &self.information)?;
        visit_opt(visitor, self.time.as_ref())?;
        visit_opt(visitor, self.geometry.as_ref())?;
        visit_opt(visitor, self.topology.as_ref())?;
        visit_all(visitor, &self.attributes)?;
        visit_all(visitor, &self.sets)?;
        visit_all(visitor, &self.maps)
    }

    fn validate_structure(&self) -> Result<(), XdmfError> {
        self.geometry()?;
        self.topology()?;
        Ok(())
    }
}

impl ReadItem for Grid {
    const ITEM_TAG: &'static str = "Grid";

    fn construct(_properties: &PropertyMap) -> Result<Self, XdmfError> {
        Ok(Self::default())
    }

    fn information_mut(&mut self) -> &mut ChildCollection<Information> {
        &mut self.information
    }

    /// First geometry and first topology win; further ones are dropped
    /// with a warning. A missing geometry or topology is left for
    /// [`Item::validate_structure`] to report.
    fn populate_item(
        &mut self,
        properties: &PropertyMap,
        children: &[ItemRef],
        _context: &ReaderContext,
    ) -> Result<(), XdmfError> {
        if let Some(name) = properties.get("Name") {
            self.name = name.clone();
        }
        populate_information(&mut self.information, children);
        for child in children {
            match child {
                ItemRef::Geometry(geometry) if self.geometry.is_none() => {
                    self.geometry = Some(Arc::clone(geometry));
                }
                ItemRef::Topology(topology) if self.topology.is_none() => {
                    self.topology = Some(Arc::clone(topology));
                }
                ItemRef::Time(time) if self.time.is_none() => {
                    self.time = Some(Arc::clone(time));
                }
                ItemRef::Geometry(_) | ItemRef::Topology(_) | ItemRef::Time(_) => {
                    warn!("grid `{}`: ignoring extra {} child", self.name, child.tag());
                }
                ItemRef::Attribute(attribute) => self.attributes.insert(Arc::clone(attribute)),
                ItemRef::Set(set) => self.sets.insert(Arc::clone(set)),
                ItemRef::Map(map) => self.maps.insert(Arc::clone(map)),
                _ => {}
            }
        }
        Ok(())
    }
}
