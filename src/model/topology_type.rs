//! Topology type registry: the element-shape descriptors.
//!
//! Every fixed shape is a process-wide singleton created on first use and
//! never mutated; the named accessors hand out clones of the same `Arc`, so
//! two calls to [`TopologyType::triangle`] are `Arc::ptr_eq`. Descriptors
//! compare equal iff their IDs are equal.
//!
//! The ID namespace below is stable across format versions and must not be
//! renumbered:
//!
//! | ID     | Name            | ID     | Name             |
//! |--------|-----------------|--------|------------------|
//! | `0x0`  | NoTopology      | `0x29` | Wedge_18         |
//! | `0x1`  | Polyvertex      | `0x30` | Hexahedron_20    |
//! | `0x2`  | Polyline        | `0x31` | Hexahedron_24    |
//! | `0x3`  | Polygon         | `0x32` | Hexahedron_27    |
//! | `0x4`  | Triangle        | `0x33` | Hexahedron_64    |
//! | `0x5`  | Quadrilateral   | `0x34` | Hexahedron_125   |
//! | `0x6`  | Tetrahedron     | `0x35` | Hexahedron_216   |
//! | `0x7`  | Pyramid         | `0x36` | Hexahedron_343   |
//! | `0x8`  | Wedge           | `0x37` | Hexahedron_512   |
//! | `0x9`  | Hexahedron      | `0x38` | Hexahedron_729   |
//! | `0x22` | Edge_3          | `0x39` | Hexahedron_1000  |
//! | `0x23` | Quadrilateral_9 | `0x40` | Hexahedron_1331  |
//! | `0x24` | Triangle_6      | `0x70` | Mixed            |
//! | `0x25` | Quadrilateral_8 |        |                  |
//! | `0x26` | Tetrahedron_10  |        |                  |
//! | `0x27` | Pyramid_13      |        |                  |
//! | `0x28` | Wedge_15        |        |                  |
//!
//! Polyline and Polygon are parameterized by their node count: the
//! registry entry for their ID carries a node count of zero, and
//! [`TopologyType::polyline`] / [`TopologyType::polygon`] construct a fresh
//! descriptor for each requested count. Two-dimensional shapes report zero
//! faces.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::graph::properties::{ItemProperty, PropertyMap, first_of, required};
use crate::model::cell_type::CellType;
use crate::xdmf_error::XdmfError;

const FAMILY: &str = "TopologyType";

/// Property key naming the shape.
pub const TOPOLOGY_TYPE_KEY: &str = "TopologyType";
/// Legacy spelling of [`TOPOLOGY_TYPE_KEY`] accepted on read.
pub const LEGACY_TYPE_KEY: &str = "Type";
/// Property key carrying the node count of parameterized shapes.
pub const NODES_PER_ELEMENT_KEY: &str = "NodesPerElement";

/// Immutable element-shape descriptor.
#[derive(Clone, Debug)]
pub struct TopologyType {
    id: u32,
    name: &'static str,
    nodes_per_element: u32,
    faces_per_element: u32,
    edges_per_element: u32,
    cell_type: CellType,
}

macro_rules! fixed_topology_types {
    ($($accessor:ident, $id_const:ident = $id:literal, $name:literal, $nodes:literal, $faces:literal, $edges:literal, $cell:ident;)*) => {
        /// Stable descriptor IDs.
        pub mod ids {
            $(#[doc = concat!("ID of `", $name, "`.")]
            pub const $id_const: u32 = $id;)*
        }

        mod singletons {
            use super::*;
            $(pub(super) static $id_const: Lazy<Arc<TopologyType>> = Lazy::new(|| {
                Arc::new(TopologyType {
                    id: $id,
                    name: $name,
                    nodes_per_element: $nodes,
                    faces_per_element: $faces,
                    edges_per_element: $edges,
                    cell_type: CellType::$cell,
                })
            });)*
        }

        impl TopologyType {
            $(#[doc = concat!("The `", $name, "` descriptor.")]
            pub fn $accessor() -> Arc<TopologyType> {
                Arc::clone(&singletons::$id_const)
            })*
        }

        static REGISTRY: Lazy<BTreeMap<u32, Arc<TopologyType>>> = Lazy::new(|| {
            [$(TopologyType::$accessor()),*]
                .into_iter()
                .map(|descriptor| (descriptor.id, descriptor))
                .collect()
        });
    };
}

fixed_topology_types! {
    no_topology_type, NO_TOPOLOGY_TYPE = 0x0, "NoTopology", 0, 0, 0, NoCellType;
    polyvertex, POLYVERTEX = 0x1, "Polyvertex", 1, 0, 0, Linear;
    polyline_family, POLYLINE = 0x2, "Polyline", 0, 0, 0, Linear;
    polygon_family, POLYGON = 0x3, "Polygon", 0, 0, 0, Linear;
    triangle, TRIANGLE = 0x4, "Triangle", 3, 0, 3, Linear;
    quadrilateral, QUADRILATERAL = 0x5, "Quadrilateral", 4, 0, 4, Linear;
    tetrahedron, TETRAHEDRON = 0x6, "Tetrahedron", 4, 4, 6, Linear;
    pyramid, PYRAMID = 0x7, "Pyramid", 5, 5, 8, Linear;
    wedge, WEDGE = 0x8, "Wedge", 6, 5, 9, Linear;
    hexahedron, HEXAHEDRON = 0x9, "Hexahedron", 8, 6, 12, Linear;
    edge_3, EDGE_3 = 0x22, "Edge_3", 3, 0, 1, Quadratic;
    quadrilateral_9, QUADRILATERAL_9 = 0x23, "Quadrilateral_9", 9, 0, 4, Quadratic;
    triangle_6, TRIANGLE_6 = 0x24, "Triangle_6", 6, 0, 3, Quadratic;
    quadrilateral_8, QUADRILATERAL_8 = 0x25, "Quadrilateral_8", 8, 0, 4, Quadratic;
    tetrahedron_10, TETRAHEDRON_10 = 0x26, "Tetrahedron_10", 10, 4, 6, Quadratic;
    pyramid_13, PYRAMID_13 = 0x27, "Pyramid_13", 13, 5, 8, Quadratic;
    wedge_15, WEDGE_15 = 0x28, "Wedge_15", 15, 5, 9, Quadratic;
    wedge_18, WEDGE_18 = 0x29, "Wedge_18", 18, 5, 9, Quadratic;
    hexahedron_20, HEXAHEDRON_20 = 0x30, "Hexahedron_20", 20, 6, 12, Quadratic;
    hexahedron_24, HEXAHEDRON_24 = 0x31, "Hexahedron_24", 24, 6, 12, Quadratic;
    hexahedron_27, HEXAHEDRON_27 = 0x32, "Hexahedron_27", 27, 6, 12, Quadratic;
    hexahedron_64, HEXAHEDRON_64 = 0x33, "Hexahedron_64", 64, 6, 12, Cubic;
    hexahedron_125, HEXAHEDRON_125 = 0x34, "Hexahedron_125", 125, 6, 12, Quartic;
    hexahedron_216, HEXAHEDRON_216 = 0x35, "Hexahedron_216", 216, 6, 12, Quintic;
    hexahedron_343, HEXAHEDRON_343 = 0x36, "Hexahedron_343", 343, 6, 12, Sextic;
    hexahedron_512, HEXAHEDRON_512 = 0x37, "Hexahedron_512", 512, 6, 12, Septic;
    hexahedron_729, HEXAHEDRON_729 = 0x38, "Hexahedron_729", 729, 6, 12, Octic;
    hexahedron_1000, HEXAHEDRON_1000 = 0x39, "Hexahedron_1000", 1000, 6, 12, Nonic;
    hexahedron_1331, HEXAHEDRON_1331 = 0x40, "Hexahedron_1331", 1331, 6, 12, Decic;
    mixed, MIXED = 0x70, "Mixed", 0, 0, 0, Arbitrary;
}

static BY_NAME: Lazy<BTreeMap<String, Arc<TopologyType>>> = Lazy::new(|| {
    REGISTRY
        .values()
        .map(|descriptor| (descriptor.name.to_ascii_uppercase(), Arc::clone(descriptor)))
        .collect()
});

impl TopologyType {
    /// Polyline with `nodes_per_element` nodes. Constructed on every call.
    pub fn polyline(nodes_per_element: u32) -> Arc<TopologyType> {
        Arc::new(TopologyType {
            id: ids::POLYLINE,
            name: "Polyline",
            nodes_per_element,
            faces_per_element: 0,
            edges_per_element: nodes_per_element.saturating_sub(1),
            cell_type: CellType::Linear,
        })
    }

    /// Polygon with `nodes_per_element` nodes. Constructed on every call.
    pub fn polygon(nodes_per_element: u32) -> Arc<TopologyType> {
        Arc::new(TopologyType {
            id: ids::POLYGON,
            name: "Polygon",
            nodes_per_element,
            faces_per_element: 0,
            edges_per_element: nodes_per_element,
            cell_type: CellType::Linear,
        })
    }

    /// Registry lookup by stable ID.
    pub fn lookup_by_id(id: u32) -> Result<Arc<TopologyType>, XdmfError> {
        REGISTRY
            .get(&id)
            .cloned()
            .ok_or_else(|| XdmfError::unknown_type(FAMILY, format!("id {id:#x}")))
    }

    /// Resolve the descriptor encoded in a property map.
    ///
    /// The shape name is read from `TopologyType` (or the legacy `Type`) and
    /// matched case-insensitively. Polyline and Polygon additionally require
    /// `NodesPerElement`; a missing or malformed count is a
    /// [`XdmfError::Reconstruction`], an unknown name an
    /// [`XdmfError::UnknownType`].
    pub fn lookup_by_properties(properties: &PropertyMap) -> Result<Arc<TopologyType>, XdmfError> {
        let name = first_of(properties, &[TOPOLOGY_TYPE_KEY, LEGACY_TYPE_KEY])
            .ok_or_else(|| XdmfError::unknown_type(FAMILY, "no TopologyType property"))?;
        let descriptor = BY_NAME
            .get(&name.trim().to_ascii_uppercase())
            .ok_or_else(|| XdmfError::unknown_type(FAMILY, format!("name `{name}`")))?;
        match descriptor.id {
            ids::POLYLINE | ids::POLYGON => {
                let nodes = required::<u32>(properties, "Topology", NODES_PER_ELEMENT_KEY)?;
                Ok(if descriptor.id == ids::POLYLINE {
                    Self::polyline(nodes)
                } else {
                    Self::polygon(nodes)
                })
            }
            _ => Ok(Arc::clone(descriptor)),
        }
    }

    /// All registered IDs in ascending order.
    pub fn registered_ids() -> impl Iterator<Item = u32> {
        REGISTRY.keys().copied()
    }

    /// Stable ID.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Nodes per element; zero for Mixed and the unparameterized families.
    pub fn nodes_per_element(&self) -> u32 {
        self.nodes_per_element
    }

    /// Faces per element; zero for shapes of dimension below three.
    pub fn faces_per_element(&self) -> u32 {
        self.faces_per_element
    }

    /// Edges per element.
    pub fn edges_per_element(&self) -> u32 {
        self.edges_per_element
    }

    /// Coarse shape category.
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// True for the families whose node count is a parameter.
    pub fn is_parameterized(&self) -> bool {
        matches!(self.id, ids::POLYLINE | ids::POLYGON)
    }
}

impl PartialEq for TopologyType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TopologyType {}

impl Hash for TopologyType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl ItemProperty for TopologyType {
    fn collect_properties(&self, properties: &mut PropertyMap) {
        properties.insert(TOPOLOGY_TYPE_KEY.to_string(), self.name.to_string());
        if self.is_parameterized() {
            properties.insert(
                NODES_PER_ELEMENT_KEY.to_string(),
                self.nodes_per_element.to_string(),
            );
        }
    }
}
