//! Geometry type descriptors: how node coordinates are laid out.

use serde::{Deserialize, Serialize};

use crate::graph::properties::{ItemProperty, PropertyMap, first_of};
use crate::xdmf_error::XdmfError;

/// Property key naming the geometry layout.
pub const GEOMETRY_TYPE_KEY: &str = "GeometryType";

/// Coordinate layout of a geometry.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum GeometryType {
    /// No coordinates.
    NoGeometryType,
    /// Interlaced x, y, z triples.
    #[default]
    Xyz,
    /// Interlaced x, y pairs.
    Xy,
    /// Radius and angle pairs.
    Polar,
    /// Radius, theta, phi triples.
    Spherical,
    /// Separate x, y and z arrays.
    XYZSeparate,
    /// Separate x and y arrays.
    XYSeparate,
    /// Rectilinear axis arrays.
    VxVyVz,
    /// Uniform 3-D grid: origin and spacing.
    OriginDxDyDz,
    /// Uniform 2-D grid: origin and spacing.
    OriginDxDy,
}

descriptor_names!(GeometryType {
    NoGeometryType => "None",
    Xyz => "XYZ",
    Xy => "XY",
    Polar => "Polar",
    Spherical => "Spherical",
    XYZSeparate => "X_Y_Z",
    XYSeparate => "X_Y",
    VxVyVz => "VXVYVZ",
    OriginDxDyDz => "ORIGIN_DXDYDZ",
    OriginDxDy => "ORIGIN_DXDY",
});

impl GeometryType {
    /// Spatial dimension of the coordinates.
    pub fn dimensions(self) -> u32 {
        match self {
            GeometryType::NoGeometryType => 0,
            GeometryType::Xy
            | GeometryType::Polar
            | GeometryType::XYSeparate
            | GeometryType::OriginDxDy => 2,
            GeometryType::Xyz
            | GeometryType::Spherical
            | GeometryType::XYZSeparate
            | GeometryType::VxVyVz
            | GeometryType::OriginDxDyDz => 3,
        }
    }

    /// Resolve from `GeometryType` (or legacy `Type`); absent means XYZ.
    pub fn from_properties(properties: &PropertyMap) -> Result<Self, XdmfError> {
        match first_of(properties, &[GEOMETRY_TYPE_KEY, "Type"]) {
            None => Ok(GeometryType::default()),
            Some(name) => Self::parse(name)
                .ok_or_else(|| XdmfError::unknown_type("GeometryType", format!("name `{name}`"))),
        }
    }
}

impl ItemProperty for GeometryType {
    fn collect_properties(&self, properties: &mut PropertyMap) {
        properties.insert(GEOMETRY_TYPE_KEY.to_string(), self.as_str().to_string());
    }
}
