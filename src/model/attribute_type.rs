//! Attribute descriptors: value rank and centering.

use serde::{Deserialize, Serialize};

use crate::graph::properties::{ItemProperty, PropertyMap, first_of};
use crate::xdmf_error::XdmfError;

/// Property key for the attribute rank.
pub const ATTRIBUTE_TYPE_KEY: &str = "AttributeType";
/// Property key for the attribute centering.
pub const CENTER_KEY: &str = "Center";

/// Rank of the values an attribute carries.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum AttributeType {
    /// One value per entity.
    #[default]
    Scalar,
    /// Three components per entity.
    Vector,
    /// Full 3x3 tensor.
    Tensor,
    /// Symmetric tensor, six components.
    Tensor6,
    /// Arbitrary rows x columns.
    Matrix,
    /// Global entity IDs.
    GlobalId,
    /// Untyped.
    NoAttributeType,
}

descriptor_names!(AttributeType {
    Scalar => "Scalar",
    Vector => "Vector",
    Tensor => "Tensor",
    Tensor6 => "Tensor6",
    Matrix => "Matrix",
    GlobalId => "GlobalId",
    NoAttributeType => "None",
});

impl AttributeType {
    /// Resolve from `AttributeType` (or legacy `Type`); absent means Scalar.
    pub fn from_properties(properties: &PropertyMap) -> Result<Self, XdmfError> {
        match first_of(properties, &[ATTRIBUTE_TYPE_KEY, "Type"]) {
            None => Ok(AttributeType::default()),
            Some(name) => Self::parse(name)
                .ok_or_else(|| XdmfError::unknown_type("AttributeType", format!("name `{name}`"))),
        }
    }
}

impl ItemProperty for AttributeType {
    fn collect_properties(&self, properties: &mut PropertyMap) {
        properties.insert(ATTRIBUTE_TYPE_KEY.to_string(), self.as_str().to_string());
    }
}

/// Mesh entity an attribute's values live on.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum AttributeCenter {
    /// One value for the whole grid.
    Grid,
    /// One value per cell.
    Cell,
    /// One value per face.
    Face,
    /// One value per edge.
    Edge,
    /// One value per node.
    #[default]
    Node,
}

descriptor_names!(AttributeCenter {
    Grid => "Grid",
    Cell => "Cell",
    Face => "Face",
    Edge => "Edge",
    Node => "Node",
});

impl AttributeCenter {
    /// Resolve from `Center`; absent means Node.
    pub fn from_properties(properties: &PropertyMap) -> Result<Self, XdmfError> {
        match properties.get(CENTER_KEY) {
            None => Ok(AttributeCenter::default()),
            Some(name) => Self::parse(name).ok_or_else(|| {
                XdmfError::unknown_type("AttributeCenter", format!("name `{name}`"))
            }),
        }
    }
}

impl ItemProperty for AttributeCenter {
    fn collect_properties(&self, properties: &mut PropertyMap) {
        properties.insert(CENTER_KEY.to_string(), self.as_str().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_parse_back() {
        for t in AttributeType::ALL {
            assert_eq!(AttributeType::parse(t.as_str()), Some(t));
        }
        for c in AttributeCenter::ALL {
            assert_eq!(AttributeCenter::parse(c.as_str()), Some(c));
        }
        assert_eq!(AttributeType::parse("tensor6"), Some(AttributeType::Tensor6));
    }

    #[test]
    fn legacy_key_and_defaults() {
        let mut props = PropertyMap::new();
        assert_eq!(
            AttributeCenter::from_properties(&props).unwrap(),
            AttributeCenter::Node
        );
        props.insert("Type".into(), "Vector".into());
        assert_eq!(
            AttributeType::from_properties(&props).unwrap(),
            AttributeType::Vector
        );
        props.insert("Center".into(), "Vertex".into());
        assert!(AttributeCenter::from_properties(&props).is_err());
    }
}
