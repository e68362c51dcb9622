//! Set type descriptor: which kind of mesh entity a set selects.

use serde::{Deserialize, Serialize};

use crate::graph::properties::{ItemProperty, PropertyMap, first_of};
use crate::xdmf_error::XdmfError;

/// Property key for the set type.
pub const SET_TYPE_KEY: &str = "SetType";

/// Entity kind selected by a set.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum SetType {
    /// Untyped set.
    NoSetType,
    /// Node set.
    Node,
    /// Cell set.
    Cell,
    /// Face set.
    Face,
    /// Edge set.
    Edge,
}

descriptor_names!(SetType {
    NoSetType => "None",
    Node => "Node",
    Cell => "Cell",
    Face => "Face",
    Edge => "Edge",
});

impl SetType {
    /// Resolve from `SetType` (or legacy `Type`). `None` if neither key is
    /// present; the caller decides whether that is an error.
    pub fn from_properties(properties: &PropertyMap) -> Result<Option<Self>, XdmfError> {
        first_of(properties, &[SET_TYPE_KEY, "Type"])
            .map(|name| {
                Self::parse(name)
                    .ok_or_else(|| XdmfError::unknown_type("SetType", format!("name `{name}`")))
            })
            .transpose()
    }
}

impl ItemProperty for SetType {
    fn collect_properties(&self, properties: &mut PropertyMap) {
        properties.insert(SET_TYPE_KEY.to_string(), self.as_str().to_string());
    }
}
