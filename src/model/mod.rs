//! Domain entities and the descriptor families they are typed by.

/// Name table for a fieldless descriptor enum: generates `ALL`, `as_str` and
/// a case-insensitive `parse`.
macro_rules! descriptor_names {
    ($ty:ident { $($variant:ident => $name:literal,)+ }) => {
        impl $ty {
            /// Every variant, in table order.
            pub const ALL: [$ty; [$($name),+].len()] = [$($ty::$variant),+];

            /// Canonical name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }

            /// Case-insensitive name lookup.
            pub fn parse(name: &str) -> Option<Self> {
                let name = name.trim();
                Self::ALL
                    .into_iter()
                    .find(|candidate| candidate.as_str().eq_ignore_ascii_case(name))
            }
        }
    };
}

pub mod attribute;
pub mod attribute_type;
pub mod cell_type;
pub mod data_item;
pub mod domain;
pub mod geometry;
pub mod geometry_type;
pub mod grid;
pub mod grid_collection;
pub mod information;
pub mod map;
pub mod set;
pub mod set_type;
pub mod time;
pub mod topology;
pub mod topology_type;

pub use attribute::Attribute;
pub use attribute_type::{AttributeCenter, AttributeType};
pub use cell_type::CellType;
pub use data_item::{DataFormat, DataItem};
pub use domain::Domain;
pub use geometry::Geometry;
pub use geometry_type::GeometryType;
pub use grid::Grid;
pub use grid_collection::{CollectionType, GridCollection};
pub use information::Information;
pub use map::Map;
pub use set::Set;
pub use set_type::SetType;
pub use time::Time;
pub use topology::Topology;
pub use topology_type::TopologyType;
