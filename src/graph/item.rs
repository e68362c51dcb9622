//! The polymorphic item abstraction.
//!
//! [`Item`] is the object-safe face of every graph node: it reports a tag,
//! computes its property map from typed state and forwards a [`Visitor`] to
//! its children. [`ItemRef`] is the closed sum over the built-in node types
//! (plus an open `Custom` arm), so visitors learn the concrete type with a
//! `match` instead of a second dispatch.
//!
//! [`ReadItem`] is the read half: a type constructs an empty instance from
//! its properties, then fills itself from already-built children.

use std::fmt;
use std::sync::Arc;

use crate::graph::children::ChildCollection;
use crate::graph::properties::PropertyMap;
use crate::graph::reader::ReaderContext;
use crate::graph::visitor::Visitor;
use crate::model::{
    Attribute, DataItem, Domain, Geometry, Grid, GridCollection, Information, Map, Set, Time,
    Topology,
};
use crate::xdmf_error::XdmfError;

/// A node of the item graph.
pub trait Item: fmt::Debug + Send + Sync {
    /// Element tag; fixed per concrete type.
    fn item_tag(&self) -> &'static str;

    /// Fresh snapshot of the properties derived from typed state.
    fn item_properties(&self) -> PropertyMap;

    /// Information children attached to this node.
    fn information(&self) -> &ChildCollection<Information>;

    /// Hand `visitor` every owned child: information first, then the
    /// type-specific children in declaration order.
    fn traverse(&self, visitor: &mut dyn Visitor) -> Result<(), XdmfError>;

    /// Check parts that may legitimately be missing after a read but must
    /// be present before the node is written.
    fn validate_structure(&self) -> Result<(), XdmfError> {
        Ok(())
    }
}

/// Read-side construction contract.
pub trait ReadItem: Item + Sized + 'static {
    /// Tag this type is registered under.
    const ITEM_TAG: &'static str;

    /// Build a valid, empty instance. Types whose identity depends on a
    /// property (a topology's shape) resolve it here.
    fn construct(properties: &PropertyMap) -> Result<Self, XdmfError>;

    /// Mutable access to the information children.
    fn information_mut(&mut self) -> &mut ChildCollection<Information>;

    /// Fill in state from `properties` and the already-built `children`.
    ///
    /// The default only collects [`Information`] children. Overrides parse
    /// their own properties, call [`populate_information`] and sort the
    /// remaining children by variant, ignoring the ones they do not know.
    fn populate_item(
        &mut self,
        _properties: &PropertyMap,
        children: &[ItemRef],
        _context: &ReaderContext,
    ) -> Result<(), XdmfError> {
        populate_information(self.information_mut(), children);
        Ok(())
    }
}

/// Collect the information children out of `children`.
pub fn populate_information(information: &mut ChildCollection<Information>, children: &[ItemRef]) {
    information.extend(children.iter().filter_map(ItemRef::as_information).cloned());
}

/// Visit every element of `collection` in order.
pub fn visit_all<T>(
    visitor: &mut dyn Visitor,
    collection: &ChildCollection<T>,
) -> Result<(), XdmfError>
where
    ItemRef: From<Arc<T>>,
{
    for child in collection {
        visitor.visit(&ItemRef::from(Arc::clone(child)))?;
    }
    Ok(())
}

/// Visit a single optional child.
pub fn visit_opt<T>(visitor: &mut dyn Visitor, child: Option<&Arc<T>>) -> Result<(), XdmfError>
where
    ItemRef: From<Arc<T>>,
{
    match child {
        Some(child) => visitor.visit(&ItemRef::from(Arc::clone(child))),
        None => Ok(()),
    }
}

macro_rules! item_refs {
    ($($variant:ident($ty:ty) => $as_fn:ident;)*) => {
        /// Shared handle to any graph node.
        #[derive(Clone, Debug)]
        pub enum ItemRef {
            $(
                #[doc = concat!("A `", stringify!($variant), "` node.")]
                $variant(Arc<$ty>),
            )*
            /// A node type registered by downstream code.
            Custom(Arc<dyn Item>),
        }

        impl ItemRef {
            /// The node as a trait object.
            pub fn as_item(&self) -> &dyn Item {
                match self {
                    $(ItemRef::$variant(item) => item.as_ref(),)*
                    ItemRef::Custom(item) => item.as_ref(),
                }
            }

            /// Address of the shared allocation; equal for handles to the
            /// same node.
            pub fn identity(&self) -> usize {
                match self {
                    $(ItemRef::$variant(item) => Arc::as_ptr(item) as *const () as usize,)*
                    ItemRef::Custom(item) => Arc::as_ptr(item) as *const () as usize,
                }
            }

            $(
                #[doc = concat!("The `", stringify!($variant), "` behind this handle, if it is one.")]
                pub fn $as_fn(&self) -> Option<&Arc<$ty>> {
                    match self {
                        ItemRef::$variant(item) => Some(item),
                        _ => None,
                    }
                }
            )*
        }

        $(
            impl From<Arc<$ty>> for ItemRef {
                fn from(item: Arc<$ty>) -> Self {
                    ItemRef::$variant(item)
                }
            }

            impl From<$ty> for ItemRef {
                fn from(item: $ty) -> Self {
                    ItemRef::$variant(Arc::new(item))
                }
            }
        )*
    };
}

item_refs! {
    Information(Information) => as_information;
    DataItem(DataItem) => as_data_item;
    Time(Time) => as_time;
    Geometry(Geometry) => as_geometry;
    Topology(Topology) => as_topology;
    Attribute(Attribute) => as_attribute;
    Set(Set) => as_set;
    Map(Map) => as_map;
    Grid(Grid) => as_grid;
    GridCollection(GridCollection) => as_grid_collection;
    Domain(Domain) => as_domain;
}

impl From<Arc<dyn Item>> for ItemRef {
    fn from(item: Arc<dyn Item>) -> Self {
        ItemRef::Custom(item)
    }
}

impl ItemRef {
    /// Tag of the node.
    pub fn tag(&self) -> &'static str {
        self.as_item().item_tag()
    }

    /// Property snapshot of the node.
    pub fn properties(&self) -> PropertyMap {
        self.as_item().item_properties()
    }

    /// Forward `visitor` to the node's children.
    pub fn traverse(&self, visitor: &mut dyn Visitor) -> Result<(), XdmfError> {
        self.as_item().traverse(visitor)
    }

    /// True if both handles point at the same node.
    pub fn ptr_eq(&self, other: &ItemRef) -> bool {
        self.identity() == other.identity()
    }
}

static_assertions::assert_impl_all!(ItemRef: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Information;

    #[test]
    fn conversions_pick_the_matching_variant() {
        let info = Arc::new(Information::new("units", "m"));
        let item = ItemRef::from(Arc::clone(&info));
        assert_eq!(item.tag(), "Information");
        assert!(item.as_information().is_some());
        assert!(item.as_grid().is_none());
        assert!(item.ptr_eq(&ItemRef::Information(info)));
    }

    #[test]
    fn distinct_nodes_have_distinct_identity() {
        let a = ItemRef::from(Information::new("k", "v"));
        let b = ItemRef::from(Information::new("k", "v"));
        assert!(!a.ptr_eq(&b));
        assert_eq!(a.properties(), b.properties());
    }

    #[test]
    fn populate_information_keeps_order_and_skips_others() {
        let children = vec![
            ItemRef::from(Information::new("a", "1")),
            ItemRef::from(crate::model::Time::new(0.5)),
            ItemRef::from(Information::new("b", "2")),
        ];
        let mut info = ChildCollection::new();
        populate_information(&mut info, &children);
        let keys: Vec<_> = info.iter().map(|i| i.key().to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
