//! Element tree → item graph.
//!
//! For every element the reader resolves a factory from the tag, reads all
//! children first, then lets the factory construct and populate the node
//! from the element's properties and the finished children. Elements with
//! an `Id` attribute are recorded in the [`ReaderContext`] once finished;
//! elements with a `Reference` attribute resolve to that same shared node.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use log::{debug, trace, warn};

use crate::data::{HeavyDataHandle, HeavyDataResolver};
use crate::graph::element::Element;
use crate::graph::item::{ItemRef, ReadItem};
use crate::graph::properties::PropertyMap;
use crate::model::grid::GRID_TYPE_KEY;
use crate::model::{
    Attribute, DataItem, Domain, Geometry, Grid, GridCollection, Information, Map, Set, Time,
    Topology,
};
use crate::xdmf_error::XdmfError;

/// Attribute that registers the finished item under a key.
pub const ID_KEY: &str = "Id";
/// Attribute that makes an element stand for a previously registered item.
pub const REFERENCE_KEY: &str = "Reference";
/// Pseudo-property carrying an element's text content into its factory.
pub const CONTENT_KEY: &str = "Content";
/// Tag of the document root.
pub const ROOT_TAG: &str = "Xdmf";

/// Builds one item from its element's properties and finished children.
pub type ItemFactory =
    fn(&PropertyMap, &[ItemRef], &ReaderContext) -> Result<ItemRef, XdmfError>;

/// Generic factory: construct `T`, then populate it.
pub fn read_item<T>(
    properties: &PropertyMap,
    children: &[ItemRef],
    context: &ReaderContext,
) -> Result<ItemRef, XdmfError>
where
    T: ReadItem,
    ItemRef: From<T>,
{
    let mut item = T::construct(properties)?;
    item.populate_item(properties, children, context)?;
    Ok(ItemRef::from(item))
}

/// `Grid` elements are uniform grids or collections depending on `GridType`.
fn read_grid(
    properties: &PropertyMap,
    children: &[ItemRef],
    context: &ReaderContext,
) -> Result<ItemRef, XdmfError> {
    let grid_type = properties.get(GRID_TYPE_KEY).map(|raw| raw.trim());
    match grid_type {
        None => read_item::<Grid>(properties, children, context),
        Some(kind) if kind.eq_ignore_ascii_case("Uniform") => {
            read_item::<Grid>(properties, children, context)
        }
        Some(kind) if kind.eq_ignore_ascii_case("Collection") => {
            read_item::<GridCollection>(properties, children, context)
        }
        Some(kind) => Err(XdmfError::property(
            Grid::ITEM_TAG,
            GRID_TYPE_KEY,
            format!("unsupported grid type `{kind}`"),
        )),
    }
}

/// What to do with an element whose tag has no factory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownTagPolicy {
    /// Fail the whole read.
    #[default]
    Fail,
    /// Log a warning and drop that element's subtree.
    Skip,
}

/// Reader settings.
#[derive(Clone, Debug)]
pub struct ReaderConfig {
    /// Handling of unregistered tags.
    pub unknown_tags: UnknownTagPolicy,
    /// Deepest element nesting accepted, counting the root as depth zero.
    pub max_depth: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            unknown_tags: UnknownTagPolicy::Fail,
            max_depth: 256,
        }
    }
}

impl ReaderConfig {
    pub fn with_unknown_tags(mut self, policy: UnknownTagPolicy) -> Self {
        self.unknown_tags = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Per-read state shared by every factory call: the items registered by
/// `Id` so far and the heavy-data resolver.
#[derive(Default)]
pub struct ReaderContext {
    items: HashMap<String, ItemRef>,
    heavy_data: Option<Arc<dyn HeavyDataResolver>>,
}

impl ReaderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose data items are bound through `resolver`.
    pub fn with_heavy_data(resolver: Arc<dyn HeavyDataResolver>) -> Self {
        Self {
            items: HashMap::new(),
            heavy_data: Some(resolver),
        }
    }

    /// Record `item` under `key`.
    ///
    /// # Errors
    /// `Reconstruction` if `key` is already taken; the first item stays.
    pub fn register(&mut self, key: &str, item: ItemRef) -> Result<(), XdmfError> {
        if self.items.contains_key(key) {
            return Err(XdmfError::property(
                item.tag(),
                ID_KEY,
                format!("duplicate reference key `{key}`"),
            ));
        }
        debug!("registered {} under reference key `{key}`", item.tag());
        self.items.insert(key.to_string(), item);
        Ok(())
    }

    /// Item registered under `key`.
    pub fn resolve(&self, key: &str) -> Option<&ItemRef> {
        self.items.get(key)
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up heavy data by its reference text. `None` without a resolver.
    pub fn resolve_heavy_data(&self, reference: &str) -> Option<Arc<dyn HeavyDataHandle>> {
        self.heavy_data
            .as_ref()
            .and_then(|resolver| resolver.resolve(reference))
    }
}

impl fmt::Debug for ReaderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.items.keys().collect();
        keys.sort();
        f.debug_struct("ReaderContext")
            .field("keys", &keys)
            .field("heavy_data", &self.heavy_data.is_some())
            .finish()
    }
}

/// Tag-dispatching reader.
#[derive(Clone)]
pub struct Reader {
    factories: HashMap<String, ItemFactory>,
    config: ReaderConfig,
    heavy_data: Option<Arc<dyn HeavyDataResolver>>,
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader {
    /// Reader with every built-in tag registered and default settings.
    pub fn new() -> Self {
        let mut reader = Self {
            factories: HashMap::new(),
            config: ReaderConfig::default(),
            heavy_data: None,
        };
        reader.register_item::<Information>();
        reader.register_item::<DataItem>();
        reader.register_item::<Time>();
        reader.register_item::<Geometry>();
        reader.register_item::<Topology>();
        reader.register_item::<Attribute>();
        reader.register_item::<Set>();
        reader.register_item::<Map>();
        reader.register_item::<Domain>();
        reader.register(Grid::ITEM_TAG, read_grid);
        reader
    }

    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Bind data items through `resolver` on every read.
    pub fn with_heavy_data(mut self, resolver: Arc<dyn HeavyDataResolver>) -> Self {
        self.heavy_data = Some(resolver);
        self
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Route `tag` to `factory`, returning the factory it replaces.
    pub fn register(&mut self, tag: impl Into<String>, factory: ItemFactory) -> Option<ItemFactory> {
        self.factories.insert(tag.into(), factory)
    }

    /// Route `T::ITEM_TAG` to [`read_item::<T>`](read_item).
    pub fn register_item<T>(&mut self) -> Option<ItemFactory>
    where
        T: ReadItem,
        ItemRef: From<T>,
    {
        self.register(T::ITEM_TAG, read_item::<T>)
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// A fresh context for one read.
    pub fn new_context(&self) -> ReaderContext {
        match &self.heavy_data {
            Some(resolver) => ReaderContext::with_heavy_data(Arc::clone(resolver)),
            None => ReaderContext::new(),
        }
    }

    /// Read a single element tree into an item.
    pub fn read(&self, element: &Element) -> Result<ItemRef, XdmfError> {
        let mut context = self.new_context();
        self.read_with_context(element, &mut context)
    }

    /// Read `element` with a caller-held context, so references can span
    /// several calls.
    pub fn read_with_context(
        &self,
        element: &Element,
        context: &mut ReaderContext,
    ) -> Result<ItemRef, XdmfError> {
        self.read_element(element, &element.tag, 0, context)?
            .ok_or_else(|| {
                XdmfError::reconstruction(&element.tag, "root element has no registered reader")
                    .at_path(&element.tag)
            })
    }

    /// Read an `<Xdmf>` document, returning the items under the root in
    /// document order. References may cross between them.
    pub fn read_document(&self, document: &Element) -> Result<Vec<ItemRef>, XdmfError> {
        if document.tag != ROOT_TAG {
            return Err(XdmfError::reconstruction(
                &document.tag,
                format!("document root must be `{ROOT_TAG}`"),
            )
            .at_path(&document.tag));
        }
        let mut context = self.new_context();
        self.read_children(document, ROOT_TAG, 0, &mut context)
    }

    /// Read independent documents in parallel, one context per document.
    #[cfg(feature = "rayon")]
    pub fn read_documents_par(
        &self,
        documents: &[Element],
    ) -> Vec<Result<Vec<ItemRef>, XdmfError>> {
        use rayon::prelude::*;

        documents
            .par_iter()
            .map(|document| self.read_document(document))
            .collect()
    }

    fn read_children(
        &self,
        element: &Element,
        path: &str,
        depth: usize,
        context: &mut ReaderContext,
    ) -> Result<Vec<ItemRef>, XdmfError> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut children = Vec::with_capacity(element.children.len());
        for child in &element.children {
            let index = seen.entry(child.tag.as_str()).or_insert(0);
            let child_path = format!("{path}/{}[{index}]", child.tag);
            *index += 1;
            if let Some(item) = self.read_element(child, &child_path, depth + 1, context)? {
                children.push(item);
            }
        }
        Ok(children)
    }

    fn read_element(
        &self,
        element: &Element,
        path: &str,
        depth: usize,
        context: &mut ReaderContext,
    ) -> Result<Option<ItemRef>, XdmfError> {
        trace!("reading {path}");
        if depth > self.config.max_depth {
            return Err(XdmfError::reconstruction(
                &element.tag,
                format!("nesting exceeds the maximum depth of {}", self.config.max_depth),
            )
            .at_path(path));
        }

        if let Some(key) = element.attribute(REFERENCE_KEY) {
            return self.resolve_reference(element, key, path, context).map(Some);
        }

        let Some(factory) = self.factories.get(element.tag.as_str()).copied() else {
            return match self.config.unknown_tags {
                UnknownTagPolicy::Fail => Err(XdmfError::reconstruction(
                    &element.tag,
                    "no reader registered for this tag",
                )
                .at_path(path)),
                UnknownTagPolicy::Skip => {
                    warn!("skipping unknown element `{}` at {path}", element.tag);
                    Ok(None)
                }
            };
        };

        let children = self.read_children(element, path, depth, context)?;

        let mut properties: PropertyMap = element
            .attributes
            .iter()
            .filter(|(key, _)| key.as_str() != ID_KEY && key.as_str() != REFERENCE_KEY)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if let Some(text) = &element.text {
            properties.insert(CONTENT_KEY.to_string(), text.clone());
        }

        let item = factory(&properties, &children, context).map_err(|err| err.at_path(path))?;

        if let Some(key) = element.attribute(ID_KEY) {
            context
                .register(key, item.clone())
                .map_err(|err| err.at_path(path))?;
        }
        Ok(Some(item))
    }

    fn resolve_reference(
        &self,
        element: &Element,
        key: &str,
        path: &str,
        context: &ReaderContext,
    ) -> Result<ItemRef, XdmfError> {
        let item = context.resolve(key).ok_or_else(|| {
            XdmfError::property(
                &element.tag,
                REFERENCE_KEY,
                format!("unresolved reference key `{key}`"),
            )
            .at_path(path)
        })?;
        if item.tag() != element.tag {
            return Err(XdmfError::property(
                &element.tag,
                REFERENCE_KEY,
                format!("reference `{key}` names a `{}`", item.tag()),
            )
            .at_path(path));
        }
        debug!("resolved reference `{key}` at {path}");
        Ok(item.clone())
    }
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&String> = self.factories.keys().collect();
        tags.sort();
        f.debug_struct("Reader")
            .field("tags", &tags)
            .field("config", &self.config)
            .field("heavy_data", &self.heavy_data.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(Reader: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn time(value: &str) -> Element {
        Element::new("Time").with_attribute("Value", value)
    }

    #[test]
    fn builtin_tags_are_registered() {
        let reader = Reader::new();
        for tag in [
            "Information",
            "DataItem",
            "Time",
            "Geometry",
            "Topology",
            "Attribute",
            "Set",
            "Map",
            "Grid",
            "Domain",
        ] {
            assert!(reader.is_registered(tag), "{tag}");
        }
        assert!(!reader.is_registered("Xdmf"));
    }

    #[test]
    fn errors_carry_the_element_path() {
        let document = Element::new("Xdmf").with_child(
            Element::new("Domain")
                .with_child(Element::new("Grid").with_child(time("0")))
                .with_child(Element::new("Grid").with_child(time("soon"))),
        );
        let err = Reader::new().read_document(&document).unwrap_err();
        match err {
            XdmfError::Reconstruction { path, property, .. } => {
                assert_eq!(path, "Xdmf/Domain[0]/Grid[1]/Time[0]");
                assert_eq!(property.as_deref(), Some("Value"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn depth_limit_is_enforced() {
        let nested = Element::new("Information")
            .with_attribute("Key", "a")
            .with_child(
                Element::new("Information")
                    .with_attribute("Key", "b")
                    .with_child(Element::new("Information").with_attribute("Key", "c")),
            );
        let shallow = Reader::new().with_config(ReaderConfig::default().with_max_depth(1));
        assert!(shallow.read(&nested).is_err());
        assert!(Reader::new().read(&nested).is_ok());
    }

    #[test]
    fn reserved_attributes_are_not_properties() {
        let element = Element::new("Information")
            .with_attribute("Key", "k")
            .with_attribute("Id", "info-1");
        let mut context = ReaderContext::new();
        let item = Reader::new().read_with_context(&element, &mut context).unwrap();
        assert!(!item.properties().contains_key("Id"));
        assert!(context.resolve("info-1").unwrap().ptr_eq(&item));
    }

    #[test]
    fn unsupported_grid_types_fail() {
        let tree = Element::new("Grid").with_attribute("GridType", "Tree");
        assert!(matches!(
            Reader::new().read(&tree),
            Err(XdmfError::Reconstruction { .. })
        ));
    }
}
