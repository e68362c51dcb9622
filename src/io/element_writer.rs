//! Item graph → element tree.
//!
//! [`ElementWriter`] is the canonical [`Visitor`]. Every node is checked
//! with [`Item::validate_structure`](crate::graph::Item::validate_structure)
//! before it is written, so an incomplete grid fails here and not in the
//! consumer of the output.
//!
//! With `share_references` on, a counting pass runs first. A node reachable
//! along more than one path is written in full once, tagged with an `Id`,
//! and every later occurrence becomes an empty element carrying only a
//! `Reference` to that key.

use hashbrown::{HashMap, HashSet};
use log::debug;

use crate::graph::element::Element;
use crate::graph::item::ItemRef;
use crate::graph::reader::{ID_KEY, REFERENCE_KEY, ROOT_TAG};
use crate::graph::visitor::Visitor;
use crate::xdmf_error::XdmfError;

/// Writer settings.
#[derive(Clone, Debug)]
pub struct WriterConfig {
    /// Emit shared nodes once and reference them afterwards.
    pub share_references: bool,
    /// `Version` attribute of the document root.
    pub version: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            share_references: true,
            version: "3.0".to_string(),
        }
    }
}

impl WriterConfig {
    pub fn with_share_references(mut self, share: bool) -> Self {
        self.share_references = share;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Counts how often each node is reached. Subtrees are only descended on
/// the first visit.
#[derive(Debug, Default)]
struct SharedItemCounter {
    counts: HashMap<usize, usize>,
}

impl SharedItemCounter {
    fn shared(self) -> HashSet<usize> {
        self.counts
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(identity, _)| identity)
            .collect()
    }
}

impl Visitor for SharedItemCounter {
    fn visit(&mut self, item: &ItemRef) -> Result<(), XdmfError> {
        let count = self.counts.entry(item.identity()).or_insert(0);
        *count += 1;
        if *count == 1 {
            item.traverse(self)?;
        }
        Ok(())
    }
}

/// Visitor that renders nodes as [`Element`]s.
#[derive(Debug, Default)]
pub struct ElementWriter {
    config: WriterConfig,
    shared: HashSet<usize>,
    emitted: HashMap<usize, String>,
    children: Vec<Element>,
}

impl ElementWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Render the subgraph below `root`.
    pub fn write(&mut self, root: &ItemRef) -> Result<Element, XdmfError> {
        let mut elements = self.write_all(std::slice::from_ref(root))?;
        elements
            .pop()
            .ok_or_else(|| XdmfError::Io("writer produced no element".into()))
    }

    /// Render `roots` inside an `<Xdmf Version=..>` element. Sharing is
    /// detected across all roots.
    pub fn write_document(&mut self, roots: &[ItemRef]) -> Result<Element, XdmfError> {
        let mut document =
            Element::new(ROOT_TAG).with_attribute("Version", self.config.version.clone());
        document.children = self.write_all(roots)?;
        Ok(document)
    }

    fn write_all(&mut self, roots: &[ItemRef]) -> Result<Vec<Element>, XdmfError> {
        self.emitted.clear();
        self.children.clear();
        self.shared = if self.config.share_references {
            let mut counter = SharedItemCounter::default();
            for root in roots {
                counter.visit(root)?;
            }
            counter.shared()
        } else {
            HashSet::new()
        };
        for root in roots {
            self.visit(root)?;
        }
        Ok(std::mem::take(&mut self.children))
    }
}

impl Visitor for ElementWriter {
    fn visit(&mut self, item: &ItemRef) -> Result<(), XdmfError> {
        let identity = item.identity();
        if let Some(key) = self.emitted.get(&identity) {
            let reference = Element::new(item.tag()).with_attribute(REFERENCE_KEY, key.clone());
            self.children.push(reference);
            return Ok(());
        }

        item.as_item().validate_structure()?;
        let mut element = Element::new(item.tag());
        element.attributes = item.properties();
        if self.shared.contains(&identity) {
            let key = format!("{}_{}", item.tag(), self.emitted.len() + 1);
            debug!("writing shared {} as `{key}`", item.tag());
            element.attributes.insert(ID_KEY.to_string(), key.clone());
            self.emitted.insert(identity, key);
        }
        if let Some(data_item) = item.as_data_item() {
            element.text = data_item.content();
        }

        let siblings = std::mem::take(&mut self.children);
        let result = item.traverse(self);
        element.children = std::mem::replace(&mut self.children, siblings);
        result?;
        self.children.push(element);
        Ok(())
    }
}
