//! Write-side traversal.
//!
//! A visitor receives the root [`ItemRef`], records whatever it needs and
//! calls [`ItemRef::traverse`] to be handed the children. Nodes decide their
//! own child order; visitors never walk collections themselves.

use crate::graph::item::ItemRef;
use crate::xdmf_error::XdmfError;

/// Receiver for a pre-order, depth-first walk of the item graph.
pub trait Visitor {
    /// Called once per node occurrence.
    fn visit(&mut self, item: &ItemRef) -> Result<(), XdmfError>;
}

/// Visitor that records `(depth, tag)` for every node, in visit order.
#[derive(Debug, Default, Clone)]
pub struct TagCollector {
    depth: usize,
    /// Visited nodes.
    pub visited: Vec<(usize, &'static str)>,
}

impl TagCollector {
    /// Collect the tags below and including `root`.
    pub fn collect(root: &ItemRef) -> Result<Vec<(usize, &'static str)>, XdmfError> {
        let mut collector = TagCollector::default();
        collector.visit(root)?;
        Ok(collector.visited)
    }
}

impl Visitor for TagCollector {
    fn visit(&mut self, item: &ItemRef) -> Result<(), XdmfError> {
        self.visited.push((self.depth, item.tag()));
        self.depth += 1;
        let result = item.traverse(self);
        self.depth -= 1;
        result
    }
}
