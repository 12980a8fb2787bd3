//! # Schema Graph Arena
//!
//! A [`SchemaGraph`] owns every node decoded from one schema document in
//! a flat arena; edges — child slots and resolved references — are
//! [`NodeId`] handles into that arena. Schemas may spell out reference
//! cycles, and handle-based edges make cycle detection and resolution
//! rollback plain index operations with no ownership-cycle risk.
//!
//! After a successful `resolve_local_references` the graph is immutable:
//! matching takes `&self` and never writes, so any number of threads can
//! validate instances against the same graph concurrently.

use std::fmt;

use crate::matcher::MatchHook;
use crate::node::SchemaNode;

/// Handle to a node in a [`SchemaGraph`] arena.
///
/// Only meaningful together with the graph that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// The decoded schema document: an arena of nodes plus the root handle.
pub struct SchemaGraph {
    pub(crate) nodes: Vec<SchemaNode>,
    pub(crate) root: NodeId,
    pub(crate) hook: Option<Box<dyn MatchHook>>,
}

impl fmt::Debug for SchemaGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaGraph")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl SchemaGraph {
    /// The root node's handle.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The root node.
    pub fn root_node(&self) -> &SchemaNode {
        &self.nodes[self.root.0]
    }

    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different graph and is out of range.
    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    /// Number of nodes owned by this graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A decoded graph always holds at least the root node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut SchemaNode {
        &mut self.nodes[id.0]
    }

    /// Installs an extension hook consulted after all base checks pass.
    ///
    /// See [`MatchHook`]. The hook is never consulted for the
    /// trivial-true node.
    pub fn with_match_hook(mut self, hook: Box<dyn MatchHook>) -> Self {
        self.hook = Some(hook);
        self
    }
}
