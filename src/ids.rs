use std::fmt::Debug;

use derivative::Derivative;

use crate::{graph_id::GraphId, id_vec::IdVecKey};

/// Handle to a node of a [`Graph`](crate::Graph).
///
/// Node handles stay valid for the lifetime of the graph that issued them.
/// Handles compare by their index only; comparing handles issued by
/// different graphs is meaningless.
#[derive(Derivative)]
#[derivative(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    key: IdVecKey,
    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore", Hash = "ignore")]
    graph_id: GraphId,
}

impl NodeId {
    pub(crate) fn new(key: IdVecKey, graph_id: GraphId) -> Self {
        Self { key, graph_id }
    }

    pub(crate) fn key(&self) -> IdVecKey {
        self.key
    }

    #[cfg_attr(feature = "unchecked", allow(dead_code))]
    pub(crate) fn graph_id(&self) -> GraphId {
        self.graph_id
    }

    /// The position of this node in insertion order, counting from zero.
    pub fn index(&self) -> usize {
        self.key.index()
    }
}

impl Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.key.index())
    }
}

/// Handle to an edge of a [`Graph`](crate::Graph).
///
/// Edge handles are invalidated when their edge is pruned.  The slot of a
/// pruned edge is never handed out again, so a stale handle is always
/// reported as invalid rather than silently naming a newer edge.
#[derive(Derivative)]
#[derivative(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    key: IdVecKey,
    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore", Hash = "ignore")]
    graph_id: GraphId,
}

impl EdgeId {
    pub(crate) fn new(key: IdVecKey, graph_id: GraphId) -> Self {
        Self { key, graph_id }
    }

    pub(crate) fn key(&self) -> IdVecKey {
        self.key
    }

    #[cfg_attr(feature = "unchecked", allow(dead_code))]
    pub(crate) fn graph_id(&self) -> GraphId {
        self.graph_id
    }

    /// The position of this edge in insertion order, counting from zero.
    /// Indices of pruned edges are not reused.
    pub fn index(&self) -> usize {
        self.key.index()
    }
}

impl Debug for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EdgeId({})", self.key.index())
    }
}
