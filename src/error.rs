use crate::ids::{EdgeId, NodeId};

/// Errors reported when a handle passed to a [`Graph`](crate::Graph)
/// operation does not name a live entity of that graph.
///
/// These are contract violations on the caller's side: a handle from another
/// graph instance, or an edge handle used after its edge was pruned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("invalid node handle {id:?}: {reason}")]
    InvalidNode { id: NodeId, reason: &'static str },
    #[error("invalid edge handle {id:?}: {reason}")]
    InvalidEdge { id: EdgeId, reason: &'static str },
}
