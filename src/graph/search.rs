use std::collections::VecDeque;

use super::{DiscoveredSet, Graph};
use crate::{
    directedness::DirectednessTrait,
    edge_multiplicity::EdgeMultiplicityTrait,
    error::GraphError,
    id_vec::IdVecKey,
    ids::NodeId,
    tracing_support::{debug, info_span, trace},
};

/// FIFO queue of discovered-but-unexpanded nodes, plus the set of every node
/// discovered so far.
struct Frontier {
    queue: VecDeque<IdVecKey>,
    discovered: DiscoveredSet,
}

impl Frontier {
    fn new(start: IdVecKey, slots: usize) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            discovered: DiscoveredSet::new(slots),
        };
        frontier.discover(start);
        frontier
    }

    /// Marks a node discovered and enqueues it, returning false if it was
    /// already discovered.
    fn discover(&mut self, key: IdVecKey) -> bool {
        let is_new = self.discovered.insert(key);
        if is_new {
            self.queue.push_back(key);
        }
        is_new
    }

    fn pop(&mut self) -> Option<IdVecKey> {
        self.queue.pop_front()
    }
}

/// Lazy breadth-first search, created by [`Graph::bfs`] and
/// [`Graph::bfs_filtered`].  Yields nodes in discovery order, starting with
/// the start node.
pub struct BfsIterator<'g, N, E, D, M, G, P>
where
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
{
    graph: &'g Graph<N, E, D, M, G>,
    frontier: Frontier,
    predicate: P,
}

impl<'g, N, E, D, M, G, P> Iterator for BfsIterator<'g, N, E, D, M, G, P>
where
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
    P: FnMut(&Graph<N, E, D, M, G>, NodeId, NodeId) -> bool,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.frontier.pop()?;
        let graph = self.graph;
        if let Some(node) = graph.nodes.get(key) {
            for &edge_key in &node.edges_out {
                let Some(edge) = graph.edges.get(edge_key) else {
                    continue;
                };
                let other = edge.other_end(key);
                if (self.predicate)(graph, graph.node_id(key), graph.node_id(other)) {
                    self.frontier.discover(other);
                }
            }
        }
        Some(graph.node_id(key))
    }
}

impl<N, E, D, M, G> Graph<N, E, D, M, G>
where
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
{
    /// Performs a breadth-first search from `start`.
    ///
    /// `node_visitor` is called exactly once for each node, when it is first
    /// discovered; the start node is discovered first.  Nodes are expanded in
    /// FIFO order and their outgoing edges examined in [`Self::out_edges`]
    /// order.  `edge_predicate` is called with `(expanding node, node across
    /// the edge)` for every examined edge; returning false cancels that edge,
    /// so the node across it is not discovered through it.  Only nodes
    /// reachable through accepted edges are visited.
    ///
    /// Both callbacks are required here.  For a search without a visitor use
    /// [`Self::bfs`], or [`Self::bfs_filtered`] to keep the predicate.
    ///
    /// Fails if `start` is not a live node of this graph.
    pub fn breadth_first_search(
        &mut self,
        start: NodeId,
        mut node_visitor: impl FnMut(&mut Self, NodeId),
        mut edge_predicate: impl FnMut(&Self, NodeId, NodeId) -> bool,
    ) -> Result<(), GraphError> {
        self.check_valid_node_id(&start)?;
        let _span = info_span!("breadth_first_search", start = start.index()).entered();

        let mut frontier = Frontier::new(start.key(), self.nodes.slot_count());
        node_visitor(self, start);
        while let Some(key) = frontier.pop() {
            // The visitor may prune edges, so expansion works from a copy of
            // the list and skips edges that have since disappeared.
            let Some(edges_out) = self.nodes.get(key).map(|node| node.edges_out.clone()) else {
                continue;
            };
            for edge_key in edges_out {
                let Some(edge) = self.edges.get(edge_key) else {
                    continue;
                };
                let (from, into) = (self.node_id(key), self.node_id(edge.other_end(key)));
                if !edge_predicate(self, from, into) {
                    trace!(
                        from = from.index(),
                        into = into.index(),
                        "edge rejected by predicate"
                    );
                    continue;
                }
                if frontier.discover(into.key()) {
                    node_visitor(self, into);
                }
            }
        }

        debug!(
            discovered = frontier.discovered.len(),
            "breadth-first search finished"
        );
        Ok(())
    }

    /// Returns a lazy breadth-first iterator over the nodes reachable from
    /// `start`, in discovery order.
    pub fn bfs(&self, start: NodeId) -> Result<impl Iterator<Item = NodeId> + '_, GraphError> {
        self.bfs_filtered(start, |_, _, _| true)
    }

    /// Like [`Self::bfs`], but only follows edges accepted by `predicate`,
    /// which receives `(expanding node, node across the edge)`.
    pub fn bfs_filtered<P>(
        &self,
        start: NodeId,
        predicate: P,
    ) -> Result<BfsIterator<'_, N, E, D, M, G, P>, GraphError>
    where
        P: FnMut(&Self, NodeId, NodeId) -> bool,
    {
        self.check_valid_node_id(&start)?;
        Ok(BfsIterator {
            graph: self,
            frontier: Frontier::new(start.key(), self.nodes.slot_count()),
            predicate,
        })
    }

    /// Collects the nodes whose shortest hop distance from `start`, following
    /// outgoing edges, is exactly `depth`, in discovery order.  A node reached
    /// by a longer path as well is reported only at its shortest distance.
    pub fn level(&self, start: NodeId, depth: usize) -> Result<Vec<NodeId>, GraphError> {
        self.check_valid_node_id(&start)?;
        let _span = info_span!("traverse_level", start = start.index(), depth).entered();

        let mut discovered = DiscoveredSet::new(self.nodes.slot_count());
        discovered.insert(start.key());
        let mut layer = vec![start.key()];
        for _ in 0..depth {
            let mut next = Vec::new();
            for &key in &layer {
                let Some(node) = self.nodes.get(key) else {
                    continue;
                };
                for &edge_key in &node.edges_out {
                    if let Some(edge) = self.edges.get(edge_key) {
                        let other = edge.other_end(key);
                        if discovered.insert(other) {
                            next.push(other);
                        }
                    }
                }
            }
            if next.is_empty() {
                return Ok(Vec::new());
            }
            layer = next;
        }
        Ok(layer.into_iter().map(|key| self.node_id(key)).collect())
    }

    /// Calls `node_visitor` once for every node whose shortest hop distance
    /// from `start` is exactly `depth`.  `depth == 0` visits only `start`.
    ///
    /// This is meant for tree-shaped graphs; on other graphs only the
    /// shortest distance to a node counts.  [`Self::level`] returns the same
    /// nodes without a visitor.
    pub fn traverse_level(
        &mut self,
        start: NodeId,
        depth: usize,
        mut node_visitor: impl FnMut(&mut Self, NodeId),
    ) -> Result<(), GraphError> {
        for nid in self.level(start, depth)? {
            node_visitor(self, nid);
        }
        Ok(())
    }
}
