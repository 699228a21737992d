//! The handle-based [`Graph`] container.
//!
//! A graph owns all of its node and edge storage and hands out small `Copy`
//! handles ([`NodeId`], [`EdgeId`]).  Nodes are never removed; edges are
//! removed only through [`Graph::prune_edges`].  Nodes and edges are
//! enumerated in insertion order.
//!
//! Mutating the graph while iterating over it is prevented by the borrow
//! checker.  The `forall_*` methods and the traversal visitors receive
//! `&mut Graph` so they can update node and edge properties; they operate on
//! a snapshot of the handles taken before the first call, so a visitor that
//! changes the topology cannot corrupt the traversal, though the changes are
//! not guaranteed to be observed by it.

mod components;
mod format_debug;
mod search;

use std::collections::HashSet;

pub use components::Coloring;
pub use search::BfsIterator;

use crate::{
    Directed, SingleEdge,
    directedness::{Bidirectional, DirectednessTrait, Undirected},
    edge_multiplicity::{EdgeMultiplicityTrait, MultipleEdges},
    error::GraphError,
    graph_id::GraphId,
    id_vec::{IdVec, IdVecKey},
    ids::{EdgeId, NodeId},
    tracing_support::{debug, info_span, trace},
};

#[derive(Clone)]
struct Node<N> {
    data: N,
    edges_out: Vec<IdVecKey>,
    /// Maintained only when the directedness tracks incoming edges.
    edges_in: Vec<IdVecKey>,
}

#[derive(Clone)]
struct Edge<E> {
    data: E,
    source: IdVecKey,
    target: IdVecKey,
}

impl<E> Edge<E> {
    /// Given one end of the edge, returns the other end.  For a self-loop
    /// this is the node itself.
    fn other_end(&self, key: IdVecKey) -> IdVecKey {
        if self.source == key {
            self.target
        } else {
            self.source
        }
    }
}

/// Result of [`Graph::add_edge`] and [`Graph::add_edge_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddEdgeResult<E> {
    /// A new edge was created.
    Added(EdgeId),
    /// The graph does not allow parallel edges and the two nodes were already
    /// connected.  Holds the existing edge and the edge data that was not
    /// inserted.
    Existing(EdgeId, E),
}

impl<E> AddEdgeResult<E> {
    /// The new edge, or the pre-existing one if nothing was inserted.
    pub fn edge_id(&self) -> EdgeId {
        match self {
            AddEdgeResult::Added(eid) | AddEdgeResult::Existing(eid, _) => *eid,
        }
    }

    /// Returns true if a new edge was created.
    pub fn inserted(&self) -> bool {
        matches!(self, AddEdgeResult::Added(_))
    }

    /// Converts into an `(edge, inserted)` pair, dropping any rejected data.
    pub fn into_pair(self) -> (EdgeId, bool) {
        (self.edge_id(), self.inserted())
    }
}

/// A generic graph with node properties `N`, edge properties `E`, direction
/// mode `D` ([`Directed`], [`Undirected`] or [`Bidirectional`]), edge
/// multiplicity `M` ([`SingleEdge`] or [`MultipleEdges`]) and a single
/// graph-level property `G`.
///
/// Edge storage is a per-node list of outgoing edge keys.  Undirected edges
/// are listed at both ends; bidirectional graphs additionally keep a list
/// of incoming edges per node.
///
/// Cloning produces a new graph instance with its own identity.  Nodes and
/// edges keep their positions, so the clone's handles can be recovered from
/// [`Self::nodes`] and [`Self::edges`], but handles issued by one graph are
/// rejected by the other.
///
/// # Type Parameters
/// * `N` - The type of data stored in nodes
/// * `E` - The type of data stored in edges
/// * `D` - The directedness
/// * `M` - The edge multiplicity
/// * `G` - The type of data stored for the graph as a whole
pub struct Graph<N = (), E = (), D = Directed, M = SingleEdge, G = ()>
where
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
{
    nodes: IdVec<Node<N>>,
    edges: IdVec<Edge<E>>,
    data: G,
    id: GraphId,
    directedness: D,
    multiplicity: M,
}

/// A directed graph without parallel edges.
pub type DiGraph<N = (), E = (), G = ()> = Graph<N, E, Directed, SingleEdge, G>;
/// An undirected graph without parallel edges.
pub type UnGraph<N = (), E = (), G = ()> = Graph<N, E, Undirected, SingleEdge, G>;
/// A directed graph tracking incoming edges, without parallel edges.
pub type BiGraph<N = (), E = (), G = ()> = Graph<N, E, Bidirectional, SingleEdge, G>;
/// A directed multigraph.
pub type MultiDiGraph<N = (), E = (), G = ()> = Graph<N, E, Directed, MultipleEdges, G>;
/// An undirected multigraph.
pub type MultiUnGraph<N = (), E = (), G = ()> = Graph<N, E, Undirected, MultipleEdges, G>;
/// A directed multigraph tracking incoming edges.
pub type MultiBiGraph<N = (), E = (), G = ()> = Graph<N, E, Bidirectional, MultipleEdges, G>;

impl<N, E, D, M, G> Graph<N, E, D, M, G>
where
    D: DirectednessTrait + Default,
    M: EdgeMultiplicityTrait + Default,
{
    /// Creates a new, empty graph with default graph data.
    pub fn new() -> Self
    where
        G: Default,
    {
        Self::with_data(G::default())
    }

    /// Creates a new, empty graph holding the given graph data.
    pub fn with_data(data: G) -> Self {
        Self::with_config_and_data(D::default(), M::default(), data)
    }

    /// Creates a new, empty graph with room for the given number of nodes
    /// and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self
    where
        G: Default,
    {
        let mut graph = Self::new();
        graph.reserve(nodes, edges);
        graph
    }
}

impl<N, E, D, M, G> Default for Graph<N, E, D, M, G>
where
    D: DirectednessTrait + Default,
    M: EdgeMultiplicityTrait + Default,
    G: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E, D, M, G> Graph<N, E, D, M, G>
where
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
{
    /// Creates a new, empty graph with the given configuration.  Useful with
    /// the runtime enums [`Directedness`](crate::Directedness) and
    /// [`EdgeMultiplicity`](crate::EdgeMultiplicity).
    pub fn with_config(directedness: D, multiplicity: M) -> Self
    where
        G: Default,
    {
        Self::with_config_and_data(directedness, multiplicity, G::default())
    }

    pub fn with_config_and_data(directedness: D, multiplicity: M, data: G) -> Self {
        Self {
            nodes: IdVec::new(),
            edges: IdVec::new(),
            data,
            id: GraphId::new(),
            directedness,
            multiplicity,
        }
    }

    /// Reserves capacity for at least the given number of additional nodes
    /// and edges.
    pub fn reserve(&mut self, additional_nodes: usize, additional_edges: usize) {
        self.nodes.reserve(additional_nodes);
        self.edges.reserve(additional_edges);
    }

    pub fn directedness(&self) -> D {
        self.directedness
    }

    pub fn multiplicity(&self) -> M {
        self.multiplicity
    }

    /// Returns true unless the graph is undirected.
    pub fn is_directed(&self) -> bool {
        self.directedness.is_directed()
    }

    /// Returns true if more than one edge may connect the same node pair.
    pub fn allows_parallel_edges(&self) -> bool {
        self.multiplicity.allows_parallel_edges()
    }

    /// Gets the graph-level data.
    pub fn graph_data(&self) -> &G {
        &self.data
    }

    pub fn graph_data_mut(&mut self) -> &mut G {
        &mut self.data
    }

    fn node_id(&self, key: IdVecKey) -> NodeId {
        NodeId::new(key, self.id)
    }

    fn edge_id(&self, key: IdVecKey) -> EdgeId {
        EdgeId::new(key, self.id)
    }

    // Validation

    /// Checks that a node handle refers to a live node of this graph.
    pub fn check_valid_node_id(&self, id: &NodeId) -> Result<(), GraphError> {
        #[cfg(not(feature = "unchecked"))]
        if id.graph_id() != self.id {
            return Err(GraphError::InvalidNode {
                id: *id,
                reason: "NodeId graph ID does not match",
            });
        }
        if !self.nodes.contains_key(id.key()) {
            return Err(GraphError::InvalidNode {
                id: *id,
                reason: "NodeId index not found in nodes",
            });
        }
        Ok(())
    }

    /// Checks that an edge handle refers to a live edge of this graph.
    pub fn check_valid_edge_id(&self, id: &EdgeId) -> Result<(), GraphError> {
        #[cfg(not(feature = "unchecked"))]
        if id.graph_id() != self.id {
            return Err(GraphError::InvalidEdge {
                id: *id,
                reason: "EdgeId graph ID does not match",
            });
        }
        if !self.edges.contains_key(id.key()) {
            return Err(GraphError::InvalidEdge {
                id: *id,
                reason: "EdgeId not found in edges; it may have been pruned",
            });
        }
        Ok(())
    }

    /// Panics if the given node handle is not valid in this graph.
    pub fn assert_valid_node_id(&self, id: &NodeId) {
        if let Err(err) = self.check_valid_node_id(id) {
            panic!("{err}");
        }
    }

    /// Panics if the given edge handle is not valid in this graph.
    pub fn assert_valid_edge_id(&self, id: &EdgeId) {
        if let Err(err) = self.check_valid_edge_id(id) {
            panic!("{err}");
        }
    }

    fn node(&self, id: NodeId) -> Result<&Node<N>, GraphError> {
        self.check_valid_node_id(&id)?;
        self.nodes.get(id.key()).ok_or(GraphError::InvalidNode {
            id,
            reason: "NodeId index not found in nodes",
        })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<N>, GraphError> {
        self.check_valid_node_id(&id)?;
        self.nodes.get_mut(id.key()).ok_or(GraphError::InvalidNode {
            id,
            reason: "NodeId index not found in nodes",
        })
    }

    fn edge(&self, id: EdgeId) -> Result<&Edge<E>, GraphError> {
        self.check_valid_edge_id(&id)?;
        self.edges.get(id.key()).ok_or(GraphError::InvalidEdge {
            id,
            reason: "EdgeId not found in edges; it may have been pruned",
        })
    }

    fn edge_mut(&mut self, id: EdgeId) -> Result<&mut Edge<E>, GraphError> {
        self.check_valid_edge_id(&id)?;
        self.edges.get_mut(id.key()).ok_or(GraphError::InvalidEdge {
            id,
            reason: "EdgeId not found in edges; it may have been pruned",
        })
    }

    // Mutation

    /// Adds a node with default data to the graph, returning its handle.
    pub fn add_node(&mut self) -> NodeId
    where
        N: Default,
    {
        self.add_node_with(N::default())
    }

    /// Adds a node with the given data to the graph, returning its handle.
    pub fn add_node_with(&mut self, data: N) -> NodeId {
        let key = self.nodes.insert(Node {
            data,
            edges_out: Vec::new(),
            edges_in: Vec::new(),
        });
        self.node_id(key)
    }

    /// Adds an edge with default data from `source` to `target`.  See
    /// [`Self::add_edge_with`].
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
    ) -> Result<AddEdgeResult<E>, GraphError>
    where
        E: Default,
    {
        self.add_edge_with(source, target, E::default())
    }

    /// Adds an edge with the given data from `source` to `target`.
    ///
    /// If the graph does not allow parallel edges and the nodes are already
    /// connected (in either orientation, for undirected graphs), nothing is
    /// inserted and [`AddEdgeResult::Existing`] returns the existing edge
    /// together with `data`.
    ///
    /// Fails if either handle is not a live node of this graph.
    pub fn add_edge_with(
        &mut self,
        source: NodeId,
        target: NodeId,
        data: E,
    ) -> Result<AddEdgeResult<E>, GraphError> {
        self.check_valid_node_id(&source)?;
        self.check_valid_node_id(&target)?;

        if !self.allows_parallel_edges()
            && let Some(existing) = self.find_edge_key(source.key(), target.key())
        {
            trace!(
                source = source.index(),
                target = target.index(),
                "rejected duplicate edge"
            );
            return Ok(AddEdgeResult::Existing(self.edge_id(existing), data));
        }

        let key = self.edges.insert(Edge {
            data,
            source: source.key(),
            target: target.key(),
        });
        self.node_mut(source)?.edges_out.push(key);
        if !self.is_directed() && source != target {
            self.node_mut(target)?.edges_out.push(key);
        }
        if self.directedness.tracks_in_edges() {
            self.node_mut(target)?.edges_in.push(key);
        }
        Ok(AddEdgeResult::Added(self.edge_id(key)))
    }

    /// Removes every edge for which `predicate` returns true and returns the
    /// number of edges removed.
    ///
    /// The predicate is called exactly once per live edge, in insertion
    /// order, against the unmodified graph; removals are committed only after
    /// every edge has been judged.  Handles of removed edges become invalid.
    pub fn prune_edges(&mut self, mut predicate: impl FnMut(&Self, EdgeId) -> bool) -> usize {
        let _span = info_span!("prune_edges").entered();

        let mut doomed = Vec::new();
        for key in self.edges.iter_keys() {
            if predicate(self, self.edge_id(key)) {
                doomed.push(key);
            }
        }
        if doomed.is_empty() {
            return 0;
        }

        let mut removed = DiscoveredSet::new(self.edges.slot_count());
        let mut touched = DiscoveredSet::new(self.nodes.slot_count());
        let mut touched_nodes = Vec::new();
        for &key in &doomed {
            removed.insert(key);
            if let Some(edge) = self.edges.remove(key) {
                for end in [edge.source, edge.target] {
                    if touched.insert(end) {
                        touched_nodes.push(end);
                    }
                }
            }
        }
        for key in touched_nodes {
            if let Some(node) = self.nodes.get_mut(key) {
                node.edges_out.retain(|&k| !removed.contains(k));
                node.edges_in.retain(|&k| !removed.contains(k));
            }
        }

        debug!(
            removed = doomed.len(),
            remaining = self.edges.len(),
            "pruned edges"
        );
        doomed.len()
    }

    // Nodes

    /// Gets an iterator over all node handles in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter_keys().map(|key| self.node_id(key))
    }

    /// Gets the number of nodes in the graph.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.check_valid_node_id(&id).is_ok()
    }

    /// Gets the data associated with a node.
    pub fn node_data(&self, id: NodeId) -> Result<&N, GraphError> {
        Ok(&self.node(id)?.data)
    }

    /// Gets a mutable reference to the data associated with a node.
    pub fn node_data_mut(&mut self, id: NodeId) -> Result<&mut N, GraphError> {
        Ok(&mut self.node_mut(id)?.data)
    }

    /// Gets an iterator over the nodes reachable from `node` through one of
    /// its outgoing edges.  Each successor is reported once.
    pub fn successors(
        &self,
        node: NodeId,
    ) -> Result<impl Iterator<Item = NodeId> + '_, GraphError> {
        let mut visited = HashSet::new();
        Ok(self.node(node)?.edges_out.iter().filter_map(move |&key| {
            let other = self.edges.get(key)?.other_end(node.key());
            visited.insert(other).then(|| self.node_id(other))
        }))
    }

    /// Applies `visitor` to every node in insertion order.
    pub fn forall_nodes(&mut self, mut visitor: impl FnMut(&mut Self, NodeId)) {
        let nodes: Vec<_> = self.nodes().collect();
        for nid in nodes {
            visitor(self, nid);
        }
    }

    // Edges

    /// Gets an iterator over all edge handles in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter_keys().map(|key| self.edge_id(key))
    }

    /// Gets the number of edges in the graph.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.check_valid_edge_id(&id).is_ok()
    }

    /// Gets the data associated with an edge.
    pub fn edge_data(&self, id: EdgeId) -> Result<&E, GraphError> {
        Ok(&self.edge(id)?.data)
    }

    /// Gets a mutable reference to the data associated with an edge.
    pub fn edge_data_mut(&mut self, id: EdgeId) -> Result<&mut E, GraphError> {
        Ok(&mut self.edge_mut(id)?.data)
    }

    /// Gets the source node recorded when the edge was created.
    pub fn source(&self, id: EdgeId) -> Result<NodeId, GraphError> {
        Ok(self.node_id(self.edge(id)?.source))
    }

    /// Gets the target node recorded when the edge was created.
    pub fn target(&self, id: EdgeId) -> Result<NodeId, GraphError> {
        Ok(self.node_id(self.edge(id)?.target))
    }

    /// Gets both ends of an edge as a `(source, target)` pair.
    pub fn edge_ends(&self, id: EdgeId) -> Result<(NodeId, NodeId), GraphError> {
        let edge = self.edge(id)?;
        Ok((self.node_id(edge.source), self.node_id(edge.target)))
    }

    /// Gets an iterator over the edges leaving `node`, in insertion order.
    /// For undirected graphs these are all edges incident to `node`.
    pub fn out_edges(&self, node: NodeId) -> Result<impl Iterator<Item = EdgeId> + '_, GraphError> {
        Ok(self
            .node(node)?
            .edges_out
            .iter()
            .map(move |&key| self.edge_id(key)))
    }

    /// Concatenates the outgoing edges of each node in `nodes`, in the order
    /// given.  No deduplication is done: an undirected edge between two of
    /// the given nodes is reported once for each of them.
    pub fn out_edges_of(
        &self,
        nodes: impl IntoIterator<Item = NodeId>,
    ) -> Result<Vec<EdgeId>, GraphError> {
        let mut result = Vec::new();
        for nid in nodes {
            result.extend(self.out_edges(nid)?);
        }
        Ok(result)
    }

    /// Gets the number of edges leaving `node`.
    pub fn out_degree(&self, node: NodeId) -> Result<usize, GraphError> {
        Ok(self.node(node)?.edges_out.len())
    }

    /// Gets the edges arriving at `node`.  Bidirectional graphs answer from
    /// their stored lists and undirected graphs from the incidence lists;
    /// directed graphs scan every edge.
    pub fn in_edges(&self, node: NodeId) -> Result<impl Iterator<Item = EdgeId> + '_, GraphError> {
        let entry = self.node(node)?;
        let keys: Vec<IdVecKey> = if self.directedness.tracks_in_edges() {
            entry.edges_in.clone()
        } else if !self.is_directed() {
            entry.edges_out.clone()
        } else {
            self.edges
                .iter()
                .filter(|(_, edge)| edge.target == node.key())
                .map(|(key, _)| key)
                .collect()
        };
        Ok(keys.into_iter().map(move |key| self.edge_id(key)))
    }

    /// Finds an edge from `source` to `target` (in either orientation for
    /// undirected graphs).  With parallel edges, the oldest one is returned.
    pub fn find_edge(&self, source: NodeId, target: NodeId) -> Result<Option<EdgeId>, GraphError> {
        self.check_valid_node_id(&source)?;
        self.check_valid_node_id(&target)?;
        Ok(self
            .find_edge_key(source.key(), target.key())
            .map(|key| self.edge_id(key)))
    }

    fn find_edge_key(&self, source: IdVecKey, target: IdVecKey) -> Option<IdVecKey> {
        let directed = self.is_directed();
        self.nodes
            .get(source)?
            .edges_out
            .iter()
            .copied()
            .find(|&key| {
                self.edges.get(key).is_some_and(|edge| {
                    (edge.source == source && edge.target == target)
                        || (!directed && edge.source == target && edge.target == source)
                })
            })
    }

    /// Applies `visitor` to every edge in insertion order.
    pub fn forall_edges(&mut self, mut visitor: impl FnMut(&mut Self, EdgeId)) {
        let edges: Vec<_> = self.edges().collect();
        for eid in edges {
            visitor(self, eid);
        }
    }

    /// Applies `visitor` to every edge leaving `node`.
    pub fn forall_out_edges(
        &mut self,
        node: NodeId,
        mut visitor: impl FnMut(&mut Self, EdgeId),
    ) -> Result<(), GraphError> {
        let edges: Vec<_> = self.out_edges(node)?.collect();
        for eid in edges {
            visitor(self, eid);
        }
        Ok(())
    }
}

impl<N, E, D, M, G> Clone for Graph<N, E, D, M, G>
where
    N: Clone,
    E: Clone,
    G: Clone,
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            data: self.data.clone(),
            id: GraphId::new(),
            directedness: self.directedness,
            multiplicity: self.multiplicity,
        }
    }
}

/// A set of node or edge keys backed by a bit vector indexed by slot.
struct DiscoveredSet {
    bits: bitvec::vec::BitVec,
    count: usize,
}

impl DiscoveredSet {
    fn new(slots: usize) -> Self {
        Self {
            bits: bitvec::vec::BitVec::repeat(false, slots),
            count: 0,
        }
    }

    /// Adds a key, returning true if it was not already present.
    fn insert(&mut self, key: IdVecKey) -> bool {
        let index = key.index();
        if index >= self.bits.len() {
            self.bits.resize(index + 1, false);
        }
        if self.bits[index] {
            false
        } else {
            self.bits.set(index, true);
            self.count += 1;
            true
        }
    }

    fn contains(&self, key: IdVecKey) -> bool {
        self.bits.get(key.index()).is_some_and(|bit| *bit)
    }

    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    fn len(&self) -> usize {
        self.count
    }
}
