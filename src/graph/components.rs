use std::ops::Index;

use super::{DiscoveredSet, Graph};
use crate::{
    directedness::DirectednessTrait,
    edge_multiplicity::EdgeMultiplicityTrait,
    error::GraphError,
    ids::{EdgeId, NodeId},
    tracing_support::{debug, info_span},
};

/// Assignment of a component id to every node of a graph, filled in by
/// [`Graph::connected_components_coloring`].  Ids are in `0..num_colors()`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coloring {
    nodes: Vec<NodeId>,
    colors: Vec<Option<usize>>,
    num_colors: usize,
}

impl Coloring {
    /// Creates an empty coloring.
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, slots: usize) {
        self.nodes.clear();
        self.colors.clear();
        self.colors.resize(slots, None);
        self.num_colors = 0;
    }

    fn assign(&mut self, node: NodeId, color: usize) {
        self.nodes.push(node);
        self.colors[node.index()] = Some(color);
    }

    /// Gets the component id of a node, if the node was colored.
    pub fn get(&self, node: NodeId) -> Option<usize> {
        self.colors.get(node.index()).copied().flatten()
    }

    /// Iterates over `(node, component id)` pairs in the graph's node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.nodes
            .iter()
            .filter_map(|&node| self.get(node).map(|color| (node, color)))
    }

    /// Gets the number of colored nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Gets the number of distinct component ids.
    pub fn num_colors(&self) -> usize {
        self.num_colors
    }
}

impl Index<NodeId> for Coloring {
    type Output = usize;

    fn index(&self, node: NodeId) -> &usize {
        match self.colors.get(node.index()) {
            Some(Some(color)) => color,
            _ => panic!("{node:?} is not colored"),
        }
    }
}

/// Disjoint-set forest over node slots, with union by rank and path
/// compression.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = i;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);
        if root_i == root_j {
            return;
        }
        match self.rank[root_i].cmp(&self.rank[root_j]) {
            std::cmp::Ordering::Less => self.parent[root_i] = root_j,
            std::cmp::Ordering::Greater => self.parent[root_j] = root_i,
            std::cmp::Ordering::Equal => {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

impl<N, E, D, M, G> Graph<N, E, D, M, G>
where
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
{
    /// Computes connected components, ignoring edge direction, and writes the
    /// component id of every node into `coloring`.  Returns the number of
    /// components.
    ///
    /// Ids are assigned in order of first appearance in [`Self::nodes`], so
    /// the result is deterministic for a given graph.
    pub fn connected_components_coloring(&self, coloring: &mut Coloring) -> usize {
        let _span = info_span!("connected_components").entered();

        let slots = self.nodes.slot_count();
        let mut forest = UnionFind::new(slots);
        for (_, edge) in self.edges.iter() {
            forest.union(edge.source.index(), edge.target.index());
        }

        coloring.reset(slots);
        let mut root_colors: Vec<Option<usize>> = vec![None; slots];
        let mut next_color = 0;
        for key in self.nodes.iter_keys() {
            let root = forest.find(key.index());
            let color = match root_colors[root] {
                Some(color) => color,
                None => {
                    let color = next_color;
                    next_color += 1;
                    root_colors[root] = Some(color);
                    color
                }
            };
            coloring.assign(self.node_id(key), color);
        }
        coloring.num_colors = next_color;

        debug!(
            components = next_color,
            nodes = self.nodes.len(),
            "computed connected components"
        );
        next_color
    }

    /// Partitions the nodes into connected components, ignoring edge
    /// direction.  Components are ordered by their first node in
    /// [`Self::nodes`] order, and nodes within a component keep that order.
    pub fn connected_components(&self) -> Vec<Vec<NodeId>> {
        let mut coloring = Coloring::new();
        let count = self.connected_components_coloring(&mut coloring);
        let mut components = vec![Vec::new(); count];
        for (node, color) in coloring.iter() {
            components[color].push(node);
        }
        components
    }

    /// Gets the edges whose two ends both lie in `component`, in the order of
    /// the component's nodes and then their outgoing edges.  Each edge is
    /// reported once.
    pub fn component_edges(&self, component: &[NodeId]) -> Result<Vec<EdgeId>, GraphError> {
        let mut members = DiscoveredSet::new(self.nodes.slot_count());
        for node in component {
            self.check_valid_node_id(node)?;
            members.insert(node.key());
        }

        let mut result = Vec::new();
        let mut seen = DiscoveredSet::new(self.edges.slot_count());
        for node in component {
            for &edge_key in &self.node(*node)?.edges_out {
                let Some(edge) = self.edges.get(edge_key) else {
                    continue;
                };
                if members.contains(edge.other_end(node.key())) && seen.insert(edge_key) {
                    result.push(self.edge_id(edge_key));
                }
            }
        }
        Ok(result)
    }
}
