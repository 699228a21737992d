use std::collections::HashSet;
use std::hash::Hash;

use quickcheck::Arbitrary;

use crate::prelude::*;
use crate::tracing_support::{info_span, init_tracing};

/// A randomly generated graph with `u32` node and edge data.  Includes some
/// attempted parallel edges and self-loops, so graphs without parallel edges
/// exercise duplicate rejection.
#[derive(Debug, Clone)]
pub struct ArbGraph<D, M>
where
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
{
    pub graph: Graph<u32, u32, D, M>,
}

impl<D, M> Arbitrary for ArbGraph<D, M>
where
    D: DirectednessTrait + Arbitrary,
    M: EdgeMultiplicityTrait + Arbitrary,
{
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let num_nodes = usize::arbitrary(g) % 20; // Limit size for testing
        let num_edges = usize::arbitrary(g) % 50;
        let num_extra_parallel_edges = usize::arbitrary(g) % 5;
        let num_extra_self_loops = usize::arbitrary(g) % 5;

        let mut graph = Graph::with_config(D::arbitrary(g), M::arbitrary(g));
        let nodes: Vec<_> = (0..num_nodes)
            .map(|_| graph.add_node_with(u32::arbitrary(g)))
            .collect();

        for i in 0..num_edges {
            if nodes.is_empty() {
                break;
            }
            let source = nodes[usize::arbitrary(g) % nodes.len()];
            let target = nodes[usize::arbitrary(g) % nodes.len()];
            graph
                .add_edge_with(source, target, u32::arbitrary(g))
                .expect("generated handles are valid");
            if i < num_extra_parallel_edges {
                graph
                    .add_edge_with(source, target, u32::arbitrary(g))
                    .expect("generated handles are valid");
            }
            if i < num_extra_self_loops {
                graph
                    .add_edge_with(source, source, u32::arbitrary(g))
                    .expect("generated handles are valid");
            }
        }

        ArbGraph { graph }
    }
}

pub fn has_duplicates<T: Eq + Hash>(items: impl IntoIterator<Item = T>) -> bool {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return true;
        }
    }
    false
}

/// Nodes adjacent to `node` in either direction, for use with the
/// `pathfinding` oracles.
pub fn undirected_neighbors<N, E, D, M>(graph: &Graph<N, E, D, M>, node: NodeId) -> Vec<NodeId>
where
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
{
    let mut result: Vec<_> = graph.successors(node).unwrap().collect();
    result.extend(graph.in_edges(node).unwrap().map(|e| {
        let (source, target) = graph.edge_ends(e).unwrap();
        if source == node { target } else { source }
    }));
    result
}

/// Checks the internal consistency of a graph.
pub fn check_graph_consistency<N, E, D, M>(graph: &Graph<N, E, D, M>)
where
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
{
    init_tracing();

    for node_id in graph.nodes() {
        {
            let _span = info_span!("check_valid_node_id").entered();
            assert_eq!(graph.check_valid_node_id(&node_id), Ok(()));
        }
        let out: Vec<_> = graph.out_edges(node_id).unwrap().collect();
        assert_eq!(out.len(), graph.out_degree(node_id).unwrap());
        assert!(!has_duplicates(out.iter()));
        for &edge_id in &out {
            let (source, target) = graph.edge_ends(edge_id).unwrap();
            assert!(source == node_id || (!graph.is_directed() && target == node_id));
        }
        for edge_id in graph.in_edges(node_id).unwrap() {
            let (source, target) = graph.edge_ends(edge_id).unwrap();
            assert!(target == node_id || (!graph.is_directed() && source == node_id));
        }
    }

    for edge_id in graph.edges() {
        {
            let _span = info_span!("check_valid_edge_id").entered();
            assert_eq!(graph.check_valid_edge_id(&edge_id), Ok(()));
        }
        let (source, target) = graph.edge_ends(edge_id).unwrap();
        assert!(graph.out_edges(source).unwrap().any(|e| e == edge_id));
        assert!(graph.in_edges(target).unwrap().any(|e| e == edge_id));
        if !graph.is_directed() {
            assert!(graph.out_edges(target).unwrap().any(|e| e == edge_id));
        }
        assert!(graph.find_edge(source, target).unwrap().is_some());
    }

    if !graph.allows_parallel_edges() {
        let mut pairs = HashSet::new();
        for edge_id in graph.edges() {
            let (source, target) = graph.edge_ends(edge_id).unwrap();
            let pair = if graph.is_directed() || source <= target {
                (source, target)
            } else {
                (target, source)
            };
            assert!(pairs.insert(pair), "duplicate edge {pair:?}");
        }
    }

    // Verify node and edge IDs are unique.
    assert!(!has_duplicates(graph.nodes()));
    assert!(!has_duplicates(graph.edges()));

    // Verify counts are correct
    assert_eq!(graph.nodes().count(), graph.num_nodes());
    assert_eq!(graph.edges().count(), graph.num_edges());
    assert_eq!(graph.is_empty(), graph.num_nodes() == 0);
}
