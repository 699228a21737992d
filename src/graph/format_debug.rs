use std::fmt::{Debug, Formatter};

use super::Graph;
use crate::{directedness::DirectednessTrait, edge_multiplicity::EdgeMultiplicityTrait};

struct NodeTag(usize);

impl Debug for NodeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct EdgeTag(usize, usize, bool);

impl Debug for EdgeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.2 {
            write!(f, "{} -> {}", self.0, self.1)
        } else {
            write!(f, "{} -- {}", self.0, self.1)
        }
    }
}

/// Maps node slots to sequential tags in iteration order.
struct NodeTags(Vec<usize>);

impl NodeTags {
    fn new<N, E, D, M, G>(graph: &Graph<N, E, D, M, G>) -> Self
    where
        D: DirectednessTrait,
        M: EdgeMultiplicityTrait,
    {
        let mut tags = vec![0; graph.nodes.slot_count()];
        for (i, key) in graph.nodes.iter_keys().enumerate() {
            tags[key.index()] = i;
        }
        NodeTags(tags)
    }
}

struct NodeDebug<'a, N, E, D: DirectednessTrait, M: EdgeMultiplicityTrait, G> {
    graph: &'a Graph<N, E, D, M, G>,
    show_data: bool,
}

impl<N, E, D, M, G> Debug for NodeDebug<'_, N, E, D, M, G>
where
    N: Debug,
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let nodes = self.graph.nodes.iter().enumerate();
        if self.show_data {
            f.debug_map()
                .entries(nodes.map(|(i, (_, node))| (NodeTag(i), &node.data)))
                .finish()
        } else {
            f.debug_list()
                .entries(nodes.map(|(i, _)| NodeTag(i)))
                .finish()
        }
    }
}

struct EdgeDebug<'a, N, E, D: DirectednessTrait, M: EdgeMultiplicityTrait, G> {
    graph: &'a Graph<N, E, D, M, G>,
    node_tags: &'a NodeTags,
    show_data: bool,
}

impl<N, E, D, M, G> Debug for EdgeDebug<'_, N, E, D, M, G>
where
    E: Debug,
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let directed = self.graph.is_directed();
        let tags = &self.node_tags.0;
        let edges = self.graph.edges.iter().map(|(_, edge)| {
            (
                EdgeTag(tags[edge.source.index()], tags[edge.target.index()], directed),
                &edge.data,
            )
        });
        if self.show_data {
            f.debug_map().entries(edges).finish()
        } else {
            f.debug_list().entries(edges.map(|(tag, _)| tag)).finish()
        }
    }
}

/// Nodes are numbered in iteration order.  Node, edge or graph data is
/// omitted when its type is zero-sized.
impl<N, E, D, M, G> Debug for Graph<N, E, D, M, G>
where
    N: Debug,
    E: Debug,
    G: Debug,
    D: DirectednessTrait,
    M: EdgeMultiplicityTrait,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let node_tags = NodeTags::new(self);
        let mut out = f.debug_struct("Graph");
        out.field(
            "nodes",
            &NodeDebug {
                graph: self,
                show_data: std::mem::size_of::<N>() != 0,
            },
        )
        .field(
            "edges",
            &EdgeDebug {
                graph: self,
                node_tags: &node_tags,
                show_data: std::mem::size_of::<E>() != 0,
            },
        );
        if std::mem::size_of::<G>() != 0 {
            out.field("data", &self.data);
        }
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_debug_directed_with_data() {
        let mut graph = DiGraph::<&str, i32>::new();
        let a = graph.add_node_with("A");
        let b = graph.add_node_with("B");
        graph.add_edge_with(a, b, 10).unwrap();
        assert_eq!(
            format!("{graph:?}"),
            r#"Graph { nodes: {0: "A", 1: "B"}, edges: {0 -> 1: 10} }"#
        );
    }

    #[test]
    fn test_debug_undirected_without_data() {
        let mut graph = UnGraph::<(), ()>::new();
        let a = graph.add_node();
        let b = graph.add_node();
        let c = graph.add_node();
        graph.add_edge(c, a).unwrap();
        graph.add_edge(a, b).unwrap();
        assert_eq!(
            format!("{graph:?}"),
            "Graph { nodes: [0, 1, 2], edges: [2 -- 0, 0 -- 1] }"
        );
    }

    #[test]
    fn test_debug_skips_pruned_edges() {
        let mut graph = DiGraph::<(), u8>::new();
        let a = graph.add_node();
        let b = graph.add_node();
        graph.add_edge_with(a, b, 1).unwrap();
        graph.add_edge_with(b, a, 2).unwrap();
        graph.prune_edges(|g, e| *g.edge_data(e).unwrap() == 1);
        assert_eq!(
            format!("{graph:?}"),
            "Graph { nodes: [0, 1], edges: {1 -> 0: 2} }"
        );
    }

    #[test]
    fn test_debug_shows_graph_data() {
        let mut graph = UnGraph::<(), (), &str>::with_data("roads");
        let a = graph.add_node();
        graph.add_edge(a, a).unwrap();
        assert_eq!(
            format!("{graph:?}"),
            r#"Graph { nodes: [0], edges: [0 -- 0], data: "roads" }"#
        );
    }
}
