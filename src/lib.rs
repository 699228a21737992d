//! A generic, handle-based graph container.
//!
//! [`Graph`] stores node and edge properties of arbitrary types and is
//! parameterized by its [directedness](DirectednessTrait) and its
//! [edge multiplicity](EdgeMultiplicityTrait), either fixed at compile time
//! with marker types or chosen at runtime with the [`Directedness`] and
//! [`EdgeMultiplicity`] enums.
//!
//! ```
//! use graphkit::prelude::*;
//!
//! let mut graph = UnGraph::<&str, u32>::new();
//! let a = graph.add_node_with("a");
//! let b = graph.add_node_with("b");
//! let c = graph.add_node_with("c");
//! graph.add_edge_with(a, b, 1)?;
//! graph.add_edge_with(b, c, 2)?;
//!
//! assert_eq!(graph.bfs(a)?.collect::<Vec<_>>(), vec![a, b, c]);
//! assert_eq!(graph.connected_components().len(), 1);
//! # Ok::<(), GraphError>(())
//! ```

pub mod directedness;
pub mod edge_multiplicity;
pub mod error;
pub mod graph;
mod graph_id;
mod id_vec;
pub mod ids;
pub mod prelude;
pub mod tracing_support;

#[cfg(test)]
mod graph_test_support;

pub use crate::directedness::{
    Bidirectional, Directed, Directedness, DirectednessTrait, Undirected,
};
pub use crate::edge_multiplicity::{
    EdgeMultiplicity, EdgeMultiplicityTrait, MultipleEdges, SingleEdge,
};
pub use crate::error::GraphError;
pub use crate::graph::{
    AddEdgeResult, BfsIterator, BiGraph, Coloring, DiGraph, Graph, MultiBiGraph, MultiDiGraph,
    MultiUnGraph, UnGraph,
};
pub use crate::ids::{EdgeId, NodeId};
