pub use crate::{
    AddEdgeResult, BfsIterator, BiGraph, Bidirectional, Coloring, DiGraph, Directed,
    Directedness, DirectednessTrait, EdgeId, EdgeMultiplicity, EdgeMultiplicityTrait, Graph,
    GraphError, MultiBiGraph, MultiDiGraph, MultiUnGraph, MultipleEdges, NodeId, SingleEdge,
    UnGraph, Undirected,
};
