use std::{fmt::Debug, hash::Hash};

/// Marker for graphs in which at most one edge joins a node pair.  Adding a
/// second one reports the existing edge instead.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SingleEdge;

/// Marker for multigraphs: any number of edges may join the same node pair.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MultipleEdges;

/// Edge multiplicity chosen at runtime.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum EdgeMultiplicity {
    SingleEdge,
    MultipleEdges,
}

/// Whether a graph accepts parallel edges.
///
/// Implemented by the [`SingleEdge`] and [`MultipleEdges`] markers, which fix
/// the choice in the graph's type, and by [`EdgeMultiplicity`], which defers
/// it to construction time.
pub trait EdgeMultiplicityTrait:
    Copy + Clone + Debug + PartialEq + Eq + Hash + PartialOrd + Ord
{
    /// Returns true if `add_edge` may create an edge between nodes that are
    /// already connected.
    fn allows_parallel_edges(&self) -> bool;
}

impl EdgeMultiplicityTrait for SingleEdge {
    fn allows_parallel_edges(&self) -> bool {
        false
    }
}

impl EdgeMultiplicityTrait for MultipleEdges {
    fn allows_parallel_edges(&self) -> bool {
        true
    }
}

impl EdgeMultiplicityTrait for EdgeMultiplicity {
    fn allows_parallel_edges(&self) -> bool {
        matches!(self, EdgeMultiplicity::MultipleEdges)
    }
}

impl From<SingleEdge> for EdgeMultiplicity {
    fn from(_: SingleEdge) -> Self {
        EdgeMultiplicity::SingleEdge
    }
}

impl From<MultipleEdges> for EdgeMultiplicity {
    fn from(_: MultipleEdges) -> Self {
        EdgeMultiplicity::MultipleEdges
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for EdgeMultiplicity {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        if bool::arbitrary(g) {
            EdgeMultiplicity::SingleEdge
        } else {
            EdgeMultiplicity::MultipleEdges
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for SingleEdge {
    fn arbitrary(_g: &mut quickcheck::Gen) -> Self {
        SingleEdge
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for MultipleEdges {
    fn arbitrary(_g: &mut quickcheck::Gen) -> Self {
        MultipleEdges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_match_enum() {
        for marker in [
            EdgeMultiplicity::from(SingleEdge),
            EdgeMultiplicity::from(MultipleEdges),
        ] {
            let expected = marker == EdgeMultiplicity::MultipleEdges;
            assert_eq!(marker.allows_parallel_edges(), expected);
        }
        assert!(!SingleEdge.allows_parallel_edges());
        assert!(MultipleEdges.allows_parallel_edges());
    }
}
