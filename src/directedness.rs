use std::{fmt::Debug, hash::Hash};

/// Marker type representing directed graph edges.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Directed;

/// Marker type representing undirected graph edges.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Undirected;

/// Marker type representing directed graph edges where each node also keeps
/// a list of its incoming edges.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bidirectional;

/// Enum representing the directedness of a graph chosen at runtime.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Directedness {
    Directed,
    Undirected,
    Bidirectional,
}

/// Trait defining the directedness behavior of graph edges.
///
/// This trait is implemented by [`Directed`], [`Undirected`] and
/// [`Bidirectional`] marker types to provide compile-time specialization of
/// graph behavior.  It is also implemented by the [`Directedness`] enum for
/// runtime configuration.
pub trait DirectednessTrait:
    Copy + Clone + Debug + PartialEq + Eq + Hash + PartialOrd + Ord
{
    /// Returns false only for undirected graphs, where `(a, b)` and `(b, a)`
    /// name the same edge.
    fn is_directed(&self) -> bool;

    /// Returns true if nodes keep a list of incoming edges.
    fn tracks_in_edges(&self) -> bool;
}

impl DirectednessTrait for Directed {
    fn is_directed(&self) -> bool {
        true
    }

    fn tracks_in_edges(&self) -> bool {
        false
    }
}

impl DirectednessTrait for Undirected {
    fn is_directed(&self) -> bool {
        false
    }

    fn tracks_in_edges(&self) -> bool {
        false
    }
}

impl DirectednessTrait for Bidirectional {
    fn is_directed(&self) -> bool {
        true
    }

    fn tracks_in_edges(&self) -> bool {
        true
    }
}

impl DirectednessTrait for Directedness {
    fn is_directed(&self) -> bool {
        match self {
            Directedness::Directed | Directedness::Bidirectional => true,
            Directedness::Undirected => false,
        }
    }

    fn tracks_in_edges(&self) -> bool {
        matches!(self, Directedness::Bidirectional)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Directedness {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[
            Directedness::Directed,
            Directedness::Undirected,
            Directedness::Bidirectional,
        ])
        .expect("non-empty choices")
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Directed {
    fn arbitrary(_g: &mut quickcheck::Gen) -> Self {
        Directed
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Undirected {
    fn arbitrary(_g: &mut quickcheck::Gen) -> Self {
        Undirected
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Bidirectional {
    fn arbitrary(_g: &mut quickcheck::Gen) -> Self {
        Bidirectional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_match_enum() {
        assert_eq!(Directed.is_directed(), Directedness::Directed.is_directed());
        assert_eq!(
            Undirected.is_directed(),
            Directedness::Undirected.is_directed()
        );
        assert_eq!(
            Bidirectional.tracks_in_edges(),
            Directedness::Bidirectional.tracks_in_edges()
        );
        assert!(!Directed.tracks_in_edges());
        assert!(!Undirected.tracks_in_edges());
    }
}
