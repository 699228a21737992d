#[cfg(not(feature = "unchecked"))]
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of graph identifiers.  Wrapping around after `usize::MAX` graphs
/// would only let a handle from one graph pass the ownership check of
/// another.
#[cfg(not(feature = "unchecked"))]
static GRAPH_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A unique identifier for a graph instance, stamped into every handle the
/// graph hands out.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct GraphId(#[cfg(not(feature = "unchecked"))] usize);

impl GraphId {
    /// Create a new unique graph identifier.
    pub fn new() -> Self {
        #[cfg(feature = "unchecked")]
        {
            GraphId()
        }
        #[cfg(not(feature = "unchecked"))]
        {
            let id = GRAPH_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
            GraphId(id)
        }
    }
}
