//! Minimum spanning trees of the network.
//!
//! Both builders run on the graph as served, synthetic bridges from
//! connectivity repair included. On a graph that is still disconnected
//! they return what they could build and report `spans_all == false`.

mod kruskal;
mod prim;
mod union_find;

pub use kruskal::kruskal;
pub use prim::prim;
pub use union_find::UnionFind;

use serde::Serialize;

use crate::domain::StationId;

/// One accepted edge. For Prim, `a` is the endpoint already in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeEdge {
    pub a: StationId,
    pub b: StationId,
    pub weight: u32,
}

/// Edges of a spanning tree (or forest) in the order they were accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanningTree {
    pub edges: Vec<TreeEdge>,
    pub total_weight: u64,
    /// False when some station could not be connected.
    pub spans_all: bool,
}

impl SpanningTree {
    fn new(edges: Vec<TreeEdge>, spans_all: bool) -> Self {
        let total_weight = edges.iter().map(|e| u64::from(e.weight)).sum();
        Self {
            edges,
            total_weight,
            spans_all,
        }
    }

    /// Whether the tree contains the edge between `a` and `b`, either way
    /// round.
    pub fn contains(&self, a: StationId, b: StationId) -> bool {
        self.edges
            .iter()
            .any(|e| (e.a == a && e.b == b) || (e.a == b && e.b == a))
    }
}
