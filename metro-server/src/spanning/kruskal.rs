//! Kruskal's minimum spanning tree over the whole network.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::StationId;
use crate::network::NetworkGraph;

use super::union_find::UnionFind;
use super::{SpanningTree, TreeEdge};

/// Minimum spanning forest by ascending edge weight.
///
/// Every undirected edge is considered once. Equal weights keep the
/// graph's edge order (smaller endpoint id first). An edge is accepted
/// when its endpoints are in different groups.
pub fn kruskal(graph: &NetworkGraph) -> SpanningTree {
    let index: HashMap<StationId, usize> = graph.ids().enumerate().map(|(i, id)| (id, i)).collect();
    let mut groups = UnionFind::new(index.len());

    let mut candidates = graph.edges();
    candidates.sort_by_key(|&(_, _, time)| time);

    let mut edges = Vec::new();
    for (a, b, weight) in candidates {
        if groups.groups() <= 1 {
            break;
        }
        if groups.union(index[&a], index[&b]) {
            edges.push(TreeEdge { a, b, weight });
        }
    }

    let spans_all = groups.groups() <= 1;
    if !spans_all {
        debug!(components = groups.groups(), "kruskal produced a forest");
    }
    SpanningTree::new(edges, spans_all)
}
