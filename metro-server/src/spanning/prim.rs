//! Prim's minimum spanning tree, grown from a start station.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::StationId;
use crate::network::{NetworkGraph, UnknownStation};

use super::{SpanningTree, TreeEdge};

/// Grow a minimum spanning tree from `start`.
///
/// Each round scans every edge with exactly one endpoint in the tree, in
/// the order stations joined the tree and then adjacency order, and takes
/// the lightest; the first one seen wins a tie. Stops when every station
/// is in the tree or no edge leaves it, in which case the partial tree is
/// returned with `spans_all == false`.
pub fn prim(graph: &NetworkGraph, start: StationId) -> Result<SpanningTree, UnknownStation> {
    graph.station(start)?;

    let mut order = vec![start];
    let mut in_tree: HashSet<StationId> = HashSet::from([start]);
    let mut edges = Vec::new();

    while in_tree.len() < graph.len() {
        let mut best: Option<TreeEdge> = None;
        for &from in &order {
            for n in graph.neighbors(from) {
                if in_tree.contains(&n.station) {
                    continue;
                }
                if best.as_ref().is_none_or(|b| n.time < b.weight) {
                    best = Some(TreeEdge {
                        a: from,
                        b: n.station,
                        weight: n.time,
                    });
                }
            }
        }

        let Some(edge) = best else {
            debug!(%start, reached = in_tree.len(), total = graph.len(), "prim stopped early");
            break;
        };
        in_tree.insert(edge.b);
        order.push(edge.b);
        edges.push(edge);
    }

    Ok(SpanningTree::new(edges, in_tree.len() == graph.len()))
}
