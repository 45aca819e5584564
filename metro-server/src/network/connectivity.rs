//! Connectivity check and repair.
//!
//! Queries assume every station can reach every other one. Before the first
//! query is served, stations unreachable from an anchor are bridged to it
//! with a synthetic edge whose travel time is large enough that the search
//! only takes it when no genuine route exists.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};

use crate::domain::StationId;

use super::NetworkGraph;

/// Outcome of a connectivity repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairReport {
    /// Station every orphan was bridged to. `None` for an empty network.
    pub anchor: Option<StationId>,

    /// Stations that received a synthetic edge, in ascending id order.
    pub bridged: Vec<StationId>,
}

impl RepairReport {
    /// True when the network was already connected.
    pub fn was_connected(&self) -> bool {
        self.bridged.is_empty()
    }
}

/// Ids reachable from `start`, breadth first.
fn reachable_from(graph: &NetworkGraph, start: StationId) -> HashSet<StationId> {
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(id) = queue.pop_front() {
        for n in graph.neighbors(id) {
            if visited.insert(n.station) {
                queue.push_back(n.station);
            }
        }
    }

    visited
}

/// Whether every station is reachable from every other. An empty network
/// counts as connected.
pub fn is_connected(graph: &NetworkGraph) -> bool {
    match graph.ids().next() {
        Some(start) => reachable_from(graph, start).len() == graph.len(),
        None => true,
    }
}

/// Bridge every station unreachable from the anchor (the lowest id) with a
/// direct edge of `penalty` seconds.
///
/// Each orphan is linked to the anchor individually, so one pass connects
/// any number of separate clusters. Running it again is a no-op.
pub fn repair_connectivity(graph: &mut NetworkGraph, penalty: u32) -> RepairReport {
    let Some(anchor) = graph.ids().next() else {
        return RepairReport {
            anchor: None,
            bridged: Vec::new(),
        };
    };

    let reachable = reachable_from(graph, anchor);
    let orphans: Vec<StationId> = graph.ids().filter(|id| !reachable.contains(id)).collect();
    debug!(
        anchor = %anchor,
        reachable = reachable.len(),
        orphans = orphans.len(),
        "connectivity check"
    );

    let penalty = penalty.max(1);
    let mut bridged = Vec::with_capacity(orphans.len());
    for orphan in orphans {
        match graph.add_edge(orphan, anchor, penalty) {
            Ok(()) => {
                info!(station = %orphan, anchor = %anchor, penalty, "bridged orphan station");
                bridged.push(orphan);
            }
            // Both endpoints are known and distinct
            Err(e) => debug!(station = %orphan, error = %e, "could not bridge station"),
        }
    }

    RepairReport {
        anchor: Some(anchor),
        bridged,
    }
}
