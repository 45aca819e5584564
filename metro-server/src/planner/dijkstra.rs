//! Shortest path search.
//!
//! A label-setting Dijkstra over the station graph. The frontier minimum is
//! found by a linear scan rather than a heap: networks hold a few hundred
//! stations, and the scan keeps tie-breaking trivially deterministic (lowest
//! cumulative time, then lowest id).

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, trace};

use crate::domain::StationId;
use crate::network::{NetworkGraph, UnknownStation};

/// Error from a route query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A station id is absent from the network
    #[error(transparent)]
    UnknownStation(#[from] UnknownStation),

    /// The search exhausted the graph without reaching the destination
    #[error("no route from station {origin} to station {destination}")]
    NoRoute {
        origin: StationId,
        destination: StationId,
    },
}

/// Predecessor and cumulative travel time of a discovered station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathEntry {
    pub predecessor: StationId,
    /// Seconds from the origin.
    pub time: u32,
}

/// The predecessor/cost map produced by one search.
///
/// The origin is never a key: it has no predecessor, so no path can loop
/// back through it.
#[derive(Debug, Clone)]
pub struct PathTree {
    origin: StationId,
    entries: BTreeMap<StationId, PathEntry>,
}

impl PathTree {
    pub fn origin(&self) -> StationId {
        self.origin
    }

    /// Entry for a discovered station. `None` for the origin.
    pub fn get(&self, id: StationId) -> Option<&PathEntry> {
        self.entries.get(&id)
    }

    /// All discovered entries, by station id.
    pub fn entries(&self) -> impl Iterator<Item = (StationId, &PathEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cumulative time to a station: 0 for the origin, `None` if the
    /// station was never discovered.
    pub fn time_to(&self, id: StationId) -> Option<u32> {
        if id == self.origin {
            return Some(0);
        }
        self.entries.get(&id).map(|e| e.time)
    }

    /// Station ids from the origin to `destination`, both included.
    ///
    /// Walks predecessors backwards; `None` if `destination` was never
    /// discovered.
    pub fn path_to(&self, destination: StationId) -> Option<Vec<StationId>> {
        let mut path = vec![destination];
        let mut current = destination;

        while current != self.origin {
            let entry = self.entries.get(&current)?;
            current = entry.predecessor;
            path.push(current);
            // Every step moves strictly closer to the origin in time, so
            // the walk ends within entries.len() steps
            if path.len() > self.entries.len() + 1 {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}

/// Compute the shortest-path tree from `origin` until `destination` is
/// settled.
///
/// The returned tree holds every station discovered up to that point, not
/// only the path to the destination. Fails with [`RouteError::NoRoute`]
/// when the frontier empties first.
pub fn shortest_paths(
    graph: &NetworkGraph,
    origin: StationId,
    destination: StationId,
) -> Result<PathTree, RouteError> {
    graph.station(origin)?;
    graph.station(destination)?;

    let mut entries: BTreeMap<StationId, PathEntry> = BTreeMap::new();
    let mut settled: HashSet<StationId> = HashSet::new();
    let mut current = (origin, 0u32);

    while current.0 != destination {
        let (station, time) = current;
        settled.insert(station);

        for n in graph.neighbors(station) {
            if n.station == origin || settled.contains(&n.station) {
                continue;
            }
            let candidate = time.saturating_add(n.time);
            let improved = entries
                .get(&n.station)
                .is_none_or(|existing| candidate < existing.time);
            if improved {
                trace!(station = %n.station, via = %station, time = candidate, "relaxed");
                entries.insert(
                    n.station,
                    PathEntry {
                        predecessor: station,
                        time: candidate,
                    },
                );
            }
        }

        // BTreeMap iterates in id order, so strict `<` keeps the lowest id
        // among equal times
        let mut next: Option<(StationId, u32)> = None;
        for (id, entry) in &entries {
            if settled.contains(id) {
                continue;
            }
            if next.is_none_or(|(_, best)| entry.time < best) {
                next = Some((*id, entry.time));
            }
        }

        current = match next {
            Some(next) => next,
            None => {
                debug!(%origin, %destination, settled = settled.len(), "no route");
                return Err(RouteError::NoRoute {
                    origin,
                    destination,
                });
            }
        };
    }

    debug!(
        %origin,
        %destination,
        time = current.1,
        discovered = entries.len(),
        "shortest path found"
    );

    Ok(PathTree { origin, entries })
}
