//! The metro network model.
//!
//! A [`NetworkGraph`] is built once at startup (usually from the text
//! format, see [`parse_network`]), made connected by
//! [`repair_connectivity`], and then shared read-only between queries.

mod connectivity;
mod load;
mod parse;
mod snapshot;

pub use connectivity::{RepairReport, is_connected, repair_connectivity};
pub use load::{LoadError, load_network};
pub use parse::{ParseError, ParseErrorKind, ParsedNetwork, parse_network, parse_positions};
pub use snapshot::{EdgeRecord, NetworkSnapshot, StationRecord};

use std::collections::{BTreeMap, HashMap};

use crate::domain::{DomainError, Neighbor, Position, Station, StationId};

/// A query referenced a station id absent from the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown station {0}")]
pub struct UnknownStation(pub StationId);

/// Undirected, weighted station graph.
///
/// Adjacency is stored explicitly on both endpoints: adding the edge
/// `(a, b, t)` lists `b` under `a` and `a` under `b` with the same time.
/// Stations are kept in ascending id order so every traversal is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    stations: BTreeMap<StationId, Station>,
}

impl NetworkGraph {
    /// Look up a station, failing with [`UnknownStation`].
    pub fn station(&self, id: StationId) -> Result<&Station, UnknownStation> {
        self.stations.get(&id).ok_or(UnknownStation(id))
    }

    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    pub fn contains(&self, id: StationId) -> bool {
        self.stations.contains_key(&id)
    }

    /// All stations in ascending id order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// All station ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = StationId> + '_ {
        self.stations.keys().copied()
    }

    /// Neighbors of a station; empty for unknown ids.
    pub fn neighbors(&self, id: StationId) -> &[Neighbor] {
        self.stations
            .get(&id)
            .map(Station::neighbors)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Every undirected edge once, as `(smaller id, larger id, time)`.
    pub fn edges(&self) -> Vec<(StationId, StationId, u32)> {
        self.stations
            .values()
            .flat_map(|s| {
                s.neighbors()
                    .iter()
                    .filter(move |n| s.id < n.station)
                    .map(move |n| (s.id, n.station, n.time))
            })
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Travel time of the direct edge between two stations, if any.
    pub fn edge_time(&self, a: StationId, b: StationId) -> Option<u32> {
        self.neighbors(a)
            .iter()
            .find(|n| n.station == b)
            .map(|n| n.time)
    }

    /// Insert a symmetric edge.
    ///
    /// A second edge between the same pair keeps the shorter time, so a
    /// neighbor is never listed twice.
    pub(crate) fn add_edge(
        &mut self,
        a: StationId,
        b: StationId,
        time: u32,
    ) -> Result<(), DomainError> {
        if a == b {
            return Err(DomainError::SelfLoop(a));
        }
        if time == 0 {
            return Err(DomainError::NonPositiveWeight(a, b));
        }
        for id in [a, b] {
            if !self.stations.contains_key(&id) {
                return Err(DomainError::UnknownEndpoint(id));
            }
        }
        self.link(a, b, time);
        self.link(b, a, time);
        Ok(())
    }

    fn link(&mut self, from: StationId, to: StationId, time: u32) {
        let Some(station) = self.stations.get_mut(&from) else {
            return;
        };
        match station.neighbors.iter_mut().find(|n| n.station == to) {
            Some(existing) => existing.time = existing.time.min(time),
            None => station.neighbors.push(Neighbor { station: to, time }),
        }
    }

    /// Attach map positions to the stations whose cleaned name matches.
    ///
    /// Returns the number of stations that received a position.
    pub fn attach_positions(&mut self, positions: &[(String, Position)]) -> usize {
        let by_name: HashMap<&str, Position> = positions
            .iter()
            .map(|(name, pos)| (name.as_str(), *pos))
            .collect();

        let mut attached = 0;
        for station in self.stations.values_mut() {
            if let Some(pos) = by_name.get(parse::clean_station_name(&station.name).as_str()) {
                station.position = Some(*pos);
                attached += 1;
            }
        }
        attached
    }

    /// Search stations by name or line, case-insensitively.
    ///
    /// Exact name matches rank first, then name prefixes, then any other
    /// substring or line match; ties are broken by name then id.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Station> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, String, &Station)> = self
            .stations
            .values()
            .filter_map(|s| {
                let name = s.name.to_lowercase();
                let rank = if name == needle {
                    0
                } else if name.starts_with(&needle) {
                    1
                } else if name.contains(&needle)
                    || s.lines().keys().any(|l| l.as_str().eq_ignore_ascii_case(&needle))
                {
                    2
                } else {
                    return None;
                };
                Some((rank, name, s))
            })
            .collect();

        matches.sort_by(|a, b| (a.0, &a.1, a.2.id).cmp(&(b.0, &b.1, b.2.id)));
        matches.into_iter().take(limit).map(|(_, _, s)| s).collect()
    }
}

/// Incremental constructor for a [`NetworkGraph`].
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    graph: NetworkGraph,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station, or merge another line record into an existing one.
    ///
    /// A repeated id must carry the same name. Its lines are merged, the
    /// terminus flag is OR-ed, and a missing position is filled in.
    pub fn add_station(&mut self, station: Station) -> Result<&mut Self, DomainError> {
        match self.graph.stations.get_mut(&station.id) {
            Some(existing) => {
                if existing.name != station.name {
                    return Err(DomainError::NameMismatch {
                        id: station.id,
                        existing: existing.name.clone(),
                        new: station.name,
                    });
                }
                for (line, branch) in station.lines() {
                    existing.add_line(line.clone(), branch.clone())?;
                }
                existing.is_terminus |= station.is_terminus;
                if existing.position.is_none() {
                    existing.position = station.position;
                }
            }
            None => {
                let mut station = station;
                station.neighbors.clear();
                self.graph.stations.insert(station.id, station);
            }
        }
        Ok(self)
    }

    /// Add an undirected edge between two declared stations.
    pub fn add_edge(
        &mut self,
        a: StationId,
        b: StationId,
        time: u32,
    ) -> Result<&mut Self, DomainError> {
        self.graph.add_edge(a, b, time)?;
        Ok(self)
    }

    pub fn contains(&self, id: StationId) -> bool {
        self.graph.contains(id)
    }

    pub fn build(self) -> NetworkGraph {
        self.graph
    }
}
