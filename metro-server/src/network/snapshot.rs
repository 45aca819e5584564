//! JSON snapshots of the network.
//!
//! The web client draws the network from a snapshot: stations sorted by
//! name and every edge listed once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Branch, DomainError, Line, Position, Station, StationId};

use super::{NetworkBuilder, NetworkGraph};

/// A station as it appears in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: StationId,
    pub name: String,
    /// Line → branch.
    pub lines: BTreeMap<Line, Branch>,
    pub terminus: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl StationRecord {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id,
            name: station.name.clone(),
            lines: station.lines().clone(),
            terminus: station.is_terminus,
            position: station.position,
        }
    }
}

/// An undirected edge in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub start: StationId,
    pub end: StationId,
    pub time: u32,
}

/// Serializable view of a whole network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub stations: Vec<StationRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl NetworkSnapshot {
    /// Capture a graph. Stations are ordered by case-insensitive name.
    pub fn from_graph(graph: &NetworkGraph) -> Self {
        let mut stations: Vec<StationRecord> =
            graph.stations().map(StationRecord::from_station).collect();
        stations.sort_by_cached_key(|s| (s.name.to_lowercase(), s.id));

        let edges = graph
            .edges()
            .into_iter()
            .map(|(start, end, time)| EdgeRecord { start, end, time })
            .collect();

        Self { stations, edges }
    }

    /// Rebuild a graph, validating every record.
    pub fn into_graph(self) -> Result<NetworkGraph, DomainError> {
        let mut builder = NetworkBuilder::new();
        for record in self.stations {
            let mut station = Station::with_lines(record.id, record.name, record.lines)?
                .terminus(record.terminus);
            station.position = record.position;
            builder.add_station(station)?;
        }
        for edge in self.edges {
            builder.add_edge(edge.start, edge.end, edge.time)?;
        }
        Ok(builder.build())
    }
}
