//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Station, StationId};
use crate::planner::Itinerary;
use crate::spanning::SpanningTree;

/// Query for `/dijkstra`. Ids are kept as strings so a malformed value is
/// reported as our own 400 rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Origin station id
    pub s1: Option<String>,

    /// Destination station id
    pub s2: Option<String>,
}

/// Query for `/prim`.
#[derive(Debug, Deserialize)]
pub struct PrimQuery {
    /// Start station id; the lowest id when absent
    pub start: Option<String>,
}

/// Request to search stations by name or line.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Search query
    pub q: String,

    /// Maximum number of results (default 10)
    pub limit: Option<usize>,
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationSearchResult {
    pub id: StationId,
    pub name: String,
    pub lines: Vec<String>,
    pub terminus: bool,
}

impl StationSearchResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id,
            name: station.name.clone(),
            lines: station
                .lines()
                .keys()
                .map(|l| l.as_str().to_string())
                .collect(),
            terminus: station.is_terminus,
        }
    }
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationSearchResult>,
}

/// One hop of a route.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LegResult {
    pub from: StationId,
    pub to: StationId,
    /// Line ridden, or `<line>-walk` for a walking gap
    pub tag: String,
}

/// Response for `/dijkstra`.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Station ids from origin to destination
    pub stations: Vec<StationId>,

    pub legs: Vec<LegResult>,

    /// Instructions, in English
    pub instructions: Vec<String>,

    /// Seconds from origin to destination
    pub total_time: u32,

    pub changes: usize,
}

impl RouteResponse {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        // Steps run destination first; reversed and without the origin they
        // line up with the legs
        let legs = itinerary
            .legs()
            .into_iter()
            .zip(itinerary.steps.iter().rev().skip(1))
            .map(|((from, to), step)| LegResult {
                from,
                to,
                tag: step.tag.to_string(),
            })
            .collect();

        Self {
            stations: itinerary.path.clone(),
            legs,
            instructions: itinerary
                .instructions
                .iter()
                .map(ToString::to_string)
                .collect(),
            total_time: itinerary.total_time,
            changes: itinerary.changes(),
        }
    }
}

/// Response for `/prim` and `/kruskal`.
#[derive(Debug, Serialize)]
pub struct SpanningTreeResponse {
    pub algorithm: &'static str,

    #[serde(flatten)]
    pub tree: SpanningTree,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
