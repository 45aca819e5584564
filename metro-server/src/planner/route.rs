//! Route queries.
//!
//! Ties the search and the itinerary together: validate the request, run
//! the shortest-path search, and only when a route exists, synthesize the
//! instructions.

use tracing::debug;

use crate::domain::StationId;
use crate::network::NetworkGraph;

use super::dijkstra::{RouteError, shortest_paths};
use super::itinerary::{Itinerary, synthesize};

/// Request for the fastest route between two stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin: StationId,
    pub destination: StationId,
}

impl RouteRequest {
    pub fn new(origin: StationId, destination: StationId) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Check both stations exist.
    pub fn validate(&self, graph: &NetworkGraph) -> Result<(), RouteError> {
        graph.station(self.origin)?;
        graph.station(self.destination)?;
        Ok(())
    }
}

/// Route planner over a shared, read-only network.
pub struct Planner<'a> {
    graph: &'a NetworkGraph,
}

impl<'a> Planner<'a> {
    pub fn new(graph: &'a NetworkGraph) -> Self {
        Self { graph }
    }

    /// Plan the fastest route for a request.
    pub fn plan(&self, request: &RouteRequest) -> Result<Itinerary, RouteError> {
        request.validate(self.graph)?;

        let tree = shortest_paths(self.graph, request.origin, request.destination)?;
        let itinerary = synthesize(self.graph, &tree, request.destination)?;

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            stations = itinerary.path.len(),
            changes = itinerary.changes(),
            time = itinerary.total_time,
            "route planned"
        );

        Ok(itinerary)
    }
}

/// Plan the fastest route between two stations.
pub fn plan_route(
    graph: &NetworkGraph,
    origin: StationId,
    destination: StationId,
) -> Result<Itinerary, RouteError> {
    Planner::new(graph).plan(&RouteRequest::new(origin, destination))
}
