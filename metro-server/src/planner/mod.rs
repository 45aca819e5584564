//! Route planning over the metro network.
//!
//! This module answers: "what is the fastest way from this station to that
//! one, and what does the rider have to do?"
//!
//! A query runs a Dijkstra search from the origin ([`shortest_paths`]),
//! then turns the resulting tree into line choices and instructions
//! ([`synthesize`]), using [`towards_labels`] to name the direction of each
//! ride.

mod dijkstra;
mod direction;
mod itinerary;
mod route;

#[cfg(test)]
mod route_tests;

pub use dijkstra::{PathEntry, PathTree, RouteError, shortest_paths};
pub use direction::towards_labels;
pub use itinerary::{Instruction, Itinerary, ItineraryStep, LineTag, synthesize};
pub use route::{Planner, RouteRequest, plan_route};
