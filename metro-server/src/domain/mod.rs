//! Domain types for the metro network.
//!
//! This module contains the validated value types the rest of the crate is
//! built on. All types enforce their invariants at construction time, so
//! code that receives them can trust their validity.

mod error;
mod line;
mod station;

pub use error::DomainError;
pub use line::{Branch, InvalidIdentifier, Line, requires_direction_change};
pub use station::{Neighbor, Position, Station, StationId};
