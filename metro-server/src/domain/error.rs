//! Domain error types.
//!
//! These errors represent validation failures when assembling the network
//! model. They are distinct from parse and query errors.

use super::{Line, StationId};

/// Domain-level errors for network validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A station was declared without any line
    #[error("station {0} does not serve any line")]
    NoLines(StationId),

    /// The same id was declared twice under different names
    #[error("station {id} declared as both {existing:?} and {new:?}")]
    NameMismatch {
        id: StationId,
        existing: String,
        new: String,
    },

    /// A station was placed on two branches of one line
    #[error("station {station} already sits on another branch of line {line}")]
    ConflictingBranch { station: StationId, line: Line },

    /// An edge references a station that was never declared
    #[error("edge references unknown station {0}")]
    UnknownEndpoint(StationId),

    /// An edge connects a station to itself
    #[error("edge from station {0} to itself")]
    SelfLoop(StationId),

    /// Travel times must be strictly positive
    #[error("edge {0} - {1} has a non-positive travel time")]
    NonPositiveWeight(StationId, StationId),
}
