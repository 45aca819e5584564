//! Station types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::line::{Branch, Line};

/// A unique station identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u32);

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One adjacency entry: a neighboring station and the travel time to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub station: StationId,
    /// Travel time in seconds, always positive.
    pub time: u32,
}

/// A map position used by the client to draw the network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A station of the network.
///
/// Every station belongs to at least one line, and to exactly one branch
/// of each of its lines.
#[derive(Debug, Clone)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    lines: BTreeMap<Line, Branch>,
    pub is_terminus: bool,
    pub position: Option<Position>,
    pub(crate) neighbors: Vec<Neighbor>,
}

impl Station {
    /// Create a station on a single line.
    pub fn new(id: StationId, name: impl Into<String>, line: Line, branch: Branch) -> Self {
        let mut lines = BTreeMap::new();
        lines.insert(line, branch);
        Self {
            id,
            name: name.into(),
            lines,
            is_terminus: false,
            position: None,
            neighbors: Vec::new(),
        }
    }

    /// Create a station from a full line map.
    pub fn with_lines(
        id: StationId,
        name: impl Into<String>,
        lines: BTreeMap<Line, Branch>,
    ) -> Result<Self, DomainError> {
        if lines.is_empty() {
            return Err(DomainError::NoLines(id));
        }
        Ok(Self {
            id,
            name: name.into(),
            lines,
            is_terminus: false,
            position: None,
            neighbors: Vec::new(),
        })
    }

    /// Mark this station as a terminus.
    pub fn terminus(mut self, is_terminus: bool) -> Self {
        self.is_terminus = is_terminus;
        self
    }

    /// Add membership of another line.
    ///
    /// A station sits on one branch per line, so a conflicting branch for a
    /// line it already serves is rejected.
    pub fn add_line(&mut self, line: Line, branch: Branch) -> Result<(), DomainError> {
        match self.lines.get(&line) {
            Some(existing) if existing != &branch => Err(DomainError::ConflictingBranch {
                station: self.id,
                line,
            }),
            Some(_) => Ok(()),
            None => {
                self.lines.insert(line, branch);
                Ok(())
            }
        }
    }

    /// Lines served, with the branch on each, in line order.
    pub fn lines(&self) -> &BTreeMap<Line, Branch> {
        &self.lines
    }

    /// Branch of this station on `line`, if it serves it.
    pub fn branch_on(&self, line: &Line) -> Option<&Branch> {
        self.lines.get(line)
    }

    pub fn serves(&self, line: &Line) -> bool {
        self.lines.contains_key(line)
    }

    /// The lowest line identifier served. Stations always have one.
    pub fn first_line(&self) -> &Line {
        self.lines
            .keys()
            .next()
            .expect("station always serves at least one line")
    }

    /// Neighbors in insertion order.
    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }
}
