//! Line and branch identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid line or branch identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {what} identifier: {reason}")]
pub struct InvalidIdentifier {
    what: &'static str,
    reason: &'static str,
}

fn validate(s: &str, what: &'static str) -> Result<String, InvalidIdentifier> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(InvalidIdentifier {
            what,
            reason: "must not be empty",
        });
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(InvalidIdentifier {
            what,
            reason: "must not contain whitespace",
        });
    }
    Ok(trimmed.to_string())
}

/// A transit line identifier, such as `"3"` or `"7b"`.
///
/// Lines are compared and ordered by their textual identifier, which gives
/// the planner a fixed tie-break when several lines are equally viable.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Line(String);

impl Line {
    /// Parse a line identifier. Surrounding whitespace is trimmed.
    ///
    /// ```
    /// use metro_server::domain::Line;
    ///
    /// assert_eq!(Line::parse(" 84 ").unwrap().as_str(), "84");
    /// assert!(Line::parse("").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidIdentifier> {
        validate(s, "line").map(Line)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Line {
    type Error = InvalidIdentifier;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Line::parse(&s)
    }
}

impl From<Line> for String {
    fn from(line: Line) -> Self {
        line.0
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({})", self.0)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A branch of a line.
///
/// Branch `"0"` is the trunk: the shared segment every fork can reach
/// without changing direction. Any other value names a fork beyond it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Branch(String);

impl Branch {
    const TRUNK: &'static str = "0";

    pub fn parse(s: &str) -> Result<Self, InvalidIdentifier> {
        validate(s, "branch").map(Branch)
    }

    /// The trunk branch.
    pub fn trunk() -> Self {
        Branch(Self::TRUNK.to_string())
    }

    pub fn is_trunk(&self) -> bool {
        self.0 == Self::TRUNK
    }

    /// Whether a rider can move between the two branches without a
    /// direction change: equal branches, or either one is the trunk.
    pub fn is_compatible(&self, other: &Branch) -> bool {
        self.is_trunk() || other.is_trunk() || self == other
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Branch {
    type Error = InvalidIdentifier;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Branch::parse(&s)
    }
}

impl From<Branch> for String {
    fn from(branch: Branch) -> Self {
        branch.0
    }
}

impl fmt::Debug for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Branch({})", self.0)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True when riding from `from` to `to` on one line means changing
/// direction: both branches are forks and they differ. The trunk never
/// forces a change.
pub fn requires_direction_change(from: &Branch, to: &Branch) -> bool {
    !from.is_trunk() && !to.is_trunk() && from != to
}
