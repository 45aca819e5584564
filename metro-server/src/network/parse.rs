//! Text-format parsers for the network and station positions.
//!
//! Network records, one per line:
//!
//! ```text
//! V <id> <name> ;<line> ;<terminus-flag> <branch>
//! E <start-id> <end-id> <time-seconds>
//! ```
//!
//! Blank lines and `#` comments are skipped. A malformed line never aborts
//! parsing: it is logged, recorded as a [`ParseError`], and skipped.

use tracing::{debug, warn};

use crate::domain::{Branch, DomainError, InvalidIdentifier, Line, Position, Station, StationId};

use super::{NetworkBuilder, NetworkGraph};

/// Why a line was skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unknown record type {0:?}")]
    UnknownRecord(String),

    #[error("malformed station record: {0}")]
    MalformedStation(&'static str),

    #[error("malformed edge record: {0}")]
    MalformedEdge(&'static str),

    #[error("malformed position record: {0}")]
    MalformedPosition(&'static str),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("invalid terminus flag {0:?}")]
    InvalidFlag(String),

    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),

    #[error(transparent)]
    Rejected(#[from] DomainError),
}

/// A skipped input line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// Result of parsing a network file: the graph built from every valid
/// record, plus the lines that were skipped.
#[derive(Debug)]
pub struct ParsedNetwork {
    pub graph: NetworkGraph,
    pub errors: Vec<ParseError>,
}

struct EdgeLine {
    line: usize,
    start: StationId,
    end: StationId,
    time: u32,
}

/// Parse the network text format.
///
/// Edges are applied after every station has been read, so their order in
/// the file does not matter.
pub fn parse_network(input: &str) -> ParsedNetwork {
    let mut builder = NetworkBuilder::new();
    let mut edges = Vec::new();
    let mut errors = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let result = match trimmed.split_whitespace().next() {
            Some("V") => parse_station(trimmed)
                .and_then(|station| builder.add_station(station).map(|_| ()).map_err(Into::into)),
            Some("E") => parse_edge(trimmed).map(|(start, end, time)| {
                edges.push(EdgeLine {
                    line,
                    start,
                    end,
                    time,
                })
            }),
            Some(other) => Err(ParseErrorKind::UnknownRecord(other.to_string())),
            None => Ok(()),
        };

        if let Err(kind) = result {
            warn!(line, error = %kind, "skipping network line");
            errors.push(ParseError { line, kind });
        }
    }

    for edge in edges {
        if let Err(e) = builder.add_edge(edge.start, edge.end, edge.time) {
            let kind = ParseErrorKind::from(e);
            warn!(line = edge.line, error = %kind, "skipping network line");
            errors.push(ParseError {
                line: edge.line,
                kind,
            });
        }
    }

    let graph = builder.build();
    debug!(
        stations = graph.len(),
        edges = graph.edge_count(),
        skipped = errors.len(),
        "parsed network"
    );

    ParsedNetwork { graph, errors }
}

fn parse_station(record: &str) -> Result<Station, ParseErrorKind> {
    let mut parts = record.split(" ;");
    let head = parts.next().unwrap_or_default();
    let line = parts
        .next()
        .ok_or(ParseErrorKind::MalformedStation("missing line field"))?;
    let tail = parts
        .next()
        .ok_or(ParseErrorKind::MalformedStation("missing terminus field"))?;
    if parts.next().is_some() {
        return Err(ParseErrorKind::MalformedStation("too many fields"));
    }

    // head is "V <id> <name>", where the name may contain spaces
    let rest = head
        .strip_prefix('V')
        .ok_or(ParseErrorKind::MalformedStation("missing V tag"))?
        .trim_start();
    let (id, name) = rest
        .split_once(char::is_whitespace)
        .ok_or(ParseErrorKind::MalformedStation("missing station name"))?;
    let id = parse_number(id)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ParseErrorKind::MalformedStation("missing station name"));
    }

    let mut tail = tail.split_whitespace();
    let flag = tail
        .next()
        .ok_or(ParseErrorKind::MalformedStation("missing terminus flag"))?;
    let branch = tail
        .next()
        .ok_or(ParseErrorKind::MalformedStation("missing branch"))?;
    if tail.next().is_some() {
        return Err(ParseErrorKind::MalformedStation("trailing data after branch"));
    }

    let station = Station::new(
        StationId(id),
        name,
        Line::parse(line)?,
        Branch::parse(branch)?,
    )
    .terminus(parse_flag(flag)?);

    Ok(station)
}

fn parse_edge(record: &str) -> Result<(StationId, StationId, u32), ParseErrorKind> {
    let fields: Vec<&str> = record.split_whitespace().collect();
    let [_, start, end, time] = fields.as_slice() else {
        return Err(ParseErrorKind::MalformedEdge("expected E <start> <end> <time>"));
    };
    Ok((
        StationId(parse_number(start)?),
        StationId(parse_number(end)?),
        parse_number(time)?,
    ))
}

fn parse_number(s: &str) -> Result<u32, ParseErrorKind> {
    s.trim()
        .parse()
        .map_err(|_| ParseErrorKind::InvalidNumber(s.to_string()))
}

fn parse_flag(s: &str) -> Result<bool, ParseErrorKind> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ParseErrorKind::InvalidFlag(s.to_string())),
    }
}

/// Normalise a station name for matching positions to stations.
///
/// The positions file writes spaces as `@`.
pub(crate) fn clean_station_name(name: &str) -> String {
    name.replace('@', " ").trim().to_lowercase()
}

/// Parse the positions format: `<x>;<y>;<name>` per line.
///
/// Returns `(cleaned name, position)` pairs and the skipped lines.
pub fn parse_positions(input: &str) -> (Vec<(String, Position)>, Vec<ParseError>) {
    let mut positions = Vec::new();
    let mut errors = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_position(trimmed) {
            Ok(entry) => positions.push(entry),
            Err(kind) => {
                warn!(line, error = %kind, "skipping position line");
                errors.push(ParseError { line, kind });
            }
        }
    }

    (positions, errors)
}

fn parse_position(record: &str) -> Result<(String, Position), ParseErrorKind> {
    let mut parts = record.splitn(3, ';');
    let (Some(x), Some(y), Some(name)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseErrorKind::MalformedPosition("expected <x>;<y>;<name>"));
    };
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|_| ParseErrorKind::InvalidNumber(x.to_string()))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|_| ParseErrorKind::InvalidNumber(y.to_string()))?;
    let name = clean_station_name(name);
    if name.is_empty() {
        return Err(ParseErrorKind::MalformedPosition("missing station name"));
    }
    Ok((name, Position { x, y }))
}
