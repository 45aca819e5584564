//! Turning a shortest-path tree into rider instructions.
//!
//! Three passes over the path:
//!
//! 1. Line selection, from the destination backwards. Consecutive stations
//!    are ridden on a line they share; the candidate set is narrowed by
//!    intersection for as long as it stays non-empty, so the rider stays on
//!    one line as long as possible. Stations with no shared line are a
//!    walking gap.
//! 2. Ride segmentation, from the origin forwards. A segment ends when the
//!    line changes, at a walking gap, or where the next hop goes straight
//!    from one fork of the line onto another.
//! 3. Instruction assembly: begin, one boarding per segment (with its
//!    "towards" signage), one walk per gap, arrive.

use std::collections::BTreeSet;
use std::fmt;

use crate::domain::{Line, Station, StationId, requires_direction_change};
use crate::network::NetworkGraph;

use super::dijkstra::{PathTree, RouteError};
use super::direction::towards_labels;

/// How the rider covers the hop between a station and its neighbor on the
/// path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineTag {
    /// Ride the line.
    Ride(Line),
    /// No shared line: walk. Carries the line of the adjacent ride.
    Walk(Line),
}

impl LineTag {
    pub fn line(&self) -> &Line {
        match self {
            LineTag::Ride(line) | LineTag::Walk(line) => line,
        }
    }

    pub fn is_walk(&self) -> bool {
        matches!(self, LineTag::Walk(_))
    }
}

impl fmt::Display for LineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineTag::Ride(line) => write!(f, "{line}"),
            LineTag::Walk(line) => write!(f, "{line}-walk"),
        }
    }
}

/// A path station and the tag of the hop that reaches it from the
/// previous station. The origin carries the tag of the first hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryStep {
    pub station: StationId,
    pub tag: LineTag,
}

/// A rider-facing instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Begin { station: String },
    Board { line: Line, towards: Vec<String> },
    Walk { to: String },
    Arrive { station: String, seconds: u32 },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Begin { station } => write!(f, "Begin at station {station}"),
            Instruction::Board { line, towards } if towards.is_empty() => {
                write!(f, "Board line {line}")
            }
            Instruction::Board { line, towards } => {
                write!(f, "Board line {line} towards {}", towards.join(" / "))
            }
            Instruction::Walk { to } => write!(f, "Walk to station {to}"),
            Instruction::Arrive { station, seconds } => {
                write!(f, "Arrive at {station} in {seconds} seconds")
            }
        }
    }
}

/// A synthesized route.
#[derive(Debug, Clone)]
pub struct Itinerary {
    /// Station ids from origin to destination.
    pub path: Vec<StationId>,
    /// Per-station tags, from the destination back to the origin.
    pub steps: Vec<ItineraryStep>,
    pub instructions: Vec<Instruction>,
    /// Seconds from origin to destination.
    pub total_time: u32,
}

impl Itinerary {
    /// Consecutive `(from, to)` station pairs along the path.
    pub fn legs(&self) -> Vec<(StationId, StationId)> {
        self.path.windows(2).map(|w| (w[0], w[1])).collect()
    }

    /// Number of boardings after the first.
    pub fn changes(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::Board { .. }))
            .count()
            .saturating_sub(1)
    }
}

/// A contiguous part of the path, by index into it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Ride { line: Line, from: usize, to: usize },
    Walk { from: usize, to: usize },
}

fn shared_lines<'a>(a: &'a Station, b: &Station) -> BTreeSet<&'a Line> {
    a.lines().keys().filter(|l| b.serves(l)).collect()
}

/// Pass 1: a tag for every hop `i -> i + 1`, chosen from the destination
/// backwards.
///
/// When several lines survive a whole run, the lowest line identifier is
/// chosen.
fn choose_lines(stations: &[&Station]) -> Vec<LineTag> {
    let hops = stations.len().saturating_sub(1);
    let mut tags: Vec<Option<LineTag>> = vec![None; hops];

    let mut run: Vec<usize> = Vec::new();
    let mut candidates: BTreeSet<&Line> = BTreeSet::new();
    let mut last_line: Option<Line> = None;

    for hop in (0..hops).rev() {
        let shared = shared_lines(stations[hop], stations[hop + 1]);

        if shared.is_empty() {
            close_run(&mut run, &candidates, &mut tags, &mut last_line);
            let line = last_line
                .clone()
                .unwrap_or_else(|| stations[hop + 1].first_line().clone());
            tags[hop] = Some(LineTag::Walk(line));
            continue;
        }

        let narrowed: BTreeSet<&Line> = if run.is_empty() {
            shared.clone()
        } else {
            candidates.intersection(&shared).copied().collect()
        };

        if narrowed.is_empty() {
            close_run(&mut run, &candidates, &mut tags, &mut last_line);
            candidates = shared;
        } else {
            candidates = narrowed;
        }
        run.push(hop);
    }
    close_run(&mut run, &candidates, &mut tags, &mut last_line);

    tags.into_iter().flatten().collect()
}

/// Assign the lowest surviving candidate to every hop of a finished run.
fn close_run(
    run: &mut Vec<usize>,
    candidates: &BTreeSet<&Line>,
    tags: &mut [Option<LineTag>],
    last_line: &mut Option<Line>,
) {
    if let (Some(&line), false) = (candidates.first(), run.is_empty()) {
        for &hop in run.iter() {
            tags[hop] = Some(LineTag::Ride(line.clone()));
        }
        *last_line = Some(line.clone());
    }
    run.clear();
}

/// Pass 2: group hops into ride and walk segments, origin first.
///
/// A ride continues while the line stays the same and the hop does not
/// move between two different forks of it. The trunk is a pass-through.
fn segments(stations: &[&Station], tags: &[LineTag]) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut ride: Option<(Line, usize)> = None;

    for (hop, tag) in tags.iter().enumerate() {
        let to = hop + 1;
        match tag {
            LineTag::Walk(_) => {
                if let Some((line, from)) = ride.take() {
                    out.push(Segment::Ride { line, from, to: hop });
                }
                out.push(Segment::Walk { from: hop, to });
            }
            LineTag::Ride(line) => {
                let continues = match &ride {
                    Some((current, _)) if current == line => {
                        match (stations[hop].branch_on(line), stations[to].branch_on(line)) {
                            (Some(here), Some(next)) => !requires_direction_change(here, next),
                            _ => false,
                        }
                    }
                    _ => false,
                };

                if !continues {
                    if let Some((current, from)) = ride.take() {
                        out.push(Segment::Ride {
                            line: current,
                            from,
                            to: hop,
                        });
                    }
                    ride = Some((line.clone(), hop));
                }
            }
        }
    }

    if let Some((line, from)) = ride {
        out.push(Segment::Ride {
            line,
            from,
            to: tags.len(),
        });
    }

    out
}

/// Build the itinerary to `destination` from a search tree.
pub fn synthesize(
    graph: &NetworkGraph,
    tree: &PathTree,
    destination: StationId,
) -> Result<Itinerary, RouteError> {
    let no_route = RouteError::NoRoute {
        origin: tree.origin(),
        destination,
    };
    let path = tree.path_to(destination).ok_or(no_route)?;
    let total_time = tree.time_to(destination).ok_or(no_route)?;

    let stations = path
        .iter()
        .map(|id| graph.station(*id))
        .collect::<Result<Vec<_>, _>>()?;

    let tags = choose_lines(&stations);

    let mut steps: Vec<ItineraryStep> = path
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .map(|(idx, id)| ItineraryStep {
            station: *id,
            tag: tags[idx - 1].clone(),
        })
        .collect();
    let origin_tag = tags
        .first()
        .cloned()
        .unwrap_or_else(|| LineTag::Ride(stations[0].first_line().clone()));
    steps.push(ItineraryStep {
        station: path[0],
        tag: origin_tag,
    });

    let mut instructions = vec![Instruction::Begin {
        station: stations[0].name.clone(),
    }];
    for segment in segments(&stations, &tags) {
        match segment {
            Segment::Ride { line, from, to } => {
                let towards = towards_labels(graph, path[from], path[to], &line)
                    .into_iter()
                    .collect();
                instructions.push(Instruction::Board { line, towards });
            }
            Segment::Walk { to, .. } => instructions.push(Instruction::Walk {
                to: stations[to].name.clone(),
            }),
        }
    }
    let last = stations.len() - 1;
    instructions.push(Instruction::Arrive {
        station: stations[last].name.clone(),
        seconds: total_time,
    });

    Ok(Itinerary {
        path,
        steps,
        instructions,
        total_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::fixtures::*;

    fn line(s: &str) -> Line {
        Line::parse(s).unwrap()
    }

    fn stations_of<'a>(graph: &'a NetworkGraph, ids: &[StationId]) -> Vec<&'a Station> {
        ids.iter().map(|id| graph.station(*id).unwrap()).collect()
    }

    #[test]
    fn line_tag_display() {
        assert_eq!(LineTag::Ride(line("3")).to_string(), "3");
        assert_eq!(LineTag::Walk(line("84")).to_string(), "84-walk");
    }

    #[test]
    fn instruction_display() {
        let board = Instruction::Board {
            line: line("84"),
            towards: vec!["aeroport".into(), "rostand".into()],
        };
        assert_eq!(board.to_string(), "Board line 84 towards aeroport / rostand");

        let bare = Instruction::Board {
            line: line("84"),
            towards: vec![],
        };
        assert_eq!(bare.to_string(), "Board line 84");

        let arrive = Instruction::Arrive {
            station: "zola".into(),
            seconds: 7,
        };
        assert_eq!(arrive.to_string(), "Arrive at zola in 7 seconds");
    }

    #[test]
    fn choose_lines_switches_at_shared_station() {
        let graph = sample_network();
        let stations = stations_of(&graph, &[MAIRIE, REPUBLIQUE, ZOLA, LYCEE, CANTINOLE]);

        let tags = choose_lines(&stations);
        assert_eq!(
            tags,
            vec![
                LineTag::Ride(line("3")),
                LineTag::Ride(line("3")),
                LineTag::Ride(line("3")),
                LineTag::Ride(line("84")),
            ]
        );
    }

    #[test]
    fn choose_lines_marks_walking_gap() {
        let graph = sample_network();
        // zola and proust share no line
        let stations = stations_of(&graph, &[REPUBLIQUE, ZOLA, PROUST, LYCEE]);

        let tags = choose_lines(&stations);
        assert_eq!(
            tags,
            vec![
                LineTag::Ride(line("3")),
                LineTag::Walk(line("84")),
                LineTag::Ride(line("84")),
            ]
        );
    }

    #[test]
    fn choose_lines_prefers_lowest_line_on_ties() {
        let a = station(StationId(1), "a", &[("7", "0"), ("4", "0")], true);
        let b = station(StationId(2), "b", &[("7", "0"), ("4", "0")], true);
        assert_eq!(choose_lines(&[&a, &b]), vec![LineTag::Ride(line("4"))]);
    }

    #[test]
    fn choose_lines_keeps_continuity() {
        // a{1,2} - b{1,2} - c{2}: the run narrows to 2 and stays on it
        let a = station(StationId(1), "a", &[("1", "0"), ("2", "0")], true);
        let b = station(StationId(2), "b", &[("1", "0"), ("2", "0")], false);
        let c = station(StationId(3), "c", &[("2", "0")], true);
        assert_eq!(
            choose_lines(&[&a, &b, &c]),
            vec![LineTag::Ride(line("2")), LineTag::Ride(line("2"))]
        );
    }

    #[test]
    fn segments_join_forks_through_trunk() {
        let graph = sample_network();
        // eglise (fork 2) -> republique (trunk) -> zola (fork 1)
        let stations = stations_of(&graph, &[EGLISE, REPUBLIQUE, ZOLA]);
        let tags = choose_lines(&stations);

        assert_eq!(
            segments(&stations, &tags),
            vec![Segment::Ride {
                line: line("3"),
                from: 0,
                to: 2
            }]
        );
    }

    #[test]
    fn segments_split_between_adjacent_forks() {
        let a = station(StationId(1), "a", &[("5", "1")], true);
        let b = station(StationId(2), "b", &[("5", "1")], false);
        let c = station(StationId(3), "c", &[("5", "2")], false);
        let d = station(StationId(4), "d", &[("5", "2")], true);
        let stations = [&a, &b, &c, &d];
        let tags = choose_lines(&stations);

        assert_eq!(
            segments(&stations, &tags),
            vec![
                Segment::Ride {
                    line: line("5"),
                    from: 0,
                    to: 1
                },
                Segment::Ride {
                    line: line("5"),
                    from: 1,
                    to: 3
                },
            ]
        );
    }

    #[test]
    fn segments_pass_through_trunk() {
        let graph = sample_network();
        // fork 1 -> trunk -> trunk: one ride
        let stations = stations_of(&graph, &[ZOLA, REPUBLIQUE, MAIRIE, QUINCONCES]);
        let tags = choose_lines(&stations);

        assert_eq!(
            segments(&stations, &tags),
            vec![Segment::Ride {
                line: line("3"),
                from: 0,
                to: 3
            }]
        );
    }

    #[test]
    fn segments_around_walk() {
        let graph = sample_network();
        let stations = stations_of(&graph, &[REPUBLIQUE, ZOLA, PROUST, LYCEE]);
        let tags = choose_lines(&stations);

        assert_eq!(
            segments(&stations, &tags),
            vec![
                Segment::Ride {
                    line: line("3"),
                    from: 0,
                    to: 1
                },
                Segment::Walk { from: 1, to: 2 },
                Segment::Ride {
                    line: line("84"),
                    from: 2,
                    to: 3
                },
            ]
        );
    }
}
