//! "Towards" signage for a ride on one line.
//!
//! A train is signed by the terminus it runs to. Given where the rider
//! boards and where they are heading, the valid signs are the termini of
//! the line that lie beyond the destination, on branches the train can
//! reach from the boarding point.

use std::collections::{BTreeSet, HashSet};

use crate::domain::{Branch, Line, StationId};
use crate::network::NetworkGraph;

/// Traversal state: where we are, our branch on the line, and whether the
/// destination lies behind us.
struct Frame<'a> {
    station: StationId,
    branch: &'a Branch,
    passed_destination: bool,
}

/// Names of the termini a rider boarding at `entry` on `line` can read on
/// the front of a train heading for `destination`.
///
/// Depth-first search along `line` from `entry`. A neighbor is followed when
/// it serves `line` on a branch compatible with the branch of the station
/// the traversal is at (equal, or trunk on either side). A terminus counts only once the
/// destination has been passed or reached, so termini behind the rider are
/// excluded. More than one name means the line forks ahead.
///
/// Returns an empty set if `entry` does not serve `line` or the destination
/// cannot be reached along it.
pub fn towards_labels(
    graph: &NetworkGraph,
    entry: StationId,
    destination: StationId,
    line: &Line,
) -> BTreeSet<String> {
    let mut labels = BTreeSet::new();

    let Some(start_branch) = graph.get(entry).and_then(|s| s.branch_on(line)) else {
        return labels;
    };

    let mut visited = HashSet::new();
    let mut stack = vec![Frame {
        station: entry,
        branch: start_branch,
        passed_destination: entry == destination,
    }];

    while let Some(frame) = stack.pop() {
        if !visited.insert(frame.station) {
            continue;
        }
        let Some(station) = graph.get(frame.station) else {
            continue;
        };

        if station.is_terminus && frame.passed_destination {
            labels.insert(station.name.clone());
        }

        // Reversed so the first-listed neighbor is explored first
        for n in station.neighbors().iter().rev() {
            let Some(branch) = graph.get(n.station).and_then(|s| s.branch_on(line)) else {
                continue;
            };
            if !frame.branch.is_compatible(branch) || visited.contains(&n.station) {
                continue;
            }
            stack.push(Frame {
                station: n.station,
                branch,
                passed_destination: frame.passed_destination || n.station == destination,
            });
        }
    }

    labels
}
