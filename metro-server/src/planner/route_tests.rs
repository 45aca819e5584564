//! Scenario tests for route planning on small hand-built networks.

use super::*;
use crate::domain::{Line, StationId};
use crate::network::fixtures::*;
use crate::network::{NetworkBuilder, NetworkGraph, UnknownStation, repair_connectivity};

fn line(s: &str) -> Line {
    Line::parse(s).unwrap()
}

fn rendered(itinerary: &Itinerary) -> Vec<String> {
    itinerary
        .instructions
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn boardings<'a>(itinerary: &'a Itinerary, on: &Line) -> Vec<&'a Instruction> {
    itinerary
        .instructions
        .iter()
        .filter(|i| matches!(i, Instruction::Board { line, .. } if line == on))
        .collect()
}

/// Two lines joined by a walking transfer between distinct stations:
///
/// ```text
/// line 1: a(T) - b(T)  ~~walk~~  c(T) - d(T) :line 2
/// ```
fn transfer_network() -> NetworkGraph {
    let mut builder = NetworkBuilder::new();
    for s in [
        station(StationId(1), "a", &[("1", "0")], true),
        station(StationId(2), "b", &[("1", "0")], true),
        station(StationId(3), "c", &[("2", "0")], true),
        station(StationId(4), "d", &[("2", "0")], true),
    ] {
        builder.add_station(s).unwrap();
    }
    builder.add_edge(StationId(1), StationId(2), 60).unwrap();
    builder.add_edge(StationId(2), StationId(3), 120).unwrap();
    builder.add_edge(StationId(3), StationId(4), 90).unwrap();
    builder.build()
}

#[test]
fn mairie_to_cantinole() {
    let graph = sample_network();
    let itinerary = plan_route(&graph, MAIRIE, CANTINOLE).unwrap();

    assert_eq!(itinerary.total_time, 7);
    assert_eq!(
        itinerary.path,
        vec![MAIRIE, REPUBLIQUE, ZOLA, LYCEE, CANTINOLE]
    );
    assert_eq!(
        rendered(&itinerary),
        vec![
            "Begin at station mairie",
            "Board line 3 towards villepreux",
            "Board line 84 towards aeroport / rostand",
            "Arrive at cantinole in 7 seconds",
        ]
    );

    assert_eq!(boardings(&itinerary, &line("3")).len(), 1);
    assert_eq!(boardings(&itinerary, &line("84")).len(), 1);
    assert_eq!(itinerary.changes(), 1);
}

#[test]
fn steps_run_from_destination_to_origin() {
    let graph = sample_network();
    let itinerary = plan_route(&graph, MAIRIE, CANTINOLE).unwrap();

    let steps: Vec<(StationId, String)> = itinerary
        .steps
        .iter()
        .map(|s| (s.station, s.tag.to_string()))
        .collect();
    assert_eq!(
        steps,
        vec![
            (CANTINOLE, "84".to_string()),
            (LYCEE, "3".to_string()),
            (ZOLA, "3".to_string()),
            (REPUBLIQUE, "3".to_string()),
            (MAIRIE, "3".to_string()),
        ]
    );
}

#[test]
fn legs_pair_consecutive_stations() {
    let graph = sample_network();
    let itinerary = plan_route(&graph, QUINCONCES, REPUBLIQUE).unwrap();
    assert_eq!(
        itinerary.legs(),
        vec![(QUINCONCES, MAIRIE), (MAIRIE, REPUBLIQUE)]
    );
}

#[test]
fn trunk_joins_forks_without_change() {
    let graph = sample_network();
    let itinerary = plan_route(&graph, EGLISE, ZOLA).unwrap();

    assert_eq!(itinerary.path, vec![EGLISE, REPUBLIQUE, ZOLA]);
    assert_eq!(
        rendered(&itinerary),
        vec![
            "Begin at station eglise",
            "Board line 3 towards villepreux",
            "Arrive at zola in 3 seconds",
        ]
    );
    assert_eq!(boardings(&itinerary, &line("3")).len(), 1);
    assert_eq!(itinerary.changes(), 0);
}

#[test]
fn change_of_direction_between_adjacent_forks() {
    // line 5: a(T) - b | c - d(T), forks 1 and 2 meeting without a trunk
    let mut builder = NetworkBuilder::new();
    for s in [
        station(StationId(1), "a", &[("5", "1")], true),
        station(StationId(2), "b", &[("5", "1")], false),
        station(StationId(3), "c", &[("5", "2")], false),
        station(StationId(4), "d", &[("5", "2")], true),
    ] {
        builder.add_station(s).unwrap();
    }
    builder.add_edge(StationId(1), StationId(2), 1).unwrap();
    builder.add_edge(StationId(2), StationId(3), 1).unwrap();
    builder.add_edge(StationId(3), StationId(4), 1).unwrap();
    let graph = builder.build();

    let itinerary = plan_route(&graph, StationId(1), StationId(4)).unwrap();

    assert_eq!(boardings(&itinerary, &line("5")).len(), 2);
    assert_eq!(itinerary.changes(), 1);
    assert_eq!(
        itinerary.instructions.last().map(ToString::to_string),
        Some("Arrive at d in 3 seconds".to_string())
    );
}

#[test]
fn trunk_is_a_pass_through() {
    let graph = sample_network();
    let itinerary = plan_route(&graph, VILLEPREUX, QUINCONCES).unwrap();

    assert_eq!(
        rendered(&itinerary),
        vec![
            "Begin at station villepreux",
            "Board line 3 towards quinconces",
            "Arrive at quinconces in 10 seconds",
        ]
    );
    assert_eq!(itinerary.changes(), 0);
}

#[test]
fn walking_transfer() {
    let graph = transfer_network();
    let itinerary = plan_route(&graph, StationId(1), StationId(4)).unwrap();

    assert_eq!(
        rendered(&itinerary),
        vec![
            "Begin at station a",
            "Board line 1 towards b",
            "Walk to station c",
            "Board line 2 towards d",
            "Arrive at d in 270 seconds",
        ]
    );

    let tags: Vec<String> = itinerary.steps.iter().map(|s| s.tag.to_string()).collect();
    assert_eq!(tags, vec!["2", "2-walk", "1", "1"]);
}

#[test]
fn bridged_orphan_is_reached_on_foot() {
    let mut builder = NetworkBuilder::new();
    for s in [
        station(StationId(1), "a", &[("1", "0")], true),
        station(StationId(2), "b", &[("1", "0")], true),
        station(StationId(3), "island", &[("9", "0")], true),
    ] {
        builder.add_station(s).unwrap();
    }
    builder.add_edge(StationId(1), StationId(2), 40).unwrap();
    let mut graph = builder.build();

    assert_eq!(
        plan_route(&graph, StationId(2), StationId(3)).unwrap_err(),
        RouteError::NoRoute {
            origin: StationId(2),
            destination: StationId(3)
        }
    );

    repair_connectivity(&mut graph, 10_000);
    let itinerary = plan_route(&graph, StationId(2), StationId(3)).unwrap();

    assert_eq!(itinerary.total_time, 10_040);
    assert_eq!(
        rendered(&itinerary),
        vec![
            "Begin at station b",
            "Board line 1 towards a",
            "Walk to station island",
            "Arrive at island in 10040 seconds",
        ]
    );
}

#[test]
fn same_origin_and_destination() {
    let graph = sample_network();
    let itinerary = plan_route(&graph, ZOLA, ZOLA).unwrap();

    assert_eq!(itinerary.path, vec![ZOLA]);
    assert_eq!(itinerary.total_time, 0);
    assert!(itinerary.legs().is_empty());
    assert_eq!(
        rendered(&itinerary),
        vec!["Begin at station zola", "Arrive at zola in 0 seconds"]
    );
    assert_eq!(itinerary.steps.len(), 1);
}

#[test]
fn unknown_station_is_reported() {
    let graph = sample_network();

    assert_eq!(
        plan_route(&graph, StationId(404), ZOLA).unwrap_err(),
        RouteError::UnknownStation(UnknownStation(StationId(404)))
    );
    assert_eq!(
        plan_route(&graph, ZOLA, StationId(404)).unwrap_err(),
        RouteError::UnknownStation(UnknownStation(StationId(404)))
    );
}

#[test]
fn synthesize_rejects_undiscovered_destination() {
    let graph = sample_network();
    // The search stops at zola, long before aeroport is discovered
    let tree = shortest_paths(&graph, MAIRIE, ZOLA).unwrap();
    assert!(tree.get(AEROPORT).is_none());

    assert_eq!(
        synthesize(&graph, &tree, AEROPORT).unwrap_err(),
        RouteError::NoRoute {
            origin: MAIRIE,
            destination: AEROPORT
        }
    );
}

#[test]
fn planner_validates_request() {
    let graph = sample_network();
    let planner = Planner::new(&graph);

    assert!(RouteRequest::new(MAIRIE, ZOLA).validate(&graph).is_ok());
    assert!(planner.plan(&RouteRequest::new(MAIRIE, StationId(0))).is_err());
    assert_eq!(
        planner
            .plan(&RouteRequest::new(ISSAC, AEROPORT))
            .unwrap()
            .total_time,
        // issac - eglise - republique - zola - lycee - cantinole - cinq chemins - aeroport
        1 + 2 + 1 + 2 + 1 + 3 + 2
    );
}

mod proptests {
    use super::*;
    use crate::network::fixtures::station;
    use proptest::prelude::*;

    const LINES: [&str; 3] = ["1", "2", "3"];
    const BRANCHES: [&str; 3] = ["0", "1", "2"];

    /// Random stations on one or two lines, random edges, then repaired.
    fn random_network(
        specs: &[(usize, usize, Option<(usize, usize)>, bool)],
        edges: &[(usize, usize, u32)],
    ) -> NetworkGraph {
        let n = specs.len();
        let mut builder = NetworkBuilder::new();
        for (idx, &(l, b, extra, terminus)) in specs.iter().enumerate() {
            let mut lines = vec![(LINES[l], BRANCHES[b])];
            if let Some((l2, b2)) = extra {
                if l2 != l {
                    lines.push((LINES[l2], BRANCHES[b2]));
                }
            }
            builder
                .add_station(station(
                    StationId(idx as u32),
                    &format!("s{idx}"),
                    &lines,
                    terminus,
                ))
                .unwrap();
        }
        for &(a, b, t) in edges {
            let (a, b) = (a % n, b % n);
            if a != b {
                builder
                    .add_edge(StationId(a as u32), StationId(b as u32), t)
                    .unwrap();
            }
        }
        let mut graph = builder.build();
        repair_connectivity(&mut graph, 10_000);
        graph
    }

    fn station_spec() -> impl Strategy<Value = (usize, usize, Option<(usize, usize)>, bool)> {
        (
            0usize..3,
            0usize..3,
            prop::option::of((0usize..3, 0usize..3)),
            any::<bool>(),
        )
    }

    proptest! {
        /// Instructions begin and arrive correctly, and every path station
        /// gets exactly one step
        #[test]
        fn itinerary_shape(
            specs in prop::collection::vec(station_spec(), 2..15),
            edges in prop::collection::vec((0usize..15, 0usize..15, 1u32..100), 1..40),
            from in 0usize..15,
            to in 0usize..15,
        ) {
            let graph = random_network(&specs, &edges);
            let n = specs.len();
            let (origin, destination) = (StationId((from % n) as u32), StationId((to % n) as u32));

            let tree = shortest_paths(&graph, origin, destination).unwrap();
            let itinerary = synthesize(&graph, &tree, destination).unwrap();

            let begins = matches!(itinerary.instructions.first(), Some(Instruction::Begin { .. }));
            prop_assert!(begins);
            let expected_time = tree.time_to(destination).unwrap();
            let arrived_in = match itinerary.instructions.last() {
                Some(Instruction::Arrive { seconds, .. }) => Some(*seconds),
                _ => None,
            };
            prop_assert_eq!(arrived_in, Some(expected_time));
            prop_assert_eq!(itinerary.total_time, expected_time);

            prop_assert_eq!(itinerary.steps.len(), itinerary.path.len());
            prop_assert_eq!(itinerary.steps.first().map(|s| s.station), Some(destination));
            prop_assert_eq!(itinerary.steps.last().map(|s| s.station), Some(origin));

            // A walk instruction for every walking hop, and only for those
            let walks = itinerary
                .instructions
                .iter()
                .filter(|i| matches!(i, Instruction::Walk { .. }))
                .count();
            let walking_hops = itinerary.steps[..itinerary.steps.len() - 1]
                .iter()
                .filter(|s| s.tag.is_walk())
                .count();
            prop_assert_eq!(walks, walking_hops);
        }
    }
}
