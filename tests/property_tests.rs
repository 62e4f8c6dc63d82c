use proptest::prelude::*;
use route_planner::routing::partition::partition;
use route_planner::routing::tour::build_tour;
use route_planner::{distance, Coordinate, OptimizerConfig, RouteOptimizer, ShortestPathGraph};

mod common;

use common::assert_permutation_cycle;

prop_compose! {
    fn coordinate()(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) -> Coordinate {
        Coordinate::new(lat, lng)
    }
}

prop_compose! {
    /// Points around Casablanca, the scale the heuristic is used at.
    fn city_point()(lat in 33.45f64..33.65, lng in -7.75f64..-7.45) -> Coordinate {
        Coordinate::new(lat, lng)
    }
}

fn edges() -> impl Strategy<Value = Vec<(u8, u8, f64)>> {
    prop::collection::vec((0u8..12, 0u8..12, 0.0f64..100.0), 0..40)
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
        let ab = distance(a, b);
        let ba = distance(b, a);
        prop_assert!((ab - ba).abs() < 1e-9, "{} vs {}", ab, ba);
        prop_assert!(ab >= 0.0);
    }

    #[test]
    fn distance_to_self_is_zero(a in coordinate()) {
        prop_assert_eq!(distance(a, a), 0.0);
    }

    #[test]
    fn partitions_reassemble_input(
        points in prop::collection::vec(city_point(), 0..120),
        capacity in 1usize..30,
    ) {
        let parts = partition(&points, capacity).unwrap();

        prop_assert_eq!(parts.concat(), points.clone());
        if let Some((last, full)) = parts.split_last() {
            prop_assert!(full.iter().all(|p| p.len() == capacity));
            prop_assert!(!last.is_empty() && last.len() <= capacity);
        }
        prop_assert_eq!(parts.len(), points.len().div_ceil(capacity));
    }

    #[test]
    fn tours_are_permutation_cycles(
        points in prop::collection::vec(city_point(), 0..25),
        depot in city_point(),
    ) {
        let tour = build_tour(&points, depot);
        assert_permutation_cycle(tour.indices(), points.len());
    }

    #[test]
    fn planning_is_deterministic(
        points in prop::collection::vec(city_point(), 0..60),
        capacity in 1usize..25,
    ) {
        let optimizer = RouteOptimizer::new(OptimizerConfig { capacity, ..OptimizerConfig::default() });
        prop_assert_eq!(optimizer.plan(&points).unwrap(), optimizer.plan(&points).unwrap());
    }

    #[test]
    fn shortest_path_to_self_is_free(edges in edges(), node in 0u8..12) {
        let graph = ShortestPathGraph::from_edges(edges);
        let result = graph.shortest_path(&node, &node);
        prop_assert_eq!(result.cost, 0.0);
        prop_assert_eq!(result.path, vec![node]);
    }

    #[test]
    fn shortest_path_is_a_walk_with_matching_cost(edges in edges(), from in 0u8..12, to in 0u8..12) {
        let graph = ShortestPathGraph::from_edges(edges);
        let result = graph.shortest_path(&from, &to);

        if result.is_reachable() {
            prop_assert_eq!(result.path.first(), Some(&from));
            prop_assert_eq!(result.path.last(), Some(&to));

            // every hop is an edge; the cheapest parallel edge is what counts
            let mut walked = 0.0;
            for hop in result.path.windows(2) {
                let cheapest = graph
                    .neighbors(&hop[0])
                    .iter()
                    .filter(|(n, _)| *n == hop[1])
                    .map(|(_, w)| *w)
                    .fold(f64::INFINITY, f64::min);
                prop_assert!(cheapest.is_finite());
                walked += cheapest;
            }
            prop_assert!((walked - result.cost).abs() < 1e-6);

            // symmetric graph, symmetric cost
            let back = graph.shortest_path(&to, &from);
            prop_assert!((back.cost - result.cost).abs() < 1e-6);
        } else {
            prop_assert!(result.cost.is_infinite());
            prop_assert!(result.path.is_empty());
            prop_assert!(graph.shortest_path(&to, &from).cost.is_infinite());
        }
    }
}

#[test]
fn disconnected_components_are_unreachable() {
    let graph = ShortestPathGraph::from_edges([(1u32, 2, 4.0), (3, 4, 1.0)]);
    let result = graph.shortest_path(&1, &4);
    assert!(result.cost.is_infinite());
    assert!(result.path.is_empty());
}
