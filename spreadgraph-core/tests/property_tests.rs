//! Property tests for the spread traversal invariants.

use proptest::collection::vec;
use proptest::prelude::*;
use spreadgraph_core::{Entity, SocialGraph, SpreadEngine};
use std::collections::HashSet;

/// Graph size, connections as index pairs, and a start index.
fn network() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, usize)> {
    (1usize..25).prop_flat_map(|n| (Just(n), vec((0..n, 0..n), 0..60), 0..n))
}

fn build(n: usize, edges: &[(usize, usize)]) -> SocialGraph {
    let name = |i: usize| format!("p{}", i);
    SocialGraph::from_parts(
        (0..n).map(name),
        edges.iter().map(|&(a, b)| (name(a), name(b))),
    )
}

/// Hop distances by repeated relaxation, independent of the engine's BFS.
fn reference_distances(n: usize, edges: &[(usize, usize)], start: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; n];
    dist[start] = Some(0);
    for _ in 0..n {
        for &(a, b) in edges {
            for (from, to) in [(a, b), (b, a)] {
                if let Some(d) = dist[from] {
                    if dist[to].map_or(true, |cur| d + 1 < cur) {
                        dist[to] = Some(d + 1);
                    }
                }
            }
        }
    }
    dist
}

proptest! {
    /// Every reachable person appears exactly once, at their shortest hop distance.
    #[test]
    fn levels_match_shortest_paths((n, edges, start) in network()) {
        let graph = build(n, &edges);
        let start_name = format!("p{}", start);
        let result = SpreadEngine::new(&graph).run(Some(&start_name));
        let expected = reference_distances(n, &edges, start);

        let seen: HashSet<&str> = result.order().iter().map(|d| d.entity.as_str()).collect();
        prop_assert_eq!(seen.len(), result.order().len());

        for (i, dist) in expected.iter().enumerate() {
            prop_assert_eq!(result.level_of(&format!("p{}", i)), *dist);
        }
        let max = expected.iter().flatten().copied().max().unwrap_or(0);
        prop_assert_eq!(result.depth(), max);
    }

    /// Discovery order never goes back to a lower level.
    #[test]
    fn order_levels_non_decreasing((n, edges, start) in network()) {
        let graph = build(n, &edges);
        let result = SpreadEngine::new(&graph).run(Some(&format!("p{}", start)));
        for pair in result.order().windows(2) {
            prop_assert!(pair[0].level <= pair[1].level);
        }
    }

    /// The spread graph is a tree rooted at the start over exactly the discovered people.
    #[test]
    fn spread_graph_is_bfs_tree((n, edges, start) in network()) {
        let graph = build(n, &edges);
        let start_name = format!("p{}", start);
        let result = SpreadEngine::new(&graph).run(Some(&start_name));
        let tree = result.spread_graph();

        prop_assert_eq!(tree.in_degree(&start_name), 0);
        prop_assert_eq!(tree.edge_count() + 1, tree.node_count());

        let order_set: HashSet<&Entity> = result.order().iter().map(|d| &d.entity).collect();
        let tree_set: HashSet<&Entity> = tree.nodes().iter().collect();
        prop_assert_eq!(order_set, tree_set);

        for d in result.order().iter().skip(1) {
            prop_assert_eq!(tree.in_degree(d.entity.as_str()), 1);
            prop_assert_eq!(tree.depth_of(d.entity.as_str()), Some(d.level));
        }
        for (a, b) in tree.edges() {
            prop_assert!(graph.has_connection(a.as_str(), b.as_str()));
        }
    }

    /// Same graph and start give identical results.
    #[test]
    fn runs_are_reproducible((n, edges, start) in network()) {
        let start_name = format!("p{}", start);
        let first = SpreadEngine::new(&build(n, &edges)).run(Some(&start_name));
        let second = SpreadEngine::new(&build(n, &edges)).run(Some(&start_name));
        prop_assert_eq!(first, second);
    }
}
