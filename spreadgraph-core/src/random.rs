//! Random community generation.
//!
//! The core only depends on [`RandomGraphSource`]: give it a node count, an
//! edge probability and an optional seed, get back a graph over numeric ids.
//! [`SocialGraph::from_random_source`](crate::SocialGraph::from_random_source)
//! relabels those ids into `Person_<id>` entities.

use petgraph::graphmap::UnGraphMap;

use crate::error::SpreadGraphResult;
#[cfg(feature = "random")]
use crate::error::SpreadGraphError;

/// Name prefix given to generated people.
pub const PERSON_PREFIX: &str = "Person_";

/// Producer of numerically-labeled random graphs.
pub trait RandomGraphSource {
    /// Generate a graph with nodes `0..num_nodes`.
    fn generate(
        &self,
        num_nodes: usize,
        edge_prob: f64,
        seed: Option<u64>,
    ) -> SpreadGraphResult<UnGraphMap<usize, ()>>;
}

/// G(n, p) generator: each unordered pair is connected independently with
/// probability `p`, pairs considered in lexicographic order.
#[cfg(feature = "random")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ErdosRenyi;

#[cfg(feature = "random")]
impl RandomGraphSource for ErdosRenyi {
    fn generate(
        &self,
        num_nodes: usize,
        edge_prob: f64,
        seed: Option<u64>,
    ) -> SpreadGraphResult<UnGraphMap<usize, ()>> {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        if !(0.0..=1.0).contains(&edge_prob) {
            return Err(SpreadGraphError::invalid_argument(format!(
                "edge probability must lie in [0, 1], got {}",
                edge_prob
            )));
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut graph = UnGraphMap::with_capacity(num_nodes, 0);
        for id in 0..num_nodes {
            graph.add_node(id);
        }
        for a in 0..num_nodes {
            for b in (a + 1)..num_nodes {
                if rng.gen::<f64>() < edge_prob {
                    graph.add_edge(a, b, ());
                }
            }
        }

        tracing::debug!(
            nodes = num_nodes,
            edges = graph.edge_count(),
            edge_prob,
            "generated random community"
        );
        Ok(graph)
    }
}

#[cfg(all(test, feature = "random"))]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_node_count_matches() {
        let graph = ErdosRenyi.generate(5, 0.4, Some(42)).unwrap();
        assert_eq!(graph.node_count(), 5);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = ErdosRenyi.generate(30, 0.3, Some(7)).unwrap();
        let b = ErdosRenyi.generate(30, 0.3, Some(7)).unwrap();
        let edges_a: Vec<_> = a.all_edges().map(|(x, y, _)| (x, y)).collect();
        let edges_b: Vec<_> = b.all_edges().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(edges_a, edges_b);
    }

    #[test]
    fn test_probability_bounds() {
        assert_eq!(ErdosRenyi.generate(6, 0.0, None).unwrap().edge_count(), 0);
        assert_eq!(ErdosRenyi.generate(6, 1.0, None).unwrap().edge_count(), 15);
    }

    #[test]
    fn test_invalid_probability_rejected() {
        for p in [-0.1, 1.5, f64::NAN] {
            let err = ErdosRenyi.generate(3, p, None).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }
}
