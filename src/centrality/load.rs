//! Load centrality (Newman).
//!
//! Each source sends one unit of load to every node it can reach. A node
//! passes the load it receives back toward the source, split evenly across
//! its BFS predecessors rather than in proportion to path counts. That split
//! is the only difference from betweenness; on graphs with unique shortest
//! paths the two coincide.

use super::betweenness::ShortestPathDag;
use super::{accumulate_sources, rescale_pairwise};
use crate::graph::csr::CsrGraph;

/// Normalized load centrality, one score per node.
pub fn load_centrality(graph: &CsrGraph) -> Vec<f64> {
    let n = graph.num_nodes;
    if n == 0 {
        return Vec::new();
    }

    let mut load = accumulate_sources(n, |source, acc| {
        let dag = ShortestPathDag::from_source(graph, source);
        let mut between = vec![0.0f64; n];
        for &v in &dag.order {
            between[v as usize] = 1.0;
        }

        // Farthest nodes first; the source's direct neighbors have only the
        // source as predecessor and pass nothing on.
        for &v in dag.order.iter().rev() {
            let preds = &dag.pred[v as usize];
            if v == source || preds.contains(&source) {
                continue;
            }
            let share = between[v as usize] / preds.len() as f64;
            for &x in preds {
                between[x as usize] += share;
            }
        }

        for &v in &dag.order {
            acc[v as usize] += between[v as usize] - 1.0;
        }
    });

    rescale_pairwise(&mut load);
    load
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::betweenness_centrality;
    use crate::centrality::test_graphs;

    #[test]
    fn test_matches_betweenness_on_trees() {
        for graph in [test_graphs::path4(), test_graphs::star4()] {
            let lc = load_centrality(&graph);
            let bc = betweenness_centrality(&graph);
            for (l, b) in lc.iter().zip(bc.iter()) {
                assert!((l - b).abs() < 1e-12, "load={l} betweenness={b}");
            }
        }
    }

    #[test]
    fn test_symmetric_branches_share_load() {
        // diamond 0-1-3, 0-2-3 with tail 3-4
        let graph = test_graphs::plain(5, &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)]);
        let lc = load_centrality(&graph);

        assert!((lc[1] - lc[2]).abs() < 1e-12);
        // node 3 is a cut vertex for 4
        assert!(lc[3] > lc[1]);
        assert_eq!(lc[4], 0.0);
    }

    #[test]
    fn test_hand_computed_diamond_tail() {
        // diamond 0-1-3, 0-2-3 with tail 3-4
        //
        // Per-source load after subtracting the unit each node keeps:
        //   source 0: {1: 1, 2: 1, 3: 1}
        //   source 4: {1: 0.5, 2: 0.5, 3: 3}
        //   source 1: {0: 0.5, 3: 1.5}
        //   source 2: {0: 0.5, 3: 1.5}
        //   source 3: {1: 0.5, 2: 0.5}
        // Totals {0: 1, 1: 2, 2: 2, 3: 7, 4: 0}, scaled by 1 / (4 * 3).
        let graph = test_graphs::plain(5, &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)]);
        let lc = load_centrality(&graph);
        let expected = [1.0 / 12.0, 2.0 / 12.0, 2.0 / 12.0, 7.0 / 12.0, 0.0];
        for (got, want) in lc.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "got={got} want={want}");
        }
    }
}
