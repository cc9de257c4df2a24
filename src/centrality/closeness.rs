//! Closeness centrality: inverse of mean shortest path distance.
//!
//! Uses the Wasserman–Faust correction so that nodes in small components do
//! not look central:
//!
//! ```text
//! C(v) = (r - 1) / Σ d(v, u)  ·  (r - 1) / (n - 1)
//! ```
//!
//! where `r` counts the nodes reachable from `v` (including `v`).

use std::collections::VecDeque;

use super::map_sources;
use crate::graph::csr::CsrGraph;

/// Closeness centrality for every node (unweighted BFS distances).
pub fn closeness_centrality(graph: &CsrGraph) -> Vec<f64> {
    let n = graph.num_nodes;
    if n <= 1 {
        return vec![0.0; n];
    }

    map_sources(n, |source| {
        let (reachable, total_dist) = bfs_reach(graph, source);
        if total_dist == 0 {
            return 0.0;
        }
        let others = (reachable - 1) as f64;
        (others / total_dist as f64) * (others / (n - 1) as f64)
    })
}

/// Number of reachable nodes (including the source) and the sum of their
/// distances.
fn bfs_reach(graph: &CsrGraph, source: u32) -> (usize, u64) {
    let mut dist: Vec<i32> = vec![-1; graph.num_nodes];
    let mut queue = VecDeque::new();
    dist[source as usize] = 0;
    queue.push_back(source);

    let mut reachable = 0usize;
    let mut total = 0u64;
    while let Some(v) = queue.pop_front() {
        reachable += 1;
        total += dist[v as usize] as u64;
        for &w in graph.neighbor_ids(v) {
            if dist[w as usize] < 0 {
                dist[w as usize] = dist[v as usize] + 1;
                queue.push_back(w);
            }
        }
    }
    (reachable, total)
}
