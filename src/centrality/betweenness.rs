//! Betweenness centrality.
//!
//! Public invariant:
//! - The output vector is indexed by node id (stable ordering).
//! - Disconnected graphs are allowed; unreachable pairs contribute 0.
//!
//! Notes:
//! - This is Brandes' algorithm for **undirected, unweighted** graphs.
//! - Every source is swept, so each unordered pair is counted from both
//!   ends; normalization uses \(1/((n-1)(n-2))\) for \(n \ge 3\), which is
//!   the undirected convention once the double count is taken into account.

use std::collections::VecDeque;

use super::{accumulate_sources, rescale_pairwise};
use crate::graph::csr::CsrGraph;

/// BFS shortest-path DAG from one source.
pub(crate) struct ShortestPathDag {
    /// Nodes in visit order (non-decreasing distance).
    pub order: Vec<u32>,
    /// Number of shortest paths from the source.
    pub sigma: Vec<f64>,
    /// Predecessors on shortest paths, in discovery order.
    pub pred: Vec<Vec<u32>>,
}

impl ShortestPathDag {
    pub fn from_source(graph: &CsrGraph, source: u32) -> Self {
        let n = graph.num_nodes;
        let mut order = Vec::new();
        let mut pred: Vec<Vec<u32>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut dist: Vec<i32> = vec![-1; n];

        sigma[source as usize] = 1.0;
        dist[source as usize] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            let dv = dist[v as usize];
            for &w in graph.neighbor_ids(v) {
                if dist[w as usize] < 0 {
                    dist[w as usize] = dv + 1;
                    queue.push_back(w);
                }
                if dist[w as usize] == dv + 1 {
                    sigma[w as usize] += sigma[v as usize];
                    pred[w as usize].push(v);
                }
            }
        }

        Self { order, sigma, pred }
    }
}

/// Normalized betweenness centrality (Brandes).
///
/// Returns one score per node, ordered by node id.
pub fn betweenness_centrality(graph: &CsrGraph) -> Vec<f64> {
    let n = graph.num_nodes;
    if n == 0 {
        return Vec::new();
    }

    let mut betweenness = accumulate_sources(n, |source, acc| {
        let dag = ShortestPathDag::from_source(graph, source);
        let mut delta = vec![0.0f64; n];

        for &w in dag.order.iter().rev() {
            let sigma_w = dag.sigma[w as usize];
            for &v in &dag.pred[w as usize] {
                delta[v as usize] +=
                    (dag.sigma[v as usize] / sigma_w) * (1.0 + delta[w as usize]);
            }
            if w != source {
                acc[w as usize] += delta[w as usize];
            }
        }
    });

    rescale_pairwise(&mut betweenness);
    betweenness
}
