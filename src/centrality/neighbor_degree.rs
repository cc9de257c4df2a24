//! Weighted average neighbor degree.

use crate::graph::csr::CsrGraph;

/// Average degree of each node's neighbors, weighted by edge weight.
///
/// ```text
/// k_nn(v) = Σ_{u ∈ N(v)} w(v, u) · deg(u) / s(v)
/// ```
///
/// `N(v)` includes `v` itself when it has a self-loop, `deg` is the plain
/// degree (self-loop counts 2) and `s(v)` is the weighted degree. Nodes with
/// zero degree score 0.
pub fn average_neighbor_degree(graph: &CsrGraph) -> Vec<f64> {
    (0..graph.num_nodes as u32)
        .map(|v| {
            let strength = graph.weighted_degree[v as usize];
            if strength == 0.0 {
                return 0.0;
            }
            let total: f64 = graph
                .neighbors(v)
                .map(|(u, w)| w * f64::from(graph.degree(u)))
                .sum();
            total / strength
        })
        .collect()
}
