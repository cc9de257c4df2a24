//! Degree centrality.

use crate::graph::csr::CsrGraph;

/// Degree centrality: `deg(v) / (n - 1)`.
///
/// A self-loop adds 2 to the degree, so values can exceed 1 on the
/// co-rating graph. A single-node graph scores 1.0.
pub fn degree_centrality(graph: &CsrGraph) -> Vec<f64> {
    let n = graph.num_nodes;
    if n <= 1 {
        return vec![1.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    graph.degree.iter().map(|&d| f64::from(d) * scale).collect()
}
