//! Graph construction and representation
//!
//! This module counts co-rating pairs and builds the per-alpha user graph
//! in CSR form.

pub mod builder;
pub mod corating;
pub mod csr;

use builder::GraphBuilder;
use corating::{edge_threshold, PairCounts};
use csr::CsrGraph;

/// Build the co-rating graph for one alpha.
///
/// Keeps pairs whose count is at least `alpha * item_count`.
pub fn build_corating_graph(counts: &PairCounts, alpha: f64, item_count: usize) -> CsrGraph {
    let threshold = edge_threshold(alpha, item_count);
    let pairs = counts.pairs_at_least(threshold);
    let graph = CsrGraph::from_builder(&GraphBuilder::from_pairs(&pairs));

    tracing::debug!(
        alpha,
        threshold,
        pairs = pairs.len(),
        nodes = graph.num_nodes,
        edges = graph.num_edges(),
        "built co-rating graph"
    );

    graph
}
