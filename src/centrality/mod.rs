//! Node centrality measures over the co-rating graph.
//!
//! All measures take a [`CsrGraph`] and return one score per node, indexed
//! by node id. The graph is undirected and unweighted for path-based
//! measures; self-loops never lie on a shortest path.
//!
//! | Metric | Column | Definition |
//! |--------|--------|------------|
//! | PageRank | `PR` | power iteration on the directed form |
//! | Degree | `CD` | `deg(v) / (n - 1)`, self-loop counts 2 |
//! | Closeness | `CC` | Wasserman–Faust scaled inverse mean distance |
//! | Betweenness | `CB` | Brandes, normalized by `(n-1)(n-2)` |
//! | Load | `LC` | Newman load, normalized by `(n-1)(n-2)` |
//! | Avg. neighbor degree | `AND` | weighted mean degree of neighbors |
//!
//! The per-source sweeps (closeness, betweenness, load) run on a rayon pool
//! when the `parallel` feature is enabled.

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod load;
pub mod neighbor_degree;

pub use betweenness::betweenness_centrality;
pub use closeness::closeness_centrality;
pub use degree::degree_centrality;
pub use load::load_centrality;
pub use neighbor_degree::average_neighbor_degree;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::graph::csr::CsrGraph;
use crate::pagerank::standard::StandardPageRank;
use crate::pagerank::PageRankResult;

/// One of the six per-user graph features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    PageRank,
    Degree,
    Closeness,
    Betweenness,
    Load,
    AvgNeighborDegree,
}

impl Metric {
    /// All metrics in output column order.
    pub const ALL: [Metric; 6] = [
        Metric::PageRank,
        Metric::Degree,
        Metric::Closeness,
        Metric::Betweenness,
        Metric::Load,
        Metric::AvgNeighborDegree,
    ];

    /// Column name in the feature table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::PageRank => "PR",
            Self::Degree => "CD",
            Self::Closeness => "CC",
            Self::Betweenness => "CB",
            Self::Load => "LC",
            Self::AvgNeighborDegree => "AND",
        }
    }

    /// Human-readable name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageRank => "pagerank",
            Self::Degree => "degree_centrality",
            Self::Closeness => "closeness_centrality",
            Self::Betweenness => "betweenness_centrality",
            Self::Load => "load_centrality",
            Self::AvgNeighborDegree => "average_neighbor_degree",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every metric for one graph, indexed by node id.
#[derive(Debug, Clone)]
pub struct CentralityScores {
    pub pagerank: PageRankResult,
    pub degree: Vec<f64>,
    pub closeness: Vec<f64>,
    pub betweenness: Vec<f64>,
    pub load: Vec<f64>,
    pub avg_neighbor_degree: Vec<f64>,
}

impl CentralityScores {
    /// Compute all six metrics.
    pub fn compute(graph: &CsrGraph, pagerank: &StandardPageRank) -> Self {
        Self {
            pagerank: pagerank.run(graph),
            degree: degree_centrality(graph),
            closeness: closeness_centrality(graph),
            betweenness: betweenness_centrality(graph),
            load: load_centrality(graph),
            avg_neighbor_degree: average_neighbor_degree(graph),
        }
    }

    /// Scores for one metric.
    pub fn values(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::PageRank => &self.pagerank.scores,
            Metric::Degree => &self.degree,
            Metric::Closeness => &self.closeness,
            Metric::Betweenness => &self.betweenness,
            Metric::Load => &self.load,
            Metric::AvgNeighborDegree => &self.avg_neighbor_degree,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-source sweeps
// ---------------------------------------------------------------------------

/// Run `per_source` for every node and sum the per-node contributions.
#[cfg(feature = "parallel")]
pub(crate) fn accumulate_sources<F>(n: usize, per_source: F) -> Vec<f64>
where
    F: Fn(u32, &mut [f64]) + Sync,
{
    (0..n as u32)
        .into_par_iter()
        .fold(
            || vec![0.0; n],
            |mut acc, source| {
                per_source(source, &mut acc);
                acc
            },
        )
        .reduce(
            || vec![0.0; n],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        )
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn accumulate_sources<F>(n: usize, per_source: F) -> Vec<f64>
where
    F: Fn(u32, &mut [f64]) + Sync,
{
    let mut acc = vec![0.0; n];
    for source in 0..n as u32 {
        per_source(source, &mut acc);
    }
    acc
}

/// Compute one value per source node.
#[cfg(feature = "parallel")]
pub(crate) fn map_sources<F>(n: usize, per_source: F) -> Vec<f64>
where
    F: Fn(u32) -> f64 + Sync + Send,
{
    (0..n as u32).into_par_iter().map(per_source).collect()
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_sources<F>(n: usize, per_source: F) -> Vec<f64>
where
    F: Fn(u32) -> f64 + Sync + Send,
{
    (0..n as u32).map(per_source).collect()
}

/// Shared rescaling for betweenness-style sums: `1 / ((n-1)(n-2))`, or
/// nothing when `n <= 2`.
pub(crate) fn rescale_pairwise(scores: &mut [f64]) {
    let n = scores.len();
    if n <= 2 {
        return;
    }
    let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
    for s in scores.iter_mut() {
        *s *= scale;
    }
}

#[cfg(test)]
pub(crate) mod test_graphs {
    use crate::graph::builder::GraphBuilder;
    use crate::graph::csr::CsrGraph;

    /// Graph from pairs without the co-rating self-loops.
    pub fn plain(n: u32, edges: &[(u32, u32)]) -> CsrGraph {
        let mut builder = GraphBuilder::new();
        for user in 0..n {
            builder.get_or_create_node(user);
        }
        for &(a, b) in edges {
            builder.add_edge(a, b, 1.0);
        }
        CsrGraph::from_builder(&builder)
    }

    /// Path 0 - 1 - 2 - 3.
    pub fn path4() -> CsrGraph {
        plain(4, &[(0, 1), (1, 2), (2, 3)])
    }

    /// Star with hub 0 and spokes 1..=3.
    pub fn star4() -> CsrGraph {
        plain(4, &[(0, 1), (0, 2), (0, 3)])
    }
}
