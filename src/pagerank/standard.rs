//! Standard PageRank algorithm
//!
//! Implements the classic PageRank with power iteration and proper
//! handling of dangling nodes, over the directed form of a [`CsrGraph`]
//! (every undirected edge in both directions, self-loops once).
//!
//! Convergence follows the usual graph-library rule: stop once the L1 change
//! between iterates drops below `n * tolerance`.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Per-node convergence tolerance
    pub tolerance: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: Self::DEFAULT_DAMPING,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}

impl StandardPageRank {
    pub const DEFAULT_DAMPING: f64 = 0.85;
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;
    pub const DEFAULT_TOLERANCE: f64 = 1e-6;

    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the per-node convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Run PageRank on a graph
    ///
    /// Outgoing mass is split proportionally to arc weight. Returns the
    /// result even if convergence wasn't achieved, with `converged=false`.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.num_nodes;
        if n == 0 {
            return PageRankResult::new(vec![], 0, 0.0, true);
        }

        // Initialize scores uniformly
        let initial_score = 1.0 / n as f64;
        let mut scores = vec![initial_score; n];
        let mut new_scores = vec![0.0; n];

        let dangling_nodes = graph.dangling_nodes();

        let threshold = n as f64 * self.tolerance;
        let teleport = (1.0 - self.damping) / n as f64;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta >= threshold {
            iterations += 1;

            // Calculate dangling mass
            let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();
            let dangling_contribution = self.damping * dangling_mass / n as f64;

            // Reset new scores
            new_scores.fill(teleport + dangling_contribution);

            // Propagate scores through arcs
            for (node, &node_score) in scores.iter().enumerate() {
                let total_weight = graph.node_total_weight(node as u32);

                if total_weight > 0.0 {
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        let contribution = self.damping * node_score * weight / total_weight;
                        new_scores[neighbor as usize] += contribution;
                    }
                }
            }

            // Calculate convergence delta (L1 norm)
            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            // Swap buffers
            std::mem::swap(&mut scores, &mut new_scores);
        }

        PageRankResult::new(scores, iterations, delta, delta < threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn build_triangle_graph() -> CsrGraph {
        CsrGraph::from_builder(&GraphBuilder::from_pairs(&[(1, 2), (2, 3), (1, 3)]))
    }

    fn build_star_graph() -> CsrGraph {
        // Hub 1 connected to 3 spokes, every node with a self-loop
        CsrGraph::from_builder(&GraphBuilder::from_pairs(&[(1, 2), (1, 3), (1, 4)]))
    }

    #[test]
    fn test_triangle_graph_equal_scores() {
        let graph = build_triangle_graph();
        let result = StandardPageRank::new().run(&graph);

        assert!(result.converged);
        let expected = 1.0 / 3.0;
        for score in &result.scores {
            assert!((score - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_star_graph_hub_highest() {
        let graph = build_star_graph();
        let result = StandardPageRank::new().run(&graph);

        assert!(result.converged);
        let hub_score = result.scores[0];
        for &score in &result.scores[1..] {
            assert!(hub_score > score);
        }
    }

    #[test]
    fn test_star_graph_closed_form() {
        // Spokes: out-degree 2 (hub + self). Hub: out-degree 4.
        // x_s = 0.15/4 + 0.85 * (x_h/4 + x_s/2)
        // x_h = 0.15/4 + 0.85 * (x_h/4 + 3 * x_s/2)
        // with x_h + 3 x_s = 1.
        let graph = build_star_graph();
        let result = StandardPageRank::new().with_tolerance(1e-12).run(&graph);

        let x_h = result.scores[0];
        let x_s = result.scores[1];
        assert!((x_h + 3.0 * x_s - 1.0).abs() < 1e-9);
        let rhs = 0.15 / 4.0 + 0.85 * (x_h / 4.0 + x_s / 2.0);
        assert!((x_s - rhs).abs() < 1e-9);
    }

    #[test]
    fn test_scores_sum_to_one() {
        let graph = build_star_graph();
        let result = StandardPageRank::new().run(&graph);

        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dangling_mass_is_redistributed() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node(1);
        let b = builder.get_or_create_node(2);
        let _c = builder.get_or_create_node(3);
        builder.add_edge(a, b, 1.0);
        let graph = CsrGraph::from_builder(&builder);

        let result = StandardPageRank::new().run(&graph);
        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(result.scores[2] > 0.0);
    }

    #[test]
    fn test_empty_graph() {
        let graph = CsrGraph::default();
        let result = StandardPageRank::new().run(&graph);

        assert!(result.converged);
        assert!(result.scores.is_empty());
    }

    #[test]
    fn test_max_iterations_returns_partial() {
        let graph = build_star_graph();
        let pr = StandardPageRank::new()
            .with_max_iterations(1)
            .with_tolerance(0.0); // Never converge

        let result = pr.run(&graph);

        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_eq!(result.scores.len(), 4);
    }

    #[test]
    fn test_damping_factor() {
        let graph = build_star_graph();

        // Lower damping = more teleportation = more uniform scores
        let result_low = StandardPageRank::new().with_damping(0.5).run(&graph);
        let result_high = StandardPageRank::new().with_damping(0.95).run(&graph);

        let hub_advantage_low = result_low.scores[0] - result_low.scores[1];
        let hub_advantage_high = result_high.scores[0] - result_high.scores[1];

        assert!(hub_advantage_high > hub_advantage_low);
    }
}
