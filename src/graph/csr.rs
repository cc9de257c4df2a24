//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR is optimized for iteration over neighbors, which is what every
//! centrality sweep and PageRank power iteration does.
//!
//! Row `i` lists every neighbor of node `i`, including `i` itself when the
//! node has a self-loop. Read as arcs, the rows are exactly the directed form
//! of the undirected graph: each edge appears in both directions and each
//! self-loop once.

use super::builder::GraphBuilder;
use crate::types::UserId;

/// A graph in Compressed Sparse Row format
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (target nodes) for each edge
    pub col_idx: Vec<u32>,
    /// Edge weights
    pub weights: Vec<f64>,
    /// Degree for each node (a self-loop adds 2)
    pub degree: Vec<u32>,
    /// Weighted degree for each node (a self-loop adds twice its weight)
    pub weighted_degree: Vec<f64>,
    /// Total outgoing arc weight for each node (a self-loop adds once)
    pub total_weight: Vec<f64>,
    /// User id for each node
    pub user_ids: Vec<UserId>,
    /// Whether the user ids are strictly ascending (enables binary search)
    sorted_ids: bool,
}

impl CsrGraph {
    /// Convert a GraphBuilder into CSR format
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();
        let mut degree = Vec::with_capacity(num_nodes);
        let mut weighted_degree = Vec::with_capacity(num_nodes);
        let mut total_weight = Vec::with_capacity(num_nodes);
        let mut user_ids = Vec::with_capacity(num_nodes);

        row_ptr.push(0);

        for (id, node) in builder.nodes() {
            user_ids.push(node.user_id);

            // Collect and sort edges for deterministic iteration
            let mut edges: Vec<_> = node.edges.iter().map(|(&k, &v)| (k, v)).collect();
            edges.sort_by_key(|(k, _)| *k);

            let self_weight = node.edges.get(&id).copied();
            let row_weight: f64 = edges.iter().map(|(_, w)| w).sum();

            degree.push(edges.len() as u32 + u32::from(self_weight.is_some()));
            weighted_degree.push(row_weight + self_weight.unwrap_or(0.0));
            total_weight.push(row_weight);

            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight);
            }

            row_ptr.push(col_idx.len());
        }

        let sorted_ids = user_ids.windows(2).all(|w| w[0] < w[1]);

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            weights,
            degree,
            weighted_degree,
            total_weight,
            user_ids,
            sorted_ids,
        }
    }

    /// Iterate over neighbors of a node (including itself on a self-loop)
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Neighbor ids as a borrowed slice
    pub fn neighbor_ids(&self, node: u32) -> &[u32] {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        &self.col_idx[start..end]
    }

    /// Get the degree of a node (self-loop counted twice)
    pub fn degree(&self, node: u32) -> u32 {
        self.degree[node as usize]
    }

    /// Get the total outgoing arc weight of a node
    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    /// Get the user id for a node
    pub fn user_id(&self, node: u32) -> UserId {
        self.user_ids[node as usize]
    }

    /// Get the node for a user id
    pub fn node_of(&self, user_id: UserId) -> Option<u32> {
        if self.sorted_ids {
            self.user_ids.binary_search(&user_id).ok().map(|i| i as u32)
        } else {
            self.user_ids.iter().position(|&u| u == user_id).map(|i| i as u32)
        }
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Number of arcs in the directed form (edges twice, self-loops once)
    pub fn num_arcs(&self) -> usize {
        self.col_idx.len()
    }

    /// Number of undirected edges (self-loops count once)
    pub fn num_edges(&self) -> usize {
        let self_loops = self.num_self_loops();
        (self.num_arcs() - self_loops) / 2 + self_loops
    }

    /// Number of nodes with a self-loop
    pub fn num_self_loops(&self) -> usize {
        (0..self.num_nodes as u32)
            .filter(|&n| self.neighbor_ids(n).contains(&n))
            .count()
    }

    /// Find dangling nodes (nodes with no outgoing arcs)
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.total_weight[n as usize] == 0.0)
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            degree: Vec::new(),
            weighted_degree: Vec::new(),
            total_weight: Vec::new(),
            user_ids: Vec::new(),
            sorted_ids: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_test_graph() -> GraphBuilder {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node(10);
        let b = builder.get_or_create_node(20);
        let c = builder.get_or_create_node(30);

        builder.add_edge(a, b, 1.0);
        builder.add_edge(b, c, 2.0);
        builder.add_edge(a, c, 1.5);
        builder.add_edge(a, a, 1.0);

        builder
    }

    #[test]
    fn test_csr_conversion() {
        let builder = build_test_graph();
        let csr = CsrGraph::from_builder(&builder);

        assert_eq!(csr.num_nodes, 3);
        assert_eq!(csr.user_ids, vec![10, 20, 30]);
    }

    #[test]
    fn test_neighbor_iteration_includes_self_loop() {
        let builder = build_test_graph();
        let csr = CsrGraph::from_builder(&builder);

        assert_eq!(csr.neighbor_ids(0), &[0, 1, 2]);
        let c_neighbor = csr.neighbors(0).find(|(n, _)| *n == 2);
        assert!((c_neighbor.unwrap().1 - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_degree_counts_self_loop_twice() {
        let builder = build_test_graph();
        let csr = CsrGraph::from_builder(&builder);

        assert_eq!(csr.degree(0), 4);
        assert_eq!(csr.degree(1), 2);
        // arcs: 1.0 (self) + 1.0 + 1.5
        assert!((csr.node_total_weight(0) - 3.5).abs() < 1e-10);
        assert!((csr.weighted_degree[0] - 4.5).abs() < 1e-10);
    }

    #[test]
    fn test_edge_and_arc_counts() {
        let builder = build_test_graph();
        let csr = CsrGraph::from_builder(&builder);

        assert_eq!(csr.num_self_loops(), 1);
        assert_eq!(csr.num_arcs(), 7);
        assert_eq!(csr.num_edges(), 4);
        assert_eq!(csr.num_edges(), builder.edge_count());
    }

    #[test]
    fn test_empty_graph() {
        let builder = GraphBuilder::new();
        let csr = CsrGraph::from_builder(&builder);

        assert!(csr.is_empty());
        assert_eq!(csr.num_edges(), 0);
        assert_eq!(csr.node_of(1), None);
    }

    #[test]
    fn test_dangling_nodes() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node(1);
        let b = builder.get_or_create_node(2);
        let _c = builder.get_or_create_node(3);
        builder.add_edge(a, b, 1.0);

        let csr = CsrGraph::from_builder(&builder);
        assert_eq!(csr.dangling_nodes(), vec![2]);
    }

    #[test]
    fn test_node_of() {
        let csr = CsrGraph::from_builder(&GraphBuilder::from_pairs(&[(3, 8), (8, 11)]));

        assert_eq!(csr.node_of(3), Some(0));
        assert_eq!(csr.node_of(11), Some(2));
        assert_eq!(csr.node_of(4), None);

        let mut builder = GraphBuilder::new();
        builder.get_or_create_node(9);
        builder.get_or_create_node(1);
        let unsorted = CsrGraph::from_builder(&builder);
        assert_eq!(unsorted.node_of(1), Some(1));
    }
}
