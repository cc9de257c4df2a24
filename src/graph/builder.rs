//! Graph builder with efficient edge handling
//!
//! This module provides a mutable, undirected graph builder keyed by user id.
//! It uses FxHashMap for O(1) node and edge lookups during construction.
//! Self-loops are allowed.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use super::corating::UserPair;
use crate::types::UserId;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The user this node stands for
    pub user_id: UserId,
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    /// Create a new node
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            edges: FxHashMap::default(),
        }
    }

    /// Whether the node has an edge to itself
    pub fn has_self_loop(&self, id: u32) -> bool {
        self.edges.contains_key(&id)
    }
}

/// A mutable undirected graph builder
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Maps user id -> node ID
    user_to_id: FxHashMap<UserId, u32>,
    /// Node storage
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            user_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given user, returning its ID
    pub fn get_or_create_node(&mut self, user_id: UserId) -> u32 {
        if let Some(&id) = self.user_to_id.get(&user_id) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.user_to_id.insert(user_id, id);
        self.nodes.push(BuilderNode::new(user_id));
        id
    }

    /// Set the weight of the undirected edge `from - to`
    ///
    /// Adding an existing edge overwrites its weight. A self-loop is stored
    /// once in the node's own adjacency.
    pub fn add_edge(&mut self, from: u32, to: u32, weight: f64) {
        if let Some(node) = self.nodes.get_mut(from as usize) {
            node.edges.insert(to, weight);
        }
        if from != to {
            if let Some(node) = self.nodes.get_mut(to as usize) {
                node.edges.insert(from, weight);
            }
        }
    }

    /// Build the co-rating graph from surviving pairs
    ///
    /// Every pair becomes a unit-weight edge, and both endpoints get a
    /// unit-weight self-loop. Nodes are created in ascending user id order.
    pub fn from_pairs(pairs: &[UserPair]) -> Self {
        let users: BTreeSet<UserId> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();

        let mut builder = Self::with_capacity(users.len());
        for &user in &users {
            builder.get_or_create_node(user);
        }

        for &(a, b) in pairs {
            let id_a = builder.get_or_create_node(a);
            let id_b = builder.get_or_create_node(b);
            builder.add_edge(id_a, id_b, 1.0);
            builder.add_edge(id_a, id_a, 1.0);
            builder.add_edge(id_b, id_b, 1.0);
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of undirected edges (self-loops count once)
    pub fn edge_count(&self) -> usize {
        let mut self_loops = 0;
        let mut ends = 0;
        for (id, node) in self.nodes() {
            if node.has_self_loop(id) {
                self_loops += 1;
                ends += node.edges.len() - 1;
            } else {
                ends += node.edges.len();
            }
        }
        ends / 2 + self_loops
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by user id
    pub fn get_node_id(&self, user_id: UserId) -> Option<u32> {
        self.user_to_id.get(&user_id).copied()
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_builder_basic() {
        let mut builder = GraphBuilder::new();

        let id_a = builder.get_or_create_node(42);
        let id_b = builder.get_or_create_node(7);
        let id_c = builder.get_or_create_node(42); // duplicate

        assert_eq!(id_a, id_c);
        assert_ne!(id_a, id_b);
        assert_eq!(builder.node_count(), 2);
    }

    #[test]
    fn test_add_edge_overwrites_weight() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node(1);
        let b = builder.get_or_create_node(2);

        builder.add_edge(a, b, 1.0);
        builder.add_edge(a, b, 1.0);

        assert_eq!(builder.get_node(a).unwrap().edges.get(&b), Some(&1.0));
        assert_eq!(builder.get_node(b).unwrap().edges.get(&a), Some(&1.0));
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_stored_once() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node(1);
        builder.add_edge(a, a, 1.0);

        let node = builder.get_node(a).unwrap();
        assert_eq!(node.edges.len(), 1);
        assert!(node.has_self_loop(a));
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_from_pairs_adds_self_loops() {
        let builder = GraphBuilder::from_pairs(&[(1, 2)]);

        assert_eq!(builder.node_count(), 2);
        // edge (1,2) plus two self-loops
        assert_eq!(builder.edge_count(), 3);
        let id_1 = builder.get_node_id(1).unwrap();
        assert!(builder.get_node(id_1).unwrap().has_self_loop(id_1));
    }

    #[test]
    fn test_from_pairs_orders_nodes_by_user_id() {
        let builder = GraphBuilder::from_pairs(&[(5, 9), (2, 5)]);
        let users: Vec<UserId> = builder.nodes().map(|(_, n)| n.user_id).collect();
        assert_eq!(users, vec![2, 5, 9]);
    }
}
