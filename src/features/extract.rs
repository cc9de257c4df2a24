//! Attach graph metrics to the encoded user table.

use super::table::{scale_by_max, Column, FeatureTable};
use crate::centrality::{CentralityScores, Metric};
use crate::error::Result;
use crate::graph::csr::CsrGraph;

/// Per-user values of one metric, in table row order.
///
/// Users that are not nodes of `graph` get 0.
pub fn metric_by_user(table: &FeatureTable, graph: &CsrGraph, scores: &[f64]) -> Vec<f64> {
    table
        .user_ids()
        .iter()
        .map(|&user| {
            graph
                .node_of(user)
                .map(|node| scores[node as usize])
                .unwrap_or(0.0)
        })
        .collect()
}

/// Append (or replace) the six metric columns, each scaled by its maximum.
pub fn attach_metrics(
    table: &mut FeatureTable,
    graph: &CsrGraph,
    scores: &CentralityScores,
) -> Result<()> {
    for metric in Metric::ALL {
        let mut values = metric_by_user(table, graph, scores.values(metric));
        scale_by_max(&mut values);
        table.push_column(Column::new(metric.column(), values))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;
    use crate::pagerank::standard::StandardPageRank;

    fn encoded(users: &[u32]) -> FeatureTable {
        let mut table = FeatureTable::new(users.to_vec());
        table
            .push_column(Column::new("gender1", vec![1.0; users.len()]))
            .unwrap();
        table
    }

    #[test]
    fn test_absent_users_get_zero() {
        let graph = CsrGraph::from_builder(&GraphBuilder::from_pairs(&[(1, 2)]));
        let table = encoded(&[1, 2, 3]);
        let values = metric_by_user(&table, &graph, &[0.4, 0.6]);
        assert_eq!(values, vec![0.4, 0.6, 0.0]);
    }

    #[test]
    fn test_attach_metrics_scales_each_column() {
        let graph = CsrGraph::from_builder(&GraphBuilder::from_pairs(&[(1, 2), (2, 3)]));
        let scores = CentralityScores::compute(&graph, &StandardPageRank::new());
        let mut table = encoded(&[1, 2, 3, 4]);

        attach_metrics(&mut table, &graph, &scores).unwrap();

        assert_eq!(table.num_columns(), 1 + 6);
        for metric in Metric::ALL {
            let column = table.column(metric.column()).unwrap();
            assert!((column.max() - 1.0).abs() < 1e-12, "{metric}");
            assert!(column.values.iter().all(|v| (0.0..=1.0).contains(v)));
            // user 4 is not in the graph
            assert_eq!(column.values[3], 0.0);
        }
        // node 2 is the middle of the path
        assert_eq!(table.column("CB").unwrap().values[1], 1.0);
    }

    #[test]
    fn test_worked_example_isolated_user() {
        // (u1,u2) with self-loops; u3 isolated
        let graph = CsrGraph::from_builder(&GraphBuilder::from_pairs(&[(1, 2)]));
        let scores = CentralityScores::compute(&graph, &StandardPageRank::new());
        let mut table = encoded(&[1, 2, 3]);

        attach_metrics(&mut table, &graph, &scores).unwrap();

        for metric in [Metric::PageRank, Metric::Degree, Metric::Closeness, Metric::AvgNeighborDegree] {
            assert_eq!(table.column(metric.column()).unwrap().values, vec![1.0, 1.0, 0.0], "{metric}");
        }
        // no intermediaries on a single edge: all zero, not NaN
        for metric in [Metric::Betweenness, Metric::Load] {
            assert_eq!(table.column(metric.column()).unwrap().values, vec![0.0, 0.0, 0.0], "{metric}");
        }
    }

    #[test]
    fn test_empty_graph_gives_zero_columns() {
        let graph = CsrGraph::default();
        let scores = CentralityScores::compute(&graph, &StandardPageRank::new());
        let mut table = encoded(&[1, 2]);

        attach_metrics(&mut table, &graph, &scores).unwrap();
        for metric in Metric::ALL {
            assert_eq!(table.column(metric.column()).unwrap().values, vec![0.0, 0.0]);
        }
    }
}
