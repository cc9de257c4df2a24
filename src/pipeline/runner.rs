//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! [`FeaturePipeline::run`] encodes the user attributes once, counts
//! co-rating pairs once, and then sweeps the configured alphas. For each
//! alpha it builds the graph, computes the six metrics, appends them to a
//! copy of the encoded table and hands the result to a [`TableSink`].
//!
//! Stages, in order:
//!
//! | Stage | Runs | Reports |
//! |-------|------|---------|
//! | [`STAGE_ENCODE`]  | once      | rows |
//! | [`STAGE_PAIRS`]   | once      | edges (distinct pairs) |
//! | [`STAGE_GRAPH`]   | per alpha | alpha, nodes, edges |
//! | [`STAGE_METRICS`] | per alpha | alpha, iterations, converged, residual |
//! | [`STAGE_WRITE`]   | per alpha | alpha, rows |
//!
//! [`run_spec`] adds a leading [`STAGE_LOAD`] that reads the dataset from
//! disk and writes files through a [`FileSink`].

use std::path::PathBuf;

use serde::Serialize;

use crate::centrality::CentralityScores;
use crate::dataset::encoder::CategoricalEncoder;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::features::{attach_metrics, FeatureTable};
use crate::graph::build_corating_graph;
use crate::graph::corating::{edge_threshold, PairCounts};
use crate::pagerank::standard::StandardPageRank;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReportBuilder, STAGE_ENCODE, STAGE_GRAPH,
    STAGE_LOAD, STAGE_METRICS, STAGE_PAIRS, STAGE_WRITE,
};
use crate::pipeline::spec::{PipelineSpec, DEFAULT_ALPHAS, DEFAULT_ITEM_COUNT};
use crate::pipeline::traits::{FileSink, TableSink};
use crate::pipeline::validation::ValidationEngine;

// ---------------------------------------------------------------------------
// Tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage. The span lasts until the end of
/// the enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
    ($name:expr, $alpha:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name, alpha = $alpha).entered();
    };
}

// ============================================================================
// Summaries
// ============================================================================

/// Outcome of one alpha.
#[derive(Debug, Clone, Serialize)]
pub struct AlphaSummary {
    pub alpha: f64,
    /// Minimum pair count for an edge (`alpha * item_count`).
    pub threshold: f64,
    pub nodes: usize,
    pub edges: usize,
    pub pagerank_iterations: usize,
    pub pagerank_converged: bool,
    pub output: Option<PathBuf>,
}

/// Outcome of a whole sweep.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub users: usize,
    pub ratings: usize,
    pub encoded_columns: usize,
    /// Distinct user pairs with at least one identical rating.
    pub pairs: usize,
    pub alphas: Vec<AlphaSummary>,
}

/// Graph size for one alpha, without any metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub alpha: f64,
    pub threshold: f64,
    pub nodes: usize,
    pub edges: usize,
    pub self_loops: usize,
    /// Users in the dataset that are not nodes of the graph.
    pub isolated_users: usize,
}

// ============================================================================
// FeaturePipeline
// ============================================================================

/// The alpha sweep, generic over where tables go.
#[derive(Debug, Clone)]
pub struct FeaturePipeline<S> {
    alphas: Vec<f64>,
    item_count: usize,
    pagerank: StandardPageRank,
    encoder: CategoricalEncoder,
    sink: S,
}

impl FeaturePipeline<FileSink> {
    /// Build a file-writing pipeline from a validated spec.
    ///
    /// Validation warnings are logged; errors are returned as
    /// [`Error::InvalidConfig`].
    pub fn from_spec(spec: &PipelineSpec) -> Result<Self> {
        check_spec(spec)?;
        let sink = FileSink::new(&spec.output_dir, spec.format)?.with_user_id(spec.include_user_id);
        Ok(Self::new(sink)
            .with_alphas(spec.alphas.clone())
            .with_item_count(spec.item_count)
            .with_pagerank(spec.pagerank.to_pagerank()))
    }
}

impl<S: TableSink> FeaturePipeline<S> {
    /// Pipeline with the default alpha sweep, item count and PageRank.
    pub fn new(sink: S) -> Self {
        Self {
            alphas: DEFAULT_ALPHAS.to_vec(),
            item_count: DEFAULT_ITEM_COUNT,
            pagerank: StandardPageRank::new(),
            encoder: CategoricalEncoder::new(),
            sink,
        }
    }

    pub fn with_alphas(mut self, alphas: Vec<f64>) -> Self {
        self.alphas = alphas;
        self
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_pagerank(mut self, pagerank: StandardPageRank) -> Self {
        self.pagerank = pagerank;
        self
    }

    pub fn alphas(&self) -> &[f64] {
        &self.alphas
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run the sweep over `dataset`.
    ///
    /// The `observer` receives callbacks at each stage boundary. Pass
    /// [`NoopObserver`](super::observer::NoopObserver) when nothing needs
    /// them.
    pub fn run(
        &mut self,
        dataset: &Dataset,
        observer: &mut impl PipelineObserver,
    ) -> Result<RunSummary> {
        let distinct_items = dataset.distinct_items();
        if distinct_items != self.item_count {
            tracing::warn!(
                distinct_items,
                item_count = self.item_count,
                "rated item count differs from configured item_count"
            );
        }

        // Stage: encode user attributes
        let encoded = {
            trace_stage!(STAGE_ENCODE);
            observer.on_stage_start(STAGE_ENCODE);
            let clock = StageClock::start();
            let table = self.encoder.encode(&dataset.users)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .rows(table.num_rows())
                .build();
            observer.on_stage_end(STAGE_ENCODE, &report);
            observer.on_encoded(&table);
            table
        };

        // Stage: count co-rating pairs, shared by every alpha
        let counts = {
            trace_stage!(STAGE_PAIRS);
            observer.on_stage_start(STAGE_PAIRS);
            let clock = StageClock::start();
            let counts = PairCounts::from_ratings(&dataset.ratings);
            let report = StageReportBuilder::new(clock.elapsed())
                .edges(counts.len())
                .build();
            observer.on_stage_end(STAGE_PAIRS, &report);
            tracing::info!(pairs = counts.len(), "counted co-rating pairs");
            counts
        };

        let alphas = self.alphas.clone();
        let mut summaries = Vec::with_capacity(alphas.len());
        for alpha in alphas {
            summaries.push(self.run_alpha(alpha, &counts, &encoded, observer)?);
        }

        Ok(RunSummary {
            users: dataset.users.len(),
            ratings: dataset.ratings.len(),
            encoded_columns: encoded.num_columns(),
            pairs: counts.len(),
            alphas: summaries,
        })
    }

    fn run_alpha(
        &mut self,
        alpha: f64,
        counts: &PairCounts,
        encoded: &FeatureTable,
        observer: &mut impl PipelineObserver,
    ) -> Result<AlphaSummary> {
        // Stage: build graph
        let graph = {
            trace_stage!(STAGE_GRAPH, alpha);
            observer.on_stage_start(STAGE_GRAPH);
            let clock = StageClock::start();
            let graph = build_corating_graph(counts, alpha, self.item_count);
            let report = StageReportBuilder::new(clock.elapsed())
                .alpha(alpha)
                .nodes(graph.num_nodes)
                .edges(graph.num_edges())
                .build();
            observer.on_stage_end(STAGE_GRAPH, &report);
            observer.on_graph(alpha, &graph);
            graph
        };

        if graph.is_empty() {
            tracing::warn!(alpha, "no user pair reaches the threshold; metric columns will be zero");
        }

        // Stage: metrics
        let (table, scores) = {
            trace_stage!(STAGE_METRICS, alpha);
            observer.on_stage_start(STAGE_METRICS);
            let clock = StageClock::start();
            let scores = CentralityScores::compute(&graph, &self.pagerank);
            let mut table = encoded.clone();
            attach_metrics(&mut table, &graph, &scores)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .alpha(alpha)
                .iterations(scores.pagerank.iterations)
                .converged(scores.pagerank.converged)
                .residual(scores.pagerank.delta)
                .build();
            observer.on_stage_end(STAGE_METRICS, &report);
            observer.on_scores(alpha, &scores);
            (table, scores)
        };

        if !scores.pagerank.converged {
            tracing::warn!(
                alpha,
                iterations = scores.pagerank.iterations,
                residual = scores.pagerank.delta,
                "PageRank did not converge; using last iterate"
            );
        }

        // Stage: write
        let output = {
            trace_stage!(STAGE_WRITE, alpha);
            observer.on_stage_start(STAGE_WRITE);
            observer.on_table(alpha, &table);
            let clock = StageClock::start();
            let output = self.sink.write(alpha, &table)?;
            let report = StageReportBuilder::new(clock.elapsed())
                .alpha(alpha)
                .rows(table.num_rows())
                .build();
            observer.on_stage_end(STAGE_WRITE, &report);
            output
        };

        Ok(AlphaSummary {
            alpha,
            threshold: edge_threshold(alpha, self.item_count),
            nodes: graph.num_nodes,
            edges: graph.num_edges(),
            pagerank_iterations: scores.pagerank.iterations,
            pagerank_converged: scores.pagerank.converged,
            output,
        })
    }
}

// ============================================================================
// Spec-driven entry points
// ============================================================================

/// Validate `spec`, logging warnings and failing on errors.
pub fn check_spec(spec: &PipelineSpec) -> Result<()> {
    let report = ValidationEngine::with_defaults().validate(spec);
    for warning in report.warnings() {
        tracing::warn!(code = warning.code.as_str(), path = %warning.path, "{}", warning.message);
    }
    if report.has_errors() {
        let messages: Vec<String> = report.errors().map(|e| e.to_string()).collect();
        return Err(Error::InvalidConfig(messages.join("; ")));
    }
    Ok(())
}

/// Load the dataset named by `spec`, reporting it as [`STAGE_LOAD`].
pub fn load_dataset(spec: &PipelineSpec, observer: &mut impl PipelineObserver) -> Result<Dataset> {
    trace_stage!(STAGE_LOAD);
    observer.on_stage_start(STAGE_LOAD);
    let clock = StageClock::start();
    let dataset = Dataset::load(&spec.data_dir, &spec.ratings_file, &spec.users_file)?;
    let report = StageReportBuilder::new(clock.elapsed())
        .rows(dataset.ratings.len())
        .build();
    observer.on_stage_end(STAGE_LOAD, &report);
    Ok(dataset)
}

/// Validate, load, and run the whole sweep described by `spec`.
pub fn run_spec(spec: &PipelineSpec, observer: &mut impl PipelineObserver) -> Result<RunSummary> {
    let mut pipeline = FeaturePipeline::from_spec(spec)?;
    let dataset = load_dataset(spec, observer)?;
    pipeline.run(&dataset, observer)
}

/// Node and edge counts per alpha, skipping the metrics.
pub fn graph_stats(dataset: &Dataset, alphas: &[f64], item_count: usize) -> Vec<GraphStats> {
    let counts = PairCounts::from_ratings(&dataset.ratings);
    alphas
        .iter()
        .map(|&alpha| {
            let graph = build_corating_graph(&counts, alpha, item_count);
            let isolated_users = dataset
                .users
                .iter()
                .filter(|u| graph.node_of(u.user_id).is_none())
                .count();
            GraphStats {
                alpha,
                threshold: edge_threshold(alpha, item_count),
                nodes: graph.num_nodes,
                edges: graph.num_edges(),
                self_loops: graph.num_self_loops(),
                isolated_users,
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
