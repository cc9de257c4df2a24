//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. The runner calls [`PipelineObserver::on_stage_start`] and
//! [`PipelineObserver::on_stage_end`] around every stage, and hands over the
//! intermediate artifacts (encoded table, per-alpha graph, scores) as they
//! are produced.

use std::time::{Duration, Instant};

use crate::centrality::CentralityScores;
use crate::features::FeatureTable;
use crate::graph::csr::CsrGraph;

// ─── Stage names ────────────────────────────────────────────────────────────

pub const STAGE_LOAD: &str = "load";
pub const STAGE_ENCODE: &str = "encode";
pub const STAGE_PAIRS: &str = "pairs";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_METRICS: &str = "metrics";
pub const STAGE_WRITE: &str = "write";

// ─── Timing ─────────────────────────────────────────────────────────────────

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// What a stage reports when it finishes.
///
/// Only `elapsed` is always present; the rest is filled in by the stages
/// that have something to say (graph size, PageRank convergence, rows).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    alpha: Option<f64>,
    nodes: Option<usize>,
    edges: Option<usize>,
    rows: Option<usize>,
    iterations: Option<usize>,
    converged: Option<bool>,
    residual: Option<f64>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }
    pub fn nodes(&self) -> Option<usize> {
        self.nodes
    }
    pub fn edges(&self) -> Option<usize> {
        self.edges
    }
    pub fn rows(&self) -> Option<usize> {
        self.rows
    }
    pub fn iterations(&self) -> Option<usize> {
        self.iterations
    }
    pub fn converged(&self) -> Option<bool> {
        self.converged
    }
    pub fn residual(&self) -> Option<f64> {
        self.residual
    }
}

/// Fluent builder for a [`StageReport`].
#[derive(Debug, Clone)]
pub struct StageReportBuilder(StageReport);

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self(StageReport::new(elapsed))
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.0.alpha = Some(alpha);
        self
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.0.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.0.edges = Some(edges);
        self
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.0.rows = Some(rows);
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.0.iterations = Some(iterations);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.0.converged = Some(converged);
        self
    }

    pub fn residual(mut self, residual: f64) -> Self {
        self.0.residual = Some(residual);
        self
    }

    pub fn build(self) -> StageReport {
        self.0
    }
}

// ─── Observer trait ─────────────────────────────────────────────────────────

/// Callbacks fired by the pipeline runner. Every method has an empty default.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// The encoded attribute table, before any metric columns.
    fn on_encoded(&mut self, _table: &FeatureTable) {}

    fn on_graph(&mut self, _alpha: f64, _graph: &CsrGraph) {}

    fn on_scores(&mut self, _alpha: f64, _scores: &CentralityScores) {}

    /// The final table for one alpha, just before it is written.
    fn on_table(&mut self, _alpha: f64, _table: &FeatureTable) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records every stage report in order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Reports for one stage name, in the order they were produced.
    pub fn stage(&self, name: &str) -> impl Iterator<Item = &StageReport> + '_ {
        let name = name.to_string();
        self.reports
            .iter()
            .filter(move |(stage, _)| *stage == name)
            .map(|(_, report)| report)
    }

    /// Sum of elapsed time across all recorded stages.
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        tracing::debug!(
            stage,
            elapsed_ms = report.elapsed().as_secs_f64() * 1e3,
            "stage finished"
        );
        self.reports.push((stage, report.clone()));
    }
}
