//! Staged feature pipeline
//!
//! - [`spec`]: JSON configuration.
//! - [`validation`]: rule engine over a spec.
//! - [`observer`]: stage callbacks and timing.
//! - [`traits`]: table sinks.
//! - [`runner`]: the alpha sweep.

pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod traits;
pub mod validation;

pub use observer::{NoopObserver, PipelineObserver, StageTimingObserver};
pub use runner::{graph_stats, run_spec, FeaturePipeline, GraphStats, RunSummary};
pub use spec::PipelineSpec;
pub use traits::{FileSink, MemorySink, TableSink};
pub use validation::{ValidationEngine, ValidationReport};
