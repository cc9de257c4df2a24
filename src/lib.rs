//! # corate
//!
//! Co-rating graph features for recommender models.
//!
//! Two users are linked when they gave the same rating to at least
//! `alpha * item_count` items. For each alpha in a sweep, the crate builds that
//! graph, computes six per-user metrics (PageRank, degree, closeness,
//! betweenness, load and average neighbor degree), scales each metric by its
//! maximum, and appends them to one-hot encoded user attributes.
//!
//! ## Example
//!
//! ```rust
//! use corate::{Dataset, FeaturePipeline, MemorySink, NoopObserver, Rating, User};
//!
//! let dataset = Dataset::new(
//!     vec![Rating::new(1, 1, 5), Rating::new(2, 1, 5)],
//!     vec![User::new(1, 24, "M", "writer"), User::new(2, 31, "F", "artist")],
//! );
//! let mut pipeline = FeaturePipeline::new(MemorySink::new())
//!     .with_alphas(vec![1.0])
//!     .with_item_count(1);
//! let summary = pipeline.run(&dataset, &mut NoopObserver)?;
//! assert_eq!(summary.alphas[0].nodes, 2);
//! # Ok::<(), corate::Error>(())
//! ```

pub mod centrality;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod features;
pub mod graph;
pub mod pagerank;
pub mod pipeline;
pub mod types;

pub use centrality::{CentralityScores, Metric};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use features::{FeatureTable, OutputFormat};
pub use graph::csr::CsrGraph;
pub use pagerank::standard::StandardPageRank;
pub use pagerank::PageRankResult;
pub use pipeline::{
    FeaturePipeline, FileSink, MemorySink, NoopObserver, PipelineObserver, PipelineSpec,
    RunSummary, TableSink,
};
pub use types::{Rating, User, UserId};
