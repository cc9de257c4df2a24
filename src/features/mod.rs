//! Feature tables
//!
//! The encoded user table, metric attachment, and on-disk serialization.

pub mod extract;
pub mod table;
pub mod writer;

pub use extract::attach_metrics;
pub use table::{Column, FeatureTable};
pub use writer::{output_path, write_table, OutputFormat};
