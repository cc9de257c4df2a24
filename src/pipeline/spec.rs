//! Pipeline specification types.
//!
//! A [`PipelineSpec`] describes where the data lives, which alphas to sweep,
//! how PageRank is run and how tables are written. Every field is optional in
//! JSON; omitted fields take the MovieLens-100k defaults. These types are the
//! input to the [`super::validation::ValidationEngine`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "data_dir": "datasets/ml-100k",
//!   "output_dir": "data100k",
//!   "format": "csv",
//!   "alphas": [0.005, 0.01, 0.015],
//!   "item_count": 1682,
//!   "pagerank": { "damping": 0.85, "max_iterations": 100, "tolerance": 1e-6 },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::{DEFAULT_RATINGS_FILE, DEFAULT_USERS_FILE};
use crate::error::{Error, Result};
use crate::features::OutputFormat;
use crate::pagerank::standard::StandardPageRank;

/// Current spec version.
pub const SPEC_VERSION: u32 = 1;

/// Default alpha sweep: 0.005 to 0.045 in steps of 0.005.
pub const DEFAULT_ALPHAS: [f64; 9] = [
    0.005, 0.01, 0.015, 0.02, 0.025, 0.03, 0.035, 0.04, 0.045,
];

/// Number of items in MovieLens-100k.
pub const DEFAULT_ITEM_COUNT: usize = 1682;

pub const DEFAULT_DATA_DIR: &str = "datasets/ml-100k";
pub const DEFAULT_OUTPUT_DIR: &str = "data100k";

/// Top-level pipeline specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// Spec version (currently `1`).
    #[serde(default = "default_version")]
    pub v: u32,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_ratings_file")]
    pub ratings_file: String,

    #[serde(default = "default_users_file")]
    pub users_file: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub format: OutputFormat,

    /// Edge-threshold fractions; one output table per value.
    #[serde(default = "default_alphas")]
    pub alphas: Vec<f64>,

    /// Catalog size used in `alpha * item_count`.
    #[serde(default = "default_item_count")]
    pub item_count: usize,

    #[serde(default)]
    pub pagerank: PageRankSpec,

    /// Write a leading user id column in CSV output.
    #[serde(default)]
    pub include_user_id: bool,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    /// Used by the strict-mode validation rule.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// PageRank parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRankSpec {
    #[serde(default = "default_damping")]
    pub damping: f64,

    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_version() -> u32 {
    SPEC_VERSION
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}
fn default_ratings_file() -> String {
    DEFAULT_RATINGS_FILE.to_string()
}
fn default_users_file() -> String {
    DEFAULT_USERS_FILE.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}
fn default_alphas() -> Vec<f64> {
    DEFAULT_ALPHAS.to_vec()
}
fn default_item_count() -> usize {
    DEFAULT_ITEM_COUNT
}
fn default_damping() -> f64 {
    StandardPageRank::DEFAULT_DAMPING
}
fn default_max_iterations() -> usize {
    StandardPageRank::DEFAULT_MAX_ITERATIONS
}
fn default_tolerance() -> f64 {
    StandardPageRank::DEFAULT_TOLERANCE
}

impl Default for PipelineSpec {
    fn default() -> Self {
        Self {
            v: SPEC_VERSION,
            data_dir: default_data_dir(),
            ratings_file: default_ratings_file(),
            users_file: default_users_file(),
            output_dir: default_output_dir(),
            format: OutputFormat::default(),
            alphas: default_alphas(),
            item_count: DEFAULT_ITEM_COUNT,
            pagerank: PageRankSpec::default(),
            include_user_id: false,
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl Default for PageRankSpec {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            unknown_fields: HashMap::new(),
        }
    }
}

impl PageRankSpec {
    pub fn to_pagerank(&self) -> StandardPageRank {
        StandardPageRank::new()
            .with_damping(self.damping)
            .with_max_iterations(self.max_iterations)
            .with_tolerance(self.tolerance)
    }
}

impl PipelineSpec {
    /// Parse a spec from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON spec file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_spec() {
        let spec: PipelineSpec = serde_json::from_str(r#"{ "v": 1 }"#).unwrap();
        assert_eq!(spec.v, 1);
        assert_eq!(spec.alphas, DEFAULT_ALPHAS.to_vec());
        assert_eq!(spec.item_count, 1682);
        assert_eq!(spec.ratings_file, "ua.base");
        assert_eq!(spec.format, OutputFormat::Csv);
        assert!(!spec.strict);
        assert!(!spec.include_user_id);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let spec = PipelineSpec::from_json("{}").unwrap();
        assert_eq!(spec.v, SPEC_VERSION);
        assert_eq!(spec.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(spec.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(spec.pagerank.damping, 0.85);
    }

    #[test]
    fn test_deserialize_full_spec() {
        let json = r#"{
            "v": 1,
            "data_dir": "/data/ml",
            "output_dir": "/tmp/out",
            "format": "json",
            "alphas": [0.01, 0.02],
            "item_count": 100,
            "pagerank": { "damping": 0.9, "max_iterations": 50, "tolerance": 1e-8 },
            "include_user_id": true,
            "strict": true
        }"#;
        let spec = PipelineSpec::from_json(json).unwrap();
        assert_eq!(spec.format, OutputFormat::Json);
        assert_eq!(spec.alphas, vec![0.01, 0.02]);
        assert_eq!(spec.item_count, 100);
        assert_eq!(spec.pagerank.max_iterations, 50);
        assert!(spec.include_user_id);
        assert!(spec.strict);

        let pr = spec.pagerank.to_pagerank();
        assert_eq!(pr.damping, 0.9);
        assert_eq!(pr.tolerance, 1e-8);
    }

    #[test]
    fn test_unknown_fields_captured() {
        let json = r#"{
            "v": 1,
            "bogus_top_level": 42,
            "pagerank": { "personalization": "xyz" }
        }"#;
        let spec = PipelineSpec::from_json(json).unwrap();
        assert!(spec.unknown_fields.contains_key("bogus_top_level"));
        assert!(spec.pagerank.unknown_fields.contains_key("personalization"));
    }

    #[test]
    fn test_bad_format_is_an_error() {
        assert!(PipelineSpec::from_json(r#"{ "format": "pickle" }"#).is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let spec = PipelineSpec::default();
        let back = serde_json::to_value(&spec).unwrap();
        assert_eq!(back["format"], "csv");
        assert_eq!(back["item_count"], 1682);
        assert_eq!(back["alphas"].as_array().unwrap().len(), 9);
    }
}
