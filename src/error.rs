//! Error types for the feature pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, encoding, or writing feature tables.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error on a specific file.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reader/writer error.
    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row could not be parsed.
    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Age outside the binned `(0, 100]` range.
    #[error("user {user_id}: age {age} is outside the binned range (0, 100]")]
    AgeOutOfRange { user_id: u32, age: u32 },

    /// Column length does not match the table's row count.
    #[error("column {column}: expected {expected} rows, found {found}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
