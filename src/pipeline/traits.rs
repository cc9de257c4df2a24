//! Stage trait definitions for the pipeline.
//!
//! The runner is generic over where finished tables go. Implementations are
//! statically dispatched; `Box<dyn TableSink>` also works when the sink is
//! picked at runtime.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::features::{output_path, write_table, FeatureTable, OutputFormat};

// ============================================================================
// TableSink: final stage, one call per alpha
// ============================================================================

/// Receives the finished feature table for each alpha.
///
/// # Contract
///
/// - Called once per alpha, in sweep order.
/// - Returns the path written to, if the sink writes files.
pub trait TableSink {
    fn write(&mut self, alpha: f64, table: &FeatureTable) -> Result<Option<PathBuf>>;
}

impl<S: TableSink + ?Sized> TableSink for Box<S> {
    fn write(&mut self, alpha: f64, table: &FeatureTable) -> Result<Option<PathBuf>> {
        (**self).write(alpha, table)
    }
}

/// Writes `x_train_alpha(<alpha>).<ext>` files into one directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    output_dir: PathBuf,
    format: OutputFormat,
    include_user_id: bool,
}

impl FileSink {
    /// Create the sink, creating `output_dir` if it does not exist.
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| Error::io(&output_dir, e))?;
        Ok(Self {
            output_dir,
            format,
            include_user_id: false,
        })
    }

    pub fn with_user_id(mut self, include_user_id: bool) -> Self {
        self.include_user_id = include_user_id;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl TableSink for FileSink {
    fn write(&mut self, alpha: f64, table: &FeatureTable) -> Result<Option<PathBuf>> {
        let path = output_path(&self.output_dir, alpha, self.format);
        write_table(table, &path, self.format, self.include_user_id)?;
        tracing::info!(
            alpha,
            rows = table.num_rows(),
            columns = table.num_columns(),
            path = %path.display(),
            "wrote feature table"
        );
        Ok(Some(path))
    }
}

/// Keeps every table in memory; used by tests and library callers that want
/// the tables rather than files.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub tables: Vec<(f64, FeatureTable)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, alpha: f64) -> Option<&FeatureTable> {
        self.tables
            .iter()
            .find(|(a, _)| *a == alpha)
            .map(|(_, table)| table)
    }
}

impl TableSink for MemorySink {
    fn write(&mut self, alpha: f64, table: &FeatureTable) -> Result<Option<PathBuf>> {
        self.tables.push((alpha, table.clone()));
        Ok(None)
    }
}
