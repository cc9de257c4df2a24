//! Name-keyed, column-major feature table.
//!
//! Rows follow the user table order; columns keep their insertion order.
//! Pushing a column whose name already exists replaces it in place.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::UserId;

/// One named numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Largest value in the column (0.0 for an empty column).
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Per-user feature table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    user_ids: Vec<UserId>,
    columns: Vec<Column>,
}

impl FeatureTable {
    /// Create an empty table with one row per user id.
    pub fn new(user_ids: Vec<UserId>) -> Self {
        Self {
            user_ids,
            columns: Vec::new(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.user_ids.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Append a column, or replace the column with the same name.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if column.values.len() != self.num_rows() {
            return Err(Error::ColumnLength {
                column: column.name,
                expected: self.num_rows(),
                found: column.values.len(),
            });
        }
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Append several columns in order.
    pub fn extend_columns(&mut self, columns: impl IntoIterator<Item = Column>) -> Result<()> {
        for column in columns {
            self.push_column(column)?;
        }
        Ok(())
    }

    /// Values of row `idx` in column order.
    pub fn row(&self, idx: usize) -> impl Iterator<Item = f64> + '_ {
        self.columns.iter().map(move |c| c.values[idx])
    }
}

/// Divide every value by the column maximum.
///
/// When the maximum is not positive the column becomes all zeros, so a
/// metric that is 0 everywhere (e.g. an empty graph) stays 0 instead of NaN.
pub fn scale_by_max(values: &mut [f64]) {
    let max = values.iter().copied().fold(0.0, f64::max);
    if max > 0.0 && max.is_finite() {
        for v in values.iter_mut() {
            *v /= max;
        }
    } else {
        values.fill(0.0);
    }
}
