//! Categorical encoding of the user table.
//!
//! Every nominal attribute becomes a block of 0/1 indicator columns, one per
//! distinct observed value, ordered by the sorted value order (not by
//! frequency). Column names are `<prefix><rank>` with a 1-based rank, so a
//! job column with values `{artist, doctor, writer}` yields `job1`, `job2`,
//! `job3`.
//!
//! Blocks are built from the raw user records by name, so the result does
//! not depend on the order in which attributes are encoded.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::features::table::{Column, FeatureTable};
use crate::types::User;

/// Upper bounds of the right-closed age bins `(0,10], (10,20], ..., (50,100]`.
pub const AGE_BIN_EDGES: [u32; 6] = [10, 20, 30, 40, 50, 100];

pub const AGE_PREFIX: &str = "age";
pub const GENDER_PREFIX: &str = "gender";
pub const JOB_PREFIX: &str = "job";

/// Map an age onto its 1-based bin label, or `None` outside `(0, 100]`.
pub fn age_bin(age: u32) -> Option<u8> {
    if age == 0 {
        return None;
    }
    AGE_BIN_EDGES
        .iter()
        .position(|&upper| age <= upper)
        .map(|idx| idx as u8 + 1)
}

/// One-hot encode `values` into indicator columns named `<prefix><rank>`.
///
/// The number of columns equals the number of distinct values; rank follows
/// the `Ord` order of the values.
pub fn one_hot<K: Ord + Clone>(prefix: &str, values: &[K]) -> Vec<Column> {
    let mut ranks: BTreeMap<K, usize> = values.iter().cloned().map(|v| (v, 0)).collect();
    for (rank, slot) in ranks.values_mut().enumerate() {
        *slot = rank;
    }

    let mut columns: Vec<Column> = (0..ranks.len())
        .map(|rank| Column::new(format!("{prefix}{}", rank + 1), vec![0.0; values.len()]))
        .collect();

    for (row, value) in values.iter().enumerate() {
        let rank = ranks[value];
        columns[rank].values[row] = 1.0;
    }

    columns
}

/// Encoder for the MovieLens user attribute table.
///
/// Output column order is the age block, then gender, then job. Zip codes are
/// dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalEncoder;

impl CategoricalEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode users into a feature table keyed by user id.
    pub fn encode(&self, users: &[User]) -> Result<FeatureTable> {
        let bins = users
            .iter()
            .map(|u| {
                age_bin(u.age).ok_or(Error::AgeOutOfRange {
                    user_id: u.user_id,
                    age: u.age,
                })
            })
            .collect::<Result<Vec<u8>>>()?;
        let genders: Vec<&str> = users.iter().map(|u| u.gender.as_str()).collect();
        let jobs: Vec<&str> = users.iter().map(|u| u.occupation.as_str()).collect();

        let mut table = FeatureTable::new(users.iter().map(|u| u.user_id).collect());
        table.extend_columns(one_hot(AGE_PREFIX, &bins))?;
        table.extend_columns(one_hot(GENDER_PREFIX, &genders))?;
        table.extend_columns(one_hot(JOB_PREFIX, &jobs))?;

        tracing::debug!(
            users = users.len(),
            columns = table.num_columns(),
            "encoded user attributes"
        );

        Ok(table)
    }
}
