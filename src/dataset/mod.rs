//! Dataset loading and categorical encoding
//!
//! This module reads the MovieLens-style ratings and user files and turns the
//! user attributes into one-hot feature columns.

pub mod encoder;
pub mod loader;

use std::path::Path;

use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::types::{Rating, User};

pub const DEFAULT_RATINGS_FILE: &str = "ua.base";
pub const DEFAULT_USERS_FILE: &str = "u.user";

/// Ratings plus user attributes, as loaded from disk.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub ratings: Vec<Rating>,
    pub users: Vec<User>,
}

impl Dataset {
    pub fn new(ratings: Vec<Rating>, users: Vec<User>) -> Self {
        Self { ratings, users }
    }

    /// Load `ratings_file` and `users_file` from `dir`.
    pub fn load(dir: &Path, ratings_file: &str, users_file: &str) -> Result<Self> {
        let ratings = loader::load_ratings(&dir.join(ratings_file))?;
        let users = loader::load_users(&dir.join(users_file))?;
        tracing::info!(
            ratings = ratings.len(),
            users = users.len(),
            dir = %dir.display(),
            "loaded dataset"
        );
        Ok(Self { ratings, users })
    }

    /// Number of distinct items that received at least one rating.
    pub fn distinct_items(&self) -> usize {
        self.ratings
            .iter()
            .map(|r| r.item_id)
            .collect::<FxHashSet<_>>()
            .len()
    }
}
