//! Core record types shared across the pipeline.

use serde::{Deserialize, Serialize};

/// User identifier as it appears in the dataset.
pub type UserId = u32;

/// Item (movie) identifier as it appears in the dataset.
pub type ItemId = u32;

/// One observed rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub rating: u8,
    pub timestamp: u64,
}

impl Rating {
    pub fn new(user_id: UserId, item_id: ItemId, rating: u8) -> Self {
        Self {
            user_id,
            item_id,
            rating,
            timestamp: 0,
        }
    }
}

/// One user attribute row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub age: u32,
    pub gender: String,
    pub occupation: String,
    pub zip: String,
}

impl User {
    pub fn new(
        user_id: UserId,
        age: u32,
        gender: impl Into<String>,
        occupation: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            age,
            gender: gender.into(),
            occupation: occupation.into(),
            zip: String::new(),
        }
    }
}
