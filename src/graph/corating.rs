//! Co-rating pair counts.
//!
//! Two users co-rate an item when they gave it the identical rating. The
//! count for an unordered pair `(a, b)` is the number of `(item, rating)`
//! groups both users belong to, i.e. the number of items they rated
//! identically.
//!
//! Counts do not depend on alpha, so they are computed once and thresholded
//! per alpha with [`PairCounts::pairs_at_least`].

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::types::{ItemId, Rating, UserId};

/// Unordered user pair, stored with the smaller id first.
pub type UserPair = (UserId, UserId);

/// Canonical (smaller, larger) form of a pair.
#[inline]
pub fn canonical_pair(a: UserId, b: UserId) -> UserPair {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Minimum co-rating count an edge needs: `alpha * item_count`.
#[inline]
pub fn edge_threshold(alpha: f64, item_count: usize) -> f64 {
    alpha * item_count as f64
}

/// Pair → number of identically rated items.
#[derive(Debug, Clone, Default)]
pub struct PairCounts {
    counts: FxHashMap<UserPair, u32>,
}

impl PairCounts {
    /// Count co-rating pairs over all `(item, rating)` groups.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let groups = group_by_item_rating(ratings);

        #[cfg(feature = "parallel")]
        let counts = groups
            .par_iter()
            .fold(FxHashMap::default, |mut acc, users| {
                count_group_pairs(&mut acc, users);
                acc
            })
            .reduce(FxHashMap::default, merge_counts);

        #[cfg(not(feature = "parallel"))]
        let counts = {
            let mut acc = FxHashMap::default();
            for users in &groups {
                count_group_pairs(&mut acc, users);
            }
            acc
        };

        tracing::debug!(
            groups = groups.len(),
            pairs = counts.len(),
            "counted co-rating pairs"
        );

        Self { counts }
    }

    /// Co-rating count for a pair, in either order.
    pub fn count(&self, a: UserId, b: UserId) -> u32 {
        self.counts
            .get(&canonical_pair(a, b))
            .copied()
            .unwrap_or(0)
    }

    /// Number of pairs with a non-zero count.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(pair, count)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (UserPair, u32)> + '_ {
        self.counts.iter().map(|(&pair, &count)| (pair, count))
    }

    /// Pairs whose count meets `threshold`, sorted for deterministic output.
    pub fn pairs_at_least(&self, threshold: f64) -> Vec<UserPair> {
        let mut pairs: Vec<UserPair> = self
            .counts
            .iter()
            .filter(|(_, &count)| f64::from(count) >= threshold)
            .map(|(&pair, _)| pair)
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

/// Users per `(item, rating)` group, sorted and de-duplicated.
fn group_by_item_rating(ratings: &[Rating]) -> Vec<Vec<UserId>> {
    let mut groups: FxHashMap<(ItemId, u8), Vec<UserId>> = FxHashMap::default();
    for r in ratings {
        groups.entry((r.item_id, r.rating)).or_default().push(r.user_id);
    }

    groups
        .into_values()
        .map(|mut users| {
            users.sort_unstable();
            users.dedup();
            users
        })
        .filter(|users| users.len() > 1)
        .collect()
}

fn count_group_pairs(acc: &mut FxHashMap<UserPair, u32>, users: &[UserId]) {
    for (i, &a) in users.iter().enumerate() {
        for &b in &users[i + 1..] {
            *acc.entry((a, b)).or_insert(0) += 1;
        }
    }
}

#[cfg(feature = "parallel")]
fn merge_counts(
    mut a: FxHashMap<UserPair, u32>,
    b: FxHashMap<UserPair, u32>,
) -> FxHashMap<UserPair, u32> {
    if a.len() < b.len() {
        return merge_counts(b, a);
    }
    for (pair, count) in b {
        *a.entry(pair).or_insert(0) += count;
    }
    a
}
