//! Ranking evaluation helpers.
//!
//! Mean average precision at k over per-user recommendation lists, plus the
//! helpers that turn a score matrix into such lists and a seeded random
//! baseline to compare against. None of this runs as part of the feature
//! pipeline.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Average precision at `k` of one ranked list.
///
/// Only the first `k` predictions count, and a repeated prediction scores
/// once. Returns 0 when `actual` is empty.
pub fn apk<T: PartialEq>(actual: &[T], predicted: &[T], k: usize) -> f64 {
    if actual.is_empty() || k == 0 {
        return 0.0;
    }
    let predicted = &predicted[..predicted.len().min(k)];

    let mut score = 0.0;
    let mut hits = 0.0;
    for (i, p) in predicted.iter().enumerate() {
        if actual.contains(p) && !predicted[..i].contains(p) {
            hits += 1.0;
            score += hits / (i as f64 + 1.0);
        }
    }
    score / actual.len().min(k) as f64
}

/// Mean of [`apk`] over paired lists. Returns 0 for no lists.
pub fn mapk<T: PartialEq>(actual: &[Vec<T>], predicted: &[Vec<T>], k: usize) -> f64 {
    let n = actual.len().min(predicted.len());
    if n == 0 {
        return 0.0;
    }
    let total: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| apk(a, p, k))
        .sum();
    total / n as f64
}

/// For each column of `scores` (rows are items, columns are users), the row
/// indices of the `k` highest scores, best first.
///
/// Ties keep the lower row index first. Rows shorter than the first row are
/// treated as missing the trailing columns.
pub fn top_k_per_column(scores: &[Vec<f64>], k: usize) -> Vec<Vec<usize>> {
    let columns = scores.first().map_or(0, Vec::len);
    (0..columns)
        .map(|col| {
            let mut rows: Vec<(usize, f64)> = scores
                .iter()
                .enumerate()
                .filter_map(|(row, values)| values.get(col).map(|&v| (row, v)))
                .collect();
            rows.sort_by(|a, b| b.1.total_cmp(&a.1));
            rows.into_iter().take(k).map(|(row, _)| row).collect()
        })
        .collect()
}

/// `n_users` lists of `k` item indices drawn uniformly from `0..n_items`,
/// reproducible for a given `seed`. Draws may repeat within a list.
pub fn random_baseline(n_users: usize, n_items: usize, k: usize, seed: u64) -> Vec<Vec<usize>> {
    if n_items == 0 {
        return vec![Vec::new(); n_users];
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n_users)
        .map(|_| (0..k).map(|_| rng.gen_range(0..n_items)).collect())
        .collect()
}
