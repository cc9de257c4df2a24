use corate::graph::corating::PairCounts;
use corate::pipeline::graph_stats;
use corate::{Dataset, FeaturePipeline, MemorySink, Metric, NoopObserver, Rating, User};
use proptest::prelude::*;

const USERS: u32 = 8;

fn users() -> Vec<User> {
    (1..=USERS)
        .map(|id| User::new(id, 18 + id * 5, if id % 2 == 0 { "F" } else { "M" }, "student"))
        .collect()
}

/// At most one rating per (user, item), as in MovieLens.
fn ratings() -> impl Strategy<Value = Vec<Rating>> {
    prop::collection::vec((1u32..=USERS, 1u32..6, 1u8..=5), 0..48).prop_map(|triples| {
        let mut seen = std::collections::HashSet::new();
        triples
            .into_iter()
            .filter(|&(user, item, _)| seen.insert((user, item)))
            .map(|(user, item, rating)| Rating::new(user, item, rating))
            .collect()
    })
}

/// Number of items two users rated identically, counted directly.
fn brute_force_count(ratings: &[Rating], a: u32, b: u32) -> u32 {
    let mut items: Vec<u32> = ratings
        .iter()
        .filter(|ra| ra.user_id == a)
        .filter(|ra| {
            ratings
                .iter()
                .any(|rb| rb.user_id == b && rb.item_id == ra.item_id && rb.rating == ra.rating)
        })
        .map(|r| r.item_id)
        .collect();
    items.sort_unstable();
    items.dedup();
    items.len() as u32
}

proptest! {
    #[test]
    fn prop_lower_alpha_never_removes_edges(
        ratings in ratings(),
        a in 1u32..20,
        b in 1u32..20,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let alphas = [lo as f64 * 0.05, hi as f64 * 0.05];
        let dataset = Dataset::new(ratings, users());

        let stats = graph_stats(&dataset, &alphas, 5);
        prop_assert!(stats[0].edges >= stats[1].edges, "{:?}", stats);
        prop_assert!(stats[0].nodes >= stats[1].nodes, "{:?}", stats);
    }

    #[test]
    fn prop_pair_counts_match_brute_force(ratings in ratings()) {
        let counts = PairCounts::from_ratings(&ratings);
        for a in 1..=USERS {
            for b in (a + 1)..=USERS {
                prop_assert_eq!(counts.count(a, b), brute_force_count(&ratings, a, b), "pair ({}, {})", a, b);
            }
        }
    }

    #[test]
    fn prop_metric_columns_are_normalized(ratings in ratings(), alpha in 1u32..6) {
        let dataset = Dataset::new(ratings, users());
        let alpha = alpha as f64 * 0.2;
        let mut pipeline = FeaturePipeline::new(MemorySink::new())
            .with_alphas(vec![alpha])
            .with_item_count(5);
        pipeline.run(&dataset, &mut NoopObserver).unwrap();

        let table = pipeline.sink().get(alpha).unwrap();
        prop_assert_eq!(table.num_rows(), USERS as usize);
        for metric in Metric::ALL {
            let values = &table.column(metric.column()).unwrap().values;
            prop_assert!(values.iter().all(|v| v.is_finite() && (0.0..=1.0).contains(v)));
            let max = values.iter().cloned().fold(0.0, f64::max);
            prop_assert!(max == 0.0 || max == 1.0, "{} max={}", metric, max);
        }
    }
}
