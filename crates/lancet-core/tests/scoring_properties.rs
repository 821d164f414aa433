//! Property tests for scoring invariants.

use lancet_core::models::SeverityCounts;
use lancet_core::scoring;
use proptest::prelude::*;

proptest! {
    /// Any positive weight mix normalizes to a unit sum.
    #[test]
    fn normalized_weights_sum_to_one(weights in proptest::collection::vec(0.001f64..100.0, 1..8)) {
        let normalized = scoring::normalize_weights(&weights);
        let sum: f64 = normalized.iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9);
        prop_assert!(normalized.iter().all(|w| *w >= 0.0));
    }

    /// Safety score stays inside [0, 1] for any severity distribution.
    #[test]
    fn safety_score_bounded(
        critical in 0usize..50,
        high in 0usize..50,
        medium in 0usize..50,
        low in 0usize..50,
    ) {
        let counts = SeverityCounts { critical, high, medium, low };
        let score = scoring::safety_score(&counts);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    /// Adding a critical entry strictly lowers the safety score while any
    /// headroom remains, and never raises it.
    #[test]
    fn safety_score_decreases_with_criticals(
        critical in 0usize..20,
        high in 0usize..20,
        medium in 0usize..20,
        low in 0usize..20,
    ) {
        let counts = SeverityCounts { critical, high, medium, low };
        let more_critical = SeverityCounts { critical: critical + 1, ..counts };
        let before = scoring::safety_score(&counts);
        let after = scoring::safety_score(&more_critical);
        prop_assert!(after <= before);
        if before > 0.0 {
            prop_assert!(after < before);
        }
    }

    /// Boost is monotone in hit count and never exceeds the cap.
    #[test]
    fn hit_count_boost_bounded(hits in 0usize..100, per_hit in 0.0f64..0.5, cap in 1.0f64..2.0) {
        let boost = scoring::hit_count_boost(hits, per_hit, cap);
        prop_assert!(boost >= 1.0f64.min(cap));
        prop_assert!(boost <= cap);
        let next = scoring::hit_count_boost(hits + 1, per_hit, cap);
        prop_assert!(next >= boost);
    }

    /// The valid-score mean ignores sentinel entries entirely.
    #[test]
    fn mean_ignores_sentinels(scores in proptest::collection::vec(0.0f64..1.0, 1..10)) {
        let mut with_sentinels = scores.clone();
        with_sentinels.push(lancet_core::constants::VALID_SCORE_FLOOR);
        with_sentinels.push(lancet_core::constants::VALID_SCORE_FLOOR * 2.0);
        let a = scoring::mean_valid_scores(&scores);
        let b = scoring::mean_valid_scores(&with_sentinels);
        prop_assert!((a - b).abs() < 1e-9);
    }
}
