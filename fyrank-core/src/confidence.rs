/// "How done is the refinement?" as a single number in [0, 1].
use crate::constants::{
    CONFIDENCE_BASE_FACTOR, CONFIDENCE_COMP_WEIGHT, CONFIDENCE_SPREAD_TARGET,
    CONFIDENCE_SPREAD_WEIGHT, CONFIDENCE_TARGET_MULTIPLIER,
};
use crate::elo::EloState;
use crate::stats::population_std_dev;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceConfig {
    /// Confidence granted when every entity was placed by hand.
    pub base_factor: f64,
    pub comparison_weight: f64,
    pub spread_weight: f64,
    /// Damping on the n·log2(n) comparison target.
    pub target_multiplier: f64,
    /// Rating standard deviation that counts as fully spread.
    pub spread_target: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        ConfidenceConfig {
            base_factor: CONFIDENCE_BASE_FACTOR,
            comparison_weight: CONFIDENCE_COMP_WEIGHT,
            spread_weight: CONFIDENCE_SPREAD_WEIGHT,
            target_multiplier: CONFIDENCE_TARGET_MULTIPLIER,
            spread_target: CONFIDENCE_SPREAD_TARGET,
        }
    }
}

/// Confidence with the default tuning.
///
/// `moved_count` is how many entities the user placed by hand before the
/// pairwise phase, if there was a manual phase at all.
pub fn get_confidence(state: &EloState, moved_count: Option<usize>) -> f64 {
    get_confidence_with(state, moved_count, &ConfidenceConfig::default())
}

pub fn get_confidence_with(state: &EloState, moved_count: Option<usize>, config: &ConfidenceConfig) -> f64 {
    let n = state.len();
    if n <= 1 {
        return 1.0;
    }
    let n_f = n as f64;

    let base = moved_count.map_or(0.0, |moved| moved as f64 / n_f * config.base_factor);

    let target = n_f * n_f.log2() * config.target_multiplier;
    let comparison_ratio = (state.total_comparisons() as f64 / target).min(1.0);

    let ratings: Vec<f64> = state.ratings().values().copied().collect();
    let spread_ratio = (population_std_dev(&ratings) / config.spread_target).min(1.0);

    let elo_confidence = config.comparison_weight * comparison_ratio + config.spread_weight * spread_ratio;

    (base + (1.0 - base) * elo_confidence).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elo::{init_elo, init_elo_from_ranking, update_elo};
    use crate::types::{Preference, RankedItem};
    use std::collections::HashSet;

    #[test]
    fn test_trivial_pools_are_done() {
        assert_eq!(get_confidence(&init_elo::<&str>(&[]), None), 1.0);
        assert_eq!(get_confidence(&init_elo(&["solo"]), Some(0)), 1.0);
    }

    #[test]
    fn test_fresh_flat_state_is_zero() {
        let state = init_elo(&["a", "b", "c", "d"]);
        assert_eq!(get_confidence(&state, None), 0.0);
    }

    #[test]
    fn test_manual_placement_grants_base() {
        let state = init_elo(&["a", "b", "c", "d"]);
        assert!((get_confidence(&state, Some(4)) - 0.5).abs() < 1e-12);
        assert!((get_confidence(&state, Some(2)) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_comparison_ratio_component() {
        // n = 2: target = 2 * 1 * 0.6 = 1.2 comparisons.
        let state = init_elo(&["a", "b"]);
        let once = update_elo(&state, "a", "b", Preference::Equal);
        // Draw between equals keeps spread at zero.
        let expected = 0.7 * (1.0 / 1.2);
        assert!((get_confidence(&once, None) - expected).abs() < 1e-12);

        let twice = update_elo(&once, "a", "b", Preference::Equal);
        assert!((get_confidence(&twice, None) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_spread_component() {
        let items: Vec<RankedItem> = ["a", "b"].into_iter().map(RankedItem::from_label).collect();
        // Seed spread of 10 → ratings 1510/1500 → stddev 5.
        let state = init_elo_from_ranking(&items, &HashSet::new());
        let expected = 0.3 * (5.0 / 200.0);
        assert!((get_confidence(&state, None) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_never_exceeds_one() {
        let mut state = init_elo(&["a", "b", "c"]);
        for _ in 0..50 {
            state = update_elo(&state, "a", "c", Preference::StrongA);
            state = update_elo(&state, "b", "c", Preference::StrongA);
        }
        let c = get_confidence(&state, Some(3));
        assert!(c <= 1.0);
        assert!(c > 0.9);
    }
}
