/// Matchup selection for pairwise refinement.
///
/// Candidates are every adjacent pair in rating order plus a handful of
/// uniformly random pairs. Each is scored for how much a comparison would
/// teach us, and the best one is presented in random left/right order.
use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::constants::{
    MATCHUP_CLOSENESS_DIVISOR, MATCHUP_FLIP_PROBABILITY, MATCHUP_RANDOM_CANDIDATES,
    UNMOVED_BOTH_BOOST, UNMOVED_ONE_BOOST,
};
use crate::elo::EloState;
use crate::types::Pair;

/// Tunable constants of matchup selection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchupConfig {
    pub random_candidates: usize,
    pub closeness_divisor: f64,
    pub both_unmoved_boost: f64,
    pub one_unmoved_boost: f64,
    pub flip_probability: f64,
}

impl Default for MatchupConfig {
    fn default() -> Self {
        MatchupConfig {
            random_candidates: MATCHUP_RANDOM_CANDIDATES,
            closeness_divisor: MATCHUP_CLOSENESS_DIVISOR,
            both_unmoved_boost: UNMOVED_BOTH_BOOST,
            one_unmoved_boost: UNMOVED_ONE_BOOST,
            flip_probability: MATCHUP_FLIP_PROBABILITY,
        }
    }
}

/// Informativeness of comparing two entities.
///
/// First term favours pairs compared less often, second favours close ratings.
pub fn calculate_matchup_score(pair_count: u32, rating_a: f64, rating_b: f64, closeness_divisor: f64) -> f64 {
    1.0 / (f64::from(pair_count) + 1.0) + 1.0 / (1.0 + (rating_a - rating_b).abs() / closeness_divisor)
}

/// Multiplier favouring entities the user never placed by hand.
fn unmoved_boost(a: &str, b: &str, moved: &HashSet<String>, config: &MatchupConfig) -> f64 {
    match (moved.contains(a), moved.contains(b)) {
        (false, false) => config.both_unmoved_boost,
        (true, true) => 1.0,
        _ => config.one_unmoved_boost,
    }
}

/// Pick the next pair to compare, using the thread RNG and default tuning.
///
/// Panics if the state holds fewer than two entities.
pub fn select_next_matchup(state: &EloState, moved: Option<&HashSet<String>>) -> Pair {
    let mut rng = rand::rng();
    select_next_matchup_with(state, moved, &MatchupConfig::default(), &mut rng)
}

/// Pick the next pair to compare with an explicit config and RNG.
///
/// `moved` is the set of entities the user positioned manually; when given,
/// pairs of untouched entities are boosted.
pub fn select_next_matchup_with(
    state: &EloState,
    moved: Option<&HashSet<String>>,
    config: &MatchupConfig,
    rng: &mut impl Rng,
) -> Pair {
    let sorted = state.sorted_by_rating();
    let n = sorted.len();
    assert!(n >= 2, "Matchup selection requires at least two entities, got {}", n);

    let mut candidates: Vec<(usize, usize)> = Vec::with_capacity(n - 1 + config.random_candidates);
    candidates.extend((0..n - 1).map(|i| (i, i + 1)));

    for _ in 0..config.random_candidates {
        let i = rng.random_range(0..n);
        let mut j = rng.random_range(0..n - 1);
        if j >= i {
            j += 1;
        }
        candidates.push((i, j));
    }

    let mut best_score = f64::NEG_INFINITY;
    let mut best = (0, 1);

    for &(i, j) in &candidates {
        let (a, rating_a) = sorted[i];
        let (b, rating_b) = sorted[j];

        let mut score = calculate_matchup_score(
            state.pair_count(a, b),
            rating_a,
            rating_b,
            config.closeness_divisor,
        );
        if let Some(moved) = moved {
            score *= unmoved_boost(a, b, moved, config);
        }

        if score > best_score {
            best_score = score;
            best = (i, j);
        }
    }

    let (mut left, mut right) = (sorted[best.0].0, sorted[best.1].0);
    if rng.random::<f64>() < config.flip_probability {
        std::mem::swap(&mut left, &mut right);
    }

    debug!(left, right, score = best_score, candidates = candidates.len(), "selected matchup");

    (left.to_string(), right.to_string())
}
