/// Graded pairwise ELO ratings.
///
/// `EloState` is an immutable value: `update_elo` returns a new state and
/// leaves its input alone, so callers can keep old states for undo/redo or
/// speculative previews without any synchronisation.
///
/// Entities are identified by caller-provided string ids.
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use tracing::{debug, trace};

use crate::constants::{
    ADJACENT_PAIR_INITIAL_COUNT, DEFAULT_NEIGHBOURHOOD_WINDOW, ELO_DIVISOR,
    INITIAL_COMPARISONS_IF_MOVED, INITIAL_RATING, K_FACTOR, MIN_K_WEIGHT, SPREAD_FACTOR,
};
use crate::types::{ComparisonRecord, Preference, RankedItem};

/// Canonical unordered pair: `(a, b)` and `(b, a)` map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey(String, String);

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            PairKey(a.to_string(), b.to_string())
        } else {
            PairKey(b.to_string(), a.to_string())
        }
    }

    pub fn ids(&self) -> (&str, &str) {
        (&self.0, &self.1)
    }
}

/// Ratings, counters and answer history for one refinement run.
///
/// Every id in `ratings` is also in `comparisons`. `history` is append-only and
/// is the only source of the number of real comparisons made; `comparisons`
/// and `pair_counts` may include virtual head starts from seeding.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EloState {
    ratings: BTreeMap<String, f64>,
    comparisons: BTreeMap<String, u32>,
    #[cfg_attr(feature = "serde", serde(with = "pair_counts_serde"))]
    pair_counts: BTreeMap<PairKey, u32>,
    history: Vec<ComparisonRecord>,
}

/// One row of the rating-ordered leaderboard.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingEntry {
    pub id: String,
    pub label: String,
    /// Rounded to the nearest integer, for display.
    pub rating: i64,
    /// 1-based.
    pub rank: usize,
}

impl EloState {
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ratings.contains_key(id)
    }

    pub fn rating(&self, id: &str) -> Option<f64> {
        self.ratings.get(id).copied()
    }

    pub fn ratings(&self) -> &BTreeMap<String, f64> {
        &self.ratings
    }

    /// Comparisons credited to `id`, including seeded head starts.
    pub fn comparisons(&self, id: &str) -> u32 {
        self.comparisons.get(id).copied().unwrap_or(0)
    }

    pub fn pair_count(&self, a: &str, b: &str) -> u32 {
        self.pair_counts.get(&PairKey::new(a, b)).copied().unwrap_or(0)
    }

    pub fn history(&self) -> &[ComparisonRecord] {
        &self.history
    }

    /// Real comparisons answered so far.
    pub fn total_comparisons(&self) -> usize {
        self.history.len()
    }

    /// `(id, rating)` sorted by rating descending, ties broken by id ascending.
    pub fn sorted_by_rating(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> =
            self.ratings.iter().map(|(id, &r)| (id.as_str(), r)).collect();
        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }

    /// Entities ordered best-first. Ids double as labels.
    pub fn to_ranked_list(&self) -> Vec<RankedItem> {
        self.sorted_by_rating()
            .into_iter()
            .map(|(id, _)| RankedItem::from_label(id))
            .collect()
    }

    pub fn ranking_entries(&self) -> Vec<RankingEntry> {
        self.sorted_by_rating()
            .into_iter()
            .enumerate()
            .map(|(i, (id, rating))| RankingEntry {
                id: id.to_string(),
                label: id.to_string(),
                rating: rating.round() as i64,
                rank: i + 1,
            })
            .collect()
    }

    /// 1-based rank of every entity.
    pub fn ranks(&self) -> BTreeMap<String, usize> {
        self.sorted_by_rating()
            .into_iter()
            .enumerate()
            .map(|(i, (id, _))| (id.to_string(), i + 1))
            .collect()
    }

    /// A `window`-sized slice of the leaderboard centred between `a` and `b`.
    ///
    /// Falls back to the top of the leaderboard if either id is unknown.
    pub fn neighbourhood(&self, a: &str, b: &str, window: usize) -> Vec<RankingEntry> {
        let sorted = self.ranking_entries();
        let idx_a = sorted.iter().position(|e| e.id == a);
        let idx_b = sorted.iter().position(|e| e.id == b);

        let (Some(idx_a), Some(idx_b)) = (idx_a, idx_b) else {
            return sorted.into_iter().take(window).collect();
        };

        let midpoint = (idx_a + idx_b) / 2;
        let half_window = window / 2;
        let start = midpoint
            .saturating_sub(half_window)
            .min(sorted.len().saturating_sub(window));
        let end = (start + window).min(sorted.len());

        sorted[start..end].to_vec()
    }

    /// The neighbourhood around a single entity.
    pub fn focused_neighbourhood(&self, id: &str, window: usize) -> Vec<RankingEntry> {
        self.neighbourhood(id, id, window)
    }

    /// `focused_neighbourhood` with the default window of 7.
    pub fn default_neighbourhood(&self, id: &str) -> Vec<RankingEntry> {
        self.focused_neighbourhood(id, DEFAULT_NEIGHBOURHOOD_WINDOW)
    }
}

/// Tunable constants of the rating model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EloConfig {
    pub initial_rating: f64,
    pub k_factor: f64,
    pub elo_divisor: f64,
    /// Rating gap between neighbours in a rank-derived seed.
    pub spread_factor: f64,
    pub moved_comparison_head_start: u32,
    pub adjacent_pair_head_start: u32,
    pub min_k_weight: f64,
}

impl Default for EloConfig {
    fn default() -> Self {
        EloConfig {
            initial_rating: INITIAL_RATING,
            k_factor: K_FACTOR,
            elo_divisor: ELO_DIVISOR,
            spread_factor: SPREAD_FACTOR,
            moved_comparison_head_start: INITIAL_COMPARISONS_IF_MOVED,
            adjacent_pair_head_start: ADJACENT_PAIR_INITIAL_COUNT,
            min_k_weight: MIN_K_WEIGHT,
        }
    }
}

impl EloConfig {
    /// Flat start: everyone at the initial rating, no history.
    pub fn init<S: AsRef<str>>(&self, ids: &[S]) -> EloState {
        let mut state = EloState::default();
        for id in ids {
            let id = id.as_ref();
            let prev = state.ratings.insert(id.to_string(), self.initial_rating);
            assert!(prev.is_none(), "Duplicate entity ID: {}", id);
            state.comparisons.insert(id.to_string(), 0);
        }
        state
    }

    /// Seed from a manual ranking so the refinement starts from the user's order.
    ///
    /// Position `i` of `n` is rated `initial + (n/2 - i) * spread`. Entities in
    /// `moved` get a comparison head start, and each adjacent pair of moved
    /// entities gets a pair-count head start.
    pub fn seed_from_ranking(&self, items: &[RankedItem], moved: &HashSet<String>) -> EloState {
        let n = items.len();
        let mut state = EloState::default();

        for (i, item) in items.iter().enumerate() {
            let rating = self.initial_rating + (n as f64 / 2.0 - i as f64) * self.spread_factor;
            let prev = state.ratings.insert(item.id.clone(), rating);
            assert!(prev.is_none(), "Duplicate entity ID: {}", item.id);

            let head_start = if moved.contains(&item.id) { self.moved_comparison_head_start } else { 0 };
            state.comparisons.insert(item.id.clone(), head_start);
        }

        for window in items.windows(2) {
            let (a, b) = (&window[0].id, &window[1].id);
            if moved.contains(a) && moved.contains(b) {
                *state.pair_counts.entry(PairKey::new(a, b)).or_insert(0) += self.adjacent_pair_head_start;
            }
        }

        debug!(entities = n, moved = moved.len(), "seeded ratings from manual ranking");
        state
    }

    /// P(a is preferred over b) under the logistic model.
    pub fn expected_score(&self, rating_a: f64, rating_b: f64) -> f64 {
        1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / self.elo_divisor))
    }

    /// K scaled by answer strength; a draw still moves ratings a little.
    pub fn k_for(&self, preference: Preference) -> f64 {
        self.k_factor * preference.weight().abs().max(self.min_k_weight) / 2.0
    }

    /// Apply one graded comparison, returning a new state.
    ///
    /// Panics if either id is unknown or if `a == b`.
    pub fn update(&self, state: &EloState, a: &str, b: &str, preference: Preference) -> EloState {
        assert!(a != b, "Cannot compare entity {} with itself", a);
        let rating_a = state
            .rating(a)
            .unwrap_or_else(|| panic!("Unknown entity ID: {}", a));
        let rating_b = state
            .rating(b)
            .unwrap_or_else(|| panic!("Unknown entity ID: {}", b));

        let expected_a = self.expected_score(rating_a, rating_b);
        let expected_b = 1.0 - expected_a;

        let actual_a = 0.5 - preference.weight() * 0.25;
        let actual_b = 1.0 - actual_a;

        let k = self.k_for(preference);
        let new_a = rating_a + k * (actual_a - expected_a);
        let new_b = rating_b + k * (actual_b - expected_b);

        let mut next = state.clone();
        next.ratings.insert(a.to_string(), new_a);
        next.ratings.insert(b.to_string(), new_b);
        *next.comparisons.entry(a.to_string()).or_insert(0) += 1;
        *next.comparisons.entry(b.to_string()).or_insert(0) += 1;
        *next.pair_counts.entry(PairKey::new(a, b)).or_insert(0) += 1;
        next.history.push(ComparisonRecord {
            a: a.to_string(),
            b: b.to_string(),
            weight: preference,
        });

        trace!(a, b, weight = preference.value(), new_a, new_b, "elo update");
        next
    }
}

/// Flat start with the default config.
pub fn init_elo<S: AsRef<str>>(ids: &[S]) -> EloState {
    EloConfig::default().init(ids)
}

/// Rank-derived seed with the default config.
pub fn init_elo_from_ranking(items: &[RankedItem], moved: &HashSet<String>) -> EloState {
    EloConfig::default().seed_from_ranking(items, moved)
}

/// One comparison with the default config.
pub fn update_elo(state: &EloState, a: &str, b: &str, preference: Preference) -> EloState {
    EloConfig::default().update(state, a, b, preference)
}

/// Entities ordered best-first.
pub fn to_ranked_list(state: &EloState) -> Vec<RankedItem> {
    state.to_ranked_list()
}

#[cfg(feature = "serde")]
mod pair_counts_serde {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::PairKey;

    pub fn serialize<S: Serializer>(map: &BTreeMap<PairKey, u32>, s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(map.iter().map(|(key, &count)| (&key.0, &key.1, count)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<PairKey, u32>, D::Error> {
        let entries: Vec<(String, String, u32)> = Vec::deserialize(d)?;
        let mut map = BTreeMap::new();
        for (a, b, count) in entries {
            *map.entry(PairKey::new(&a, &b)).or_insert(0) += count;
        }
        Ok(map)
    }
}
