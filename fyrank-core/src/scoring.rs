/// Composite scoring of programmes against three ranked preference lists.
///
/// Pure functions: plain data in, plain data out. Manual adjustments made
/// afterwards live in `ScoredItem::score_adjustment` and never touch `score`.
use std::cmp::Ordering;

use tracing::debug;

use crate::constants::{MIN_NUDGE, NUDGE_EPSILON, NUDGE_STDDEV_DIVISOR};
use crate::normalize::RankMap;
use crate::stats::population_std_dev;
use crate::types::{Job, RankedItem, ScoredItem, Weights};

/// The three user-ordered lists a score is computed against.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedPreferences {
    pub regions: Vec<RankedItem>,
    /// Global hospital order across all regions.
    pub hospitals: Vec<RankedItem>,
    pub specialties: Vec<RankedItem>,
}

/// Options for `score_jobs()`.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringOptions {
    pub weights: Weights,
    /// Drop region from the weighted sum and sort by region rank first.
    pub lock_regions: bool,
}

/// Score every job and return them in display order.
///
/// Unlocked: score descending. Locked: region rank ascending, then score
/// descending, so region order is never perturbed by score.
pub fn score_jobs(
    jobs: &[Job],
    preferences: &RankedPreferences,
    options: &ScoringOptions,
) -> Vec<ScoredItem> {
    let region_ranks = RankMap::from_items(&preferences.regions);
    let hospital_ranks = RankMap::from_items(&preferences.hospitals);
    let specialty_ranks = RankMap::from_items(&preferences.specialties);
    let w = &options.weights;

    let mut scored: Vec<(usize, ScoredItem)> = jobs
        .iter()
        .map(|job| {
            let region_rank = region_ranks.rank_of(&job.region);
            let region_score = region_ranks.normalized(&job.region);

            let mut hosp_sum = 0.0;
            let mut hosp_count = 0usize;
            let mut spec_sum = 0.0;
            let mut spec_count = 0usize;

            for placement in job.scored_placements() {
                if placement.has_site() {
                    hosp_sum += hospital_ranks.normalized(&placement.site);
                    hosp_count += 1;
                }
                if placement.has_specialty() {
                    spec_sum += specialty_ranks.normalized(&placement.specialty);
                    spec_count += 1;
                }
            }

            let hospital_score = if hosp_count > 0 { hosp_sum / hosp_count as f64 } else { 0.0 };
            let specialty_score = if spec_count > 0 { spec_sum / spec_count as f64 } else { 0.0 };

            let mut score = w.hospital * hospital_score + w.specialty * specialty_score;
            if !options.lock_regions {
                score += w.region * region_score;
            }

            let item = ScoredItem {
                item: job.clone(),
                score,
                score_adjustment: 0.0,
                region_score,
                hospital_score,
                specialty_score,
            };
            (region_rank, item)
        })
        .collect();

    if options.lock_regions {
        scored.sort_by(|(ra, a), (rb, b)| ra.cmp(rb).then_with(|| b.score.total_cmp(&a.score)));
    } else {
        scored.sort_by(|(_, a), (_, b)| b.score.total_cmp(&a.score));
    }

    debug!(
        jobs = jobs.len(),
        lock_regions = options.lock_regions,
        "scored programmes"
    );

    scored.into_iter().map(|(_, item)| item).collect()
}

/// Stable sort by effective score, highest first.
pub fn sort_by_effective_score(items: &[ScoredItem]) -> Vec<ScoredItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        b.effective_score()
            .partial_cmp(&a.effective_score())
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

/// Stable sort for a list scored with `lock_regions`: region rank first, then
/// effective score, highest first.
///
/// `region_score` is the normalised region rank, so a higher value is a
/// better region and equal values share a rank.
pub fn sort_by_region_then_effective_score(items: &[ScoredItem]) -> Vec<ScoredItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        b.region_score
            .total_cmp(&a.region_score)
            .then_with(|| b.effective_score().total_cmp(&a.effective_score()))
    });
    sorted
}

/// Put an adjusted list back into display order.
pub fn sort_for_display(items: &[ScoredItem], lock_regions: bool) -> Vec<ScoredItem> {
    if lock_regions {
        sort_by_region_then_effective_score(items)
    } else {
        sort_by_effective_score(items)
    }
}

/// Tuning for `compute_nudge_amount_with()`.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NudgeConfig {
    /// Returned when there are fewer than two items.
    pub epsilon: f64,
    pub stddev_divisor: f64,
    pub min_nudge: f64,
}

impl Default for NudgeConfig {
    fn default() -> Self {
        NudgeConfig {
            epsilon: NUDGE_EPSILON,
            stddev_divisor: NUDGE_STDDEV_DIVISOR,
            min_nudge: MIN_NUDGE,
        }
    }
}

/// Size of one boost/bury step, scaled to the spread of effective scores.
pub fn compute_nudge_amount(items: &[ScoredItem]) -> f64 {
    compute_nudge_amount_with(items, &NudgeConfig::default())
}

pub fn compute_nudge_amount_with(items: &[ScoredItem], config: &NudgeConfig) -> f64 {
    if items.len() <= 1 {
        return config.epsilon;
    }
    let scores: Vec<f64> = items.iter().map(ScoredItem::effective_score).collect();
    (population_std_dev(&scores) / config.stddev_divisor).max(config.min_nudge)
}
