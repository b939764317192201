/// Placements carried by a single programme. Anything beyond this is ignored by scoring.
pub const PLACEMENTS_PER_JOB: usize = 6;

/// Site/specialty placeholder used by the source data for an empty slot.
pub const NONE_SENTINEL: &str = "None";

/// Default weight per dimension when the user has not touched the sliders.
pub const DEFAULT_DIMENSION_WEIGHT: f64 = 0.33;

// ---------------------------------------------------------------------------
// ELO
// ---------------------------------------------------------------------------

/// Rating every entity starts at, and the centre of a rank-derived seed.
pub const INITIAL_RATING: f64 = 1500.0;

/// Maximum rating swing for a strong preference.
pub const K_FACTOR: f64 = 32.0;

/// Logistic scale: a 400-point gap means ~10:1 expected odds.
pub const ELO_DIVISOR: f64 = 400.0;

/// Rating gap between neighbours when seeding from a manual ranking.
pub const SPREAD_FACTOR: f64 = 10.0;

/// Virtual comparisons credited to an entity the user dragged into place.
pub const INITIAL_COMPARISONS_IF_MOVED: u32 = 3;

/// Virtual pair count between two adjacent dragged entities.
pub const ADJACENT_PAIR_INITIAL_COUNT: u32 = 2;

/// Floor on |weight| when scaling K, so a stated draw still moves ratings.
pub const MIN_K_WEIGHT: f64 = 0.5;

// ---------------------------------------------------------------------------
// Matchup selection
// ---------------------------------------------------------------------------

/// Uniformly random candidate pairs added on top of the adjacent pairs.
pub const MATCHUP_RANDOM_CANDIDATES: usize = 30;

/// Rating gap that halves the closeness term of a matchup score.
pub const MATCHUP_CLOSENESS_DIVISOR: f64 = 100.0;

/// Probability of presenting the chosen pair swapped.
pub const MATCHUP_FLIP_PROBABILITY: f64 = 0.5;

/// Score multiplier when neither entity was moved by hand.
pub const UNMOVED_BOTH_BOOST: f64 = 3.0;

/// Score multiplier when exactly one entity was moved by hand.
pub const UNMOVED_ONE_BOOST: f64 = 2.0;

/// Entries shown around a matchup in the neighbourhood view.
pub const DEFAULT_NEIGHBOURHOOD_WINDOW: usize = 7;

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// Share of the confidence budget granted by manual placement alone.
pub const CONFIDENCE_BASE_FACTOR: f64 = 0.5;
pub const CONFIDENCE_COMP_WEIGHT: f64 = 0.7;
pub const CONFIDENCE_SPREAD_WEIGHT: f64 = 0.3;

/// Damping on the n·log2(n) comparison target.
pub const CONFIDENCE_TARGET_MULTIPLIER: f64 = 0.6;

/// Rating standard deviation treated as "fully differentiated".
pub const CONFIDENCE_SPREAD_TARGET: f64 = 200.0;

// ---------------------------------------------------------------------------
// Nudging and history
// ---------------------------------------------------------------------------

/// Nudge used when there is no distribution to scale against.
pub const NUDGE_EPSILON: f64 = 0.01;

/// Divisor applied to the standard deviation of effective scores.
pub const NUDGE_STDDEV_DIVISOR: f64 = 12.0;

/// Smallest nudge ever returned for a multi-item list.
pub const MIN_NUDGE: f64 = 0.001;

/// Past states kept by `UndoStack` before the oldest is dropped.
pub const UNDO_HISTORY_LIMIT: usize = 50;
