/// fyrank-core: Pure-computation ranking engine for Foundation programme preferences.
///
/// Weighted composite scoring of jobs against ranked region/hospital/specialty
/// lists, plus a graded-ELO pairwise refinement loop with matchup selection and
/// a confidence estimate. No IO, no UI, no filesystem: just math. Bring your
/// own front end.
///
/// Entities are identified by caller-provided string IDs. All state is
/// replaced rather than mutated, so any earlier value can be kept for undo.
///
/// # Quick start
///
/// ```rust
/// use fyrank_core::{score_jobs, Job, Placement, RankedItem, RankedPreferences, ScoringOptions};
///
/// let jobs = vec![
///     Job::new("F1", "North", vec![Placement::new("City General", "Surgery")]).unwrap(),
///     Job::new("F2", "South", vec![Placement::new("Harbour", "Psychiatry")]).unwrap(),
/// ];
///
/// let preferences = RankedPreferences {
///     regions: vec![RankedItem::from_label("South"), RankedItem::from_label("North")],
///     hospitals: vec![RankedItem::from_label("Harbour"), RankedItem::from_label("City General")],
///     specialties: vec![RankedItem::from_label("Psychiatry"), RankedItem::from_label("Surgery")],
/// };
///
/// let scored = score_jobs(&jobs, &preferences, &ScoringOptions::default());
/// assert_eq!(scored[0].id(), "F2");
///
/// for s in &scored {
///     println!("{}: {:.4}", s.id(), s.effective_score());
/// }
/// ```
///
/// # Refinement
///
/// ```rust
/// use fyrank_core::{Preference, RefinementSession};
///
/// let mut session = RefinementSession::flat(&["F1", "F2", "F3"]);
/// let (left, right) = session.current_matchup().clone();
/// let outcome = session.record(Preference::StrongA);
/// assert_eq!(outcome.winner(), Some(left.as_str()));
/// assert_ne!(left, right);
/// println!("confidence {:.0}%", session.confidence() * 100.0);
/// ```

pub mod adjust;
pub mod confidence;
pub mod constants;
pub mod elo;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pairing;
pub mod refinement;
pub mod scoring;
mod stats;
pub mod types;
pub mod undo;

// Re-export primary public API at crate root.
pub use adjust::{
    apply_nudge, bulk_move_to, bulk_nudge, move_to, nudge, reorder_with_adjustment,
    BulkNudgeOutcome, NudgeDirection, NudgeOutcome,
};
pub use confidence::{get_confidence, get_confidence_with, ConfidenceConfig};
pub use elo::{
    init_elo, init_elo_from_ranking, to_ranked_list, update_elo, EloConfig, EloState, PairKey,
    RankingEntry,
};
pub use error::{Error, Result};
pub use extract::{derive_global_hospitals, extract_unique_values, to_ranked_items, ExtractedData};
pub use normalize::{normalize, RankMap};
pub use pairing::{calculate_matchup_score, select_next_matchup, select_next_matchup_with, MatchupConfig};
pub use refinement::{ComparisonOutcome, RefinementSession, SessionConfig};
pub use scoring::{
    compute_nudge_amount, compute_nudge_amount_with, score_jobs, sort_by_effective_score,
    sort_by_region_then_effective_score, sort_for_display, NudgeConfig, RankedPreferences,
    ScoringOptions,
};
pub use types::{ComparisonRecord, Job, Pair, Placement, Preference, RankedItem, ScoredItem, Weights};
pub use undo::UndoStack;
