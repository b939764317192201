/// Manual edits to a scored results list: boost/bury, drag reorder, move-to.
///
/// Every function takes the caller's list by reference and returns a new one.
/// Base scores are never touched; only `score_adjustment` changes.
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::scoring::{compute_nudge_amount, sort_by_effective_score};
use crate::types::ScoredItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NudgeDirection {
    /// Boost: raise the effective score.
    Up,
    /// Bury: lower the effective score.
    Down,
}

impl NudgeDirection {
    fn sign(self) -> f64 {
        match self {
            NudgeDirection::Up => 1.0,
            NudgeDirection::Down => -1.0,
        }
    }
}

/// Result of nudging a single item.
#[derive(Debug, Clone)]
pub struct NudgeOutcome {
    /// The list after the nudge, re-sorted by effective score.
    pub items: Vec<ScoredItem>,
    pub amount: f64,
    pub old_index: usize,
    pub new_index: usize,
}

impl NudgeOutcome {
    /// Positions moved, positive = moved up the list.
    pub fn rank_delta(&self) -> isize {
        self.old_index as isize - self.new_index as isize
    }
}

/// Result of nudging a selection.
#[derive(Debug, Clone)]
pub struct BulkNudgeOutcome {
    pub items: Vec<ScoredItem>,
    pub amount: f64,
    /// Rank delta per nudged id, positive = moved up.
    pub rank_deltas: HashMap<String, isize>,
}

fn index_of(items: &[ScoredItem], job_id: &str) -> Option<usize> {
    items.iter().position(|s| s.id() == job_id)
}

/// Add `delta` to one item's adjustment. Order is left as is.
pub fn apply_nudge(items: &[ScoredItem], job_id: &str, delta: f64) -> Vec<ScoredItem> {
    items
        .iter()
        .map(|s| {
            let mut s = s.clone();
            if s.id() == job_id {
                s.score_adjustment += delta;
            }
            s
        })
        .collect()
}

/// Boost or bury one item by a spread-scaled amount and re-sort.
///
/// `items` is expected in display order. Returns `None` for an unknown id. An
/// item already at the extreme still gets its adjustment.
pub fn nudge(items: &[ScoredItem], job_id: &str, direction: NudgeDirection) -> Option<NudgeOutcome> {
    let old_index = index_of(items, job_id)?;
    let amount = compute_nudge_amount(items);
    let sorted = sort_by_effective_score(&apply_nudge(items, job_id, direction.sign() * amount));
    let new_index = index_of(&sorted, job_id)?;

    debug!(job_id, ?direction, amount, old_index, new_index, "nudged programme");

    Some(NudgeOutcome { items: sorted, amount, old_index, new_index })
}

/// Boost or bury every selected, unlocked item by the same amount.
///
/// Returns `None` when no selected, unlocked id names an item in the list.
pub fn bulk_nudge(
    items: &[ScoredItem],
    selected: &HashSet<String>,
    locked: &HashSet<String>,
    direction: NudgeDirection,
) -> Option<BulkNudgeOutcome> {
    let ids: HashSet<&String> = selected.difference(locked).collect();
    if ids.is_empty() {
        return None;
    }

    let amount = compute_nudge_amount(items);
    let delta = direction.sign() * amount;

    let old_indices: HashMap<&str, usize> = items
        .iter()
        .enumerate()
        .filter(|(_, s)| ids.contains(&s.item.id))
        .map(|(i, s)| (s.id(), i))
        .collect();
    if old_indices.is_empty() {
        return None;
    }

    let updated: Vec<ScoredItem> = items
        .iter()
        .map(|s| {
            let mut s = s.clone();
            if ids.contains(&s.item.id) {
                s.score_adjustment += delta;
            }
            s
        })
        .collect();
    let sorted = sort_by_effective_score(&updated);

    let rank_deltas = sorted
        .iter()
        .enumerate()
        .filter_map(|(i, s)| {
            old_indices
                .get(s.id())
                .map(|&old| (s.id().to_string(), old as isize - i as isize))
        })
        .collect();

    debug!(count = ids.len(), ?direction, amount, "bulk nudged programmes");

    Some(BulkNudgeOutcome { items: sorted, amount, rank_deltas })
}

/// Drag `from_id` onto `to_id`'s position, then pin its effective score.
///
/// The moved item's adjustment is set so its effective score equals that of
/// the item now directly above it, or directly below it when dropped at the
/// top. Locked items can be neither dragged nor displaced.
pub fn reorder_with_adjustment(
    items: &[ScoredItem],
    from_id: &str,
    to_id: &str,
    locked: &HashSet<String>,
) -> Vec<ScoredItem> {
    if locked.contains(from_id) || locked.contains(to_id) {
        return items.to_vec();
    }
    let (Some(old_index), Some(new_index)) = (index_of(items, from_id), index_of(items, to_id)) else {
        return items.to_vec();
    };
    if old_index == new_index {
        return items.to_vec();
    }

    let mut reordered = items.to_vec();
    let moved = reordered.remove(old_index);
    reordered.insert(new_index, moved);

    let neighbour = if new_index == 0 { 1 } else { new_index - 1 };
    let target_score = reordered[neighbour].effective_score();
    let moved = &mut reordered[new_index];
    moved.score_adjustment = target_score - moved.score;

    reordered
}

/// Move one item to a 1-based rank, clamped into the list. Scores unchanged.
pub fn move_to(
    items: &[ScoredItem],
    job_id: &str,
    target_rank: usize,
    locked: &HashSet<String>,
) -> Vec<ScoredItem> {
    if locked.contains(job_id) || items.is_empty() {
        return items.to_vec();
    }
    let Some(index) = index_of(items, job_id) else {
        return items.to_vec();
    };

    let mut moved = items.to_vec();
    let item = moved.remove(index);
    let target = target_rank.saturating_sub(1).min(moved.len());
    moved.insert(target, item);
    moved
}

/// Pull the selected, unlocked items out and splice them in at `target_rank`.
///
/// The selection keeps its relative order. The target is clamped into the
/// list of remaining items.
pub fn bulk_move_to(
    items: &[ScoredItem],
    selected: &HashSet<String>,
    locked: &HashSet<String>,
    target_rank: usize,
) -> Vec<ScoredItem> {
    let is_moving = |s: &ScoredItem| selected.contains(s.id()) && !locked.contains(s.id());

    let (moving, mut remaining): (Vec<ScoredItem>, Vec<ScoredItem>) =
        items.iter().cloned().partition(|s| is_moving(s));
    if moving.is_empty() {
        return items.to_vec();
    }

    let insert_at = target_rank.saturating_sub(1).min(remaining.len());
    remaining.splice(insert_at..insert_at, moving);
    remaining
}
