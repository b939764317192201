/// `--boost` / `--bury` handling for `fyrank score`.
use fyrank_core::{nudge, sort_for_display, NudgeDirection, ScoredItem};

/// Apply one nudge step per flag occurrence, boosts first, then restore display order.
///
/// Fails on the first id that names no programme.
pub fn apply_nudges(
    scored: Vec<ScoredItem>,
    boost: &[String],
    bury: &[String],
    lock_regions: bool,
) -> Result<Vec<ScoredItem>, String> {
    let steps = boost
        .iter()
        .map(|id| (id, NudgeDirection::Up))
        .chain(bury.iter().map(|id| (id, NudgeDirection::Down)));

    let mut items = scored;
    for (id, direction) in steps {
        let outcome =
            nudge(&items, id, direction).ok_or_else(|| format!("No programme with id \"{id}\""))?;
        items = sort_for_display(&outcome.items, lock_regions);
    }
    Ok(items)
}
