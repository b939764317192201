/// Rank normalisation: ordered preference lists → 0..1 strengths.
use std::collections::HashMap;

use crate::types::RankedItem;

/// Map a 1-based rank within `total` items onto [0, 1], best = 1, worst = 0.
///
/// Pools of zero or one item are maximally preferred (1.0).
pub fn normalize(rank: usize, total: usize) -> f64 {
    if total <= 1 {
        return 1.0;
    }
    (total as f64 - rank as f64) / (total as f64 - 1.0)
}

/// Label → 1-based position lookup for one ranked list.
///
/// Unknown labels rank last (`total`), so missing data never outranks ranked data.
#[derive(Debug, Clone)]
pub struct RankMap {
    ranks: HashMap<String, usize>,
    total: usize,
}

impl RankMap {
    /// Build from an ordered list. A repeated label keeps its last position.
    pub fn from_items(items: &[RankedItem]) -> Self {
        let mut ranks = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            ranks.insert(item.label.clone(), i + 1);
        }
        RankMap { ranks, total: items.len() }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn rank_of(&self, label: &str) -> usize {
        self.ranks.get(label).copied().unwrap_or(self.total)
    }

    pub fn normalized(&self, label: &str) -> f64 {
        normalize(self.rank_of(label), self.total)
    }
}
