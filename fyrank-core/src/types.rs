use std::convert::TryFrom;

use crate::constants::{DEFAULT_DIMENSION_WEIGHT, NONE_SENTINEL, PLACEMENTS_PER_JOB};
use crate::error::{Error, Result};

/// One entry of a user-ordered preference list. Index 0 is most preferred.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedItem {
    pub id: String,
    /// Display name. Rank maps are keyed by this, not by `id`.
    pub label: String,
}

impl RankedItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        RankedItem { id: id.into(), label: label.into() }
    }

    /// An item whose id doubles as its label.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        RankedItem { id: label.clone(), label }
    }
}

/// Per-dimension importance, each in [0, 1].
///
/// Not required to sum to 1: scoring multiplies raw dimension scores by the raw
/// weights, only `display_shares` normalises.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weights {
    pub region: f64,
    pub hospital: f64,
    pub specialty: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            region: DEFAULT_DIMENSION_WEIGHT,
            hospital: DEFAULT_DIMENSION_WEIGHT,
            specialty: DEFAULT_DIMENSION_WEIGHT,
        }
    }
}

impl Weights {
    /// Validated constructor for weights coming from user input.
    pub fn new(region: f64, hospital: f64, specialty: f64) -> Result<Self> {
        for (dimension, value) in [("region", region), ("hospital", hospital), ("specialty", specialty)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::WeightOutOfRange { dimension, value });
            }
        }
        Ok(Weights { region, hospital, specialty })
    }

    /// Percentages of the visible weights, as `(region, hospital, specialty)`.
    ///
    /// Region is hidden (reported as 0) when regions are locked. A zero visible
    /// total yields all zeros rather than NaN.
    pub fn display_shares(&self, lock_regions: bool) -> (f64, f64, f64) {
        let region = if lock_regions { 0.0 } else { self.region };
        let total = region + self.hospital + self.specialty;
        if total <= 0.0 {
            return (0.0, 0.0, 0.0);
        }
        (
            region / total * 100.0,
            self.hospital / total * 100.0,
            self.specialty / total * 100.0,
        )
    }
}

/// A single rotation within a programme.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub site: String,
    pub specialty: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
}

fn is_filled(field: &str) -> bool {
    let trimmed = field.trim();
    !trimmed.is_empty() && trimmed != NONE_SENTINEL
}

impl Placement {
    pub fn new(site: impl Into<String>, specialty: impl Into<String>) -> Self {
        Placement { site: site.into(), specialty: specialty.into(), description: None }
    }

    pub fn has_site(&self) -> bool {
        is_filled(&self.site)
    }

    pub fn has_specialty(&self) -> bool {
        is_filled(&self.specialty)
    }
}

/// A candidate programme: a region plus up to six placements.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job {
    /// Unique key, used by every results-list operation.
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    pub region: String,
    pub placements: Vec<Placement>,
}

impl Job {
    pub fn new(
        id: impl Into<String>,
        region: impl Into<String>,
        placements: Vec<Placement>,
    ) -> Result<Self> {
        let id = id.into();
        if placements.len() > PLACEMENTS_PER_JOB {
            return Err(Error::TooManyPlacements {
                job_id: id,
                count: placements.len(),
                max: PLACEMENTS_PER_JOB,
            });
        }
        Ok(Job { title: id.clone(), id, region: region.into(), placements })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Placements scoring considers, in order.
    pub fn scored_placements(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().take(PLACEMENTS_PER_JOB)
    }
}

/// A job with its composite score and the per-dimension parts it came from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredItem {
    pub item: Job,
    /// Composite computed once by the scorer. Never mutated afterwards.
    pub score: f64,
    /// Manual nudges, accumulated on top of `score`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub score_adjustment: f64,
    pub region_score: f64,
    pub hospital_score: f64,
    pub specialty_score: f64,
}

impl ScoredItem {
    /// `score + score_adjustment`. Every ranking display orders by this.
    pub fn effective_score(&self) -> f64 {
        self.score + self.score_adjustment
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }
}

/// A graded answer to "which of these two do you prefer?".
///
/// Negative favours the first entity (`a`), positive the second (`b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i8", into = "i8"))]
pub enum Preference {
    StrongA = -2,
    SlightA = -1,
    Equal = 0,
    SlightB = 1,
    StrongB = 2,
}

impl Preference {
    pub const ALL: [Preference; 5] = [
        Preference::StrongA,
        Preference::SlightA,
        Preference::Equal,
        Preference::SlightB,
        Preference::StrongB,
    ];

    pub fn value(self) -> i8 {
        self as i8
    }

    pub fn weight(self) -> f64 {
        f64::from(self.value())
    }

    /// The same answer with the two sides swapped.
    pub fn reversed(self) -> Self {
        match self {
            Preference::StrongA => Preference::StrongB,
            Preference::SlightA => Preference::SlightB,
            Preference::Equal => Preference::Equal,
            Preference::SlightB => Preference::SlightA,
            Preference::StrongB => Preference::StrongA,
        }
    }
}

impl TryFrom<i8> for Preference {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            -2 => Ok(Preference::StrongA),
            -1 => Ok(Preference::SlightA),
            0 => Ok(Preference::Equal),
            1 => Ok(Preference::SlightB),
            2 => Ok(Preference::StrongB),
            other => Err(Error::InvalidPreference(other)),
        }
    }
}

impl From<Preference> for i8 {
    fn from(p: Preference) -> i8 {
        p.value()
    }
}

/// One answered comparison, as kept in `EloState::history`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonRecord {
    pub a: String,
    pub b: String,
    pub weight: Preference,
}

/// A matchup: two entity ids in presentation order (left, right).
pub type Pair = (String, String);
