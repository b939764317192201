/// Candidate pools derived from programme data.
///
/// Turns a job list into the unranked region/hospital/specialty lists a user
/// starts ordering from, and flattens per-region hospital orders into the
/// global hospital list scoring uses.
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::types::{Job, RankedItem};

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractedData {
    /// In first-seen order.
    pub regions: Vec<String>,
    /// Valid sites per region, deduplicated and sorted.
    pub hospitals_by_region: BTreeMap<String, Vec<String>>,
    /// Valid specialties, deduplicated and sorted.
    pub specialties: Vec<String>,
}

pub fn extract_unique_values(jobs: &[Job]) -> ExtractedData {
    let mut seen_regions = HashSet::new();
    let mut regions = Vec::new();
    let mut hospitals: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut specialties = BTreeSet::new();

    for job in jobs {
        let region = job.region.trim();
        if region.is_empty() {
            continue;
        }
        if seen_regions.insert(region.to_string()) {
            regions.push(region.to_string());
        }
        let sites = hospitals.entry(region.to_string()).or_default();

        for placement in job.scored_placements() {
            if placement.has_site() {
                sites.insert(placement.site.clone());
            }
            if placement.has_specialty() {
                specialties.insert(placement.specialty.clone());
            }
        }
    }

    ExtractedData {
        regions,
        hospitals_by_region: hospitals
            .into_iter()
            .map(|(region, sites)| (region, sites.into_iter().collect()))
            .collect(),
        specialties: specialties.into_iter().collect(),
    }
}

/// Plain labels as ranked items, keeping their order.
pub fn to_ranked_items<S: AsRef<str>>(labels: &[S]) -> Vec<RankedItem> {
    labels.iter().map(|l| RankedItem::from_label(l.as_ref())).collect()
}

/// Concatenate per-region hospital rankings in region order.
///
/// Ids become `"{hospital}__{region}"` so the same site name in two regions
/// stays distinct; labels stay the plain hospital name. Regions with no
/// entry in `hospitals_by_region` contribute nothing.
pub fn derive_global_hospitals(
    ranked_regions: &[RankedItem],
    hospitals_by_region: &HashMap<String, Vec<RankedItem>>,
) -> Vec<RankedItem> {
    ranked_regions
        .iter()
        .flat_map(|region| {
            hospitals_by_region
                .get(&region.id)
                .into_iter()
                .flatten()
                .map(move |hospital| RankedItem {
                    id: format!("{}__{}", hospital.id, region.id),
                    label: hospital.label.clone(),
                })
        })
        .collect()
}
