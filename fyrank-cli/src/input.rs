/// Loading jobs and ranked lists from files.
use std::collections::HashMap;
use std::path::Path;

use fyrank_core::{
    derive_global_hospitals, extract_unique_values, to_ranked_items, Job, RankedItem,
    RankedPreferences,
};

use crate::bail;

/// Parse a string as either a JSON array of strings or plain text (one item per line).
pub fn parse_items_from_str(content: &str) -> Vec<String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        let items: Vec<String> = serde_json::from_str(trimmed)
            .unwrap_or_else(|e| bail(format!("File looks like JSON but failed to parse: {e}")));
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    } else {
        trimmed
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn read_file(path: &Path, what: &str) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read {what} file {}: {e}", path.display())))
}

pub fn load_list(path: &Path, what: &str) -> Vec<String> {
    parse_items_from_str(&read_file(path, what))
}

/// Parse a JSON array of jobs, re-validating each one.
///
/// A missing or empty `title` falls back to the id.
pub fn parse_jobs_from_str(content: &str) -> fyrank_core::Result<Vec<Job>> {
    let raw: Vec<Job> = serde_json::from_str(content)
        .unwrap_or_else(|e| bail(format!("Failed to parse jobs JSON: {e}")));

    raw.into_iter()
        .map(|job| {
            let title = if job.title.trim().is_empty() { job.id.clone() } else { job.title };
            Ok(Job::new(job.id, job.region, job.placements)?.with_title(title))
        })
        .collect()
}

pub fn load_jobs(path: &Path) -> Vec<Job> {
    parse_jobs_from_str(&read_file(path, "jobs")).unwrap_or_else(|e| bail(e))
}

/// Ranked lists given on the command line, each optional.
#[derive(Default)]
pub struct ListSources {
    pub regions: Option<Vec<String>>,
    pub hospitals: Option<Vec<String>>,
    pub specialties: Option<Vec<String>>,
}

/// Fill in any list not supplied from the jobs themselves, in extracted order.
///
/// Without an explicit hospital list, hospitals are ordered region by region
/// following the (given or extracted) region order.
pub fn build_preferences(jobs: &[Job], sources: ListSources) -> RankedPreferences {
    let extracted = extract_unique_values(jobs);

    let regions = to_ranked_items(&sources.regions.unwrap_or(extracted.regions));

    let hospitals = match sources.hospitals {
        Some(list) => to_ranked_items(&list),
        None => {
            let by_region: HashMap<String, Vec<RankedItem>> = extracted
                .hospitals_by_region
                .iter()
                .map(|(region, sites)| (region.clone(), to_ranked_items(sites)))
                .collect();
            derive_global_hospitals(&regions, &by_region)
        }
    };

    let specialties = to_ranked_items(&sources.specialties.unwrap_or(extracted.specialties));

    RankedPreferences { regions, hospitals, specialties }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOBS: &str = r#"[
        {"id": "F1", "title": "North surgical", "region": "North",
         "placements": [{"site": "Royal", "specialty": "Surgery"}, {"site": "General", "specialty": "GP"}]},
        {"id": "F2", "region": "South",
         "placements": [{"site": "Harbour", "specialty": "Psychiatry"}]}
    ]"#;

    #[test]
    fn test_parse_items_plain_text() {
        let items = parse_items_from_str("  North\n\nSouth  \n East\n");
        assert_eq!(items, vec!["North", "South", "East"]);
    }

    #[test]
    fn test_parse_items_json_array() {
        let items = parse_items_from_str(r#"["North", " ", "South"]"#);
        assert_eq!(items, vec!["North", "South"]);
    }

    #[test]
    fn test_parse_jobs_defaults_title() {
        let jobs = parse_jobs_from_str(JOBS).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "North surgical");
        assert_eq!(jobs[1].title, "F2");
        assert_eq!(jobs[1].placements[0].description, None);
    }

    #[test]
    fn test_parse_jobs_rejects_too_many_placements() {
        let placements: Vec<String> =
            (0..7).map(|i| format!(r#"{{"site": "S{i}", "specialty": "P{i}"}}"#)).collect();
        let content = format!(r#"[{{"id": "F9", "region": "R", "placements": [{}]}}]"#, placements.join(","));
        let err = parse_jobs_from_str(&content).unwrap_err();
        assert_eq!(
            err,
            fyrank_core::Error::TooManyPlacements { job_id: "F9".to_string(), count: 7, max: 6 }
        );
    }

    #[test]
    fn test_build_preferences_from_extracted_order() {
        let jobs = parse_jobs_from_str(JOBS).unwrap();
        let prefs = build_preferences(&jobs, ListSources::default());

        let labels = |items: &[RankedItem]| items.iter().map(|i| i.label.clone()).collect::<Vec<_>>();
        assert_eq!(labels(&prefs.regions), vec!["North", "South"]);
        assert_eq!(labels(&prefs.hospitals), vec!["General", "Royal", "Harbour"]);
        assert_eq!(prefs.hospitals[0].id, "General__North");
        assert_eq!(labels(&prefs.specialties), vec!["GP", "Psychiatry", "Surgery"]);
    }

    #[test]
    fn test_build_preferences_hospitals_follow_given_regions() {
        let jobs = parse_jobs_from_str(JOBS).unwrap();
        let sources = ListSources {
            regions: Some(vec!["South".to_string(), "North".to_string()]),
            ..ListSources::default()
        };
        let prefs = build_preferences(&jobs, sources);
        let hospitals: Vec<&str> = prefs.hospitals.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(hospitals, vec!["Harbour", "General", "Royal"]);
    }

    #[test]
    fn test_explicit_lists_win() {
        let jobs = parse_jobs_from_str(JOBS).unwrap();
        let sources = ListSources {
            regions: None,
            hospitals: Some(vec!["Royal".to_string()]),
            specialties: Some(vec!["Surgery".to_string()]),
        };
        let prefs = build_preferences(&jobs, sources);
        assert_eq!(prefs.hospitals, vec![RankedItem::from_label("Royal")]);
        assert_eq!(prefs.specialties, vec![RankedItem::from_label("Surgery")]);
    }
}
