use std::collections::HashSet;

use fyrank_core::{
    get_confidence, init_elo, init_elo_from_ranking, normalize, score_jobs, update_elo, Job,
    Placement, Preference, RankMap, RankedItem, RankedPreferences, ScoringOptions, Weights,
};
use proptest::prelude::*;

const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
const SITES: [&str; 5] = ["General", "Royal", "Harbour", "St Mary", "None"];
const SPECIALTIES: [&str; 5] = ["Surgery", "Psychiatry", "Cardiology", "GP", "None"];

fn preference() -> impl Strategy<Value = Preference> {
    prop::sample::select(Preference::ALL.to_vec())
}

fn job_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (
        0..REGIONS.len(),
        prop::collection::vec((0..SITES.len(), 0..SPECIALTIES.len()), 0..=6),
    )
}

fn build_jobs(specs: &[(usize, Vec<(usize, usize)>)]) -> Vec<Job> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (region, placements))| {
            let placements = placements
                .iter()
                .map(|&(s, p)| Placement::new(SITES[s], SPECIALTIES[p]))
                .collect();
            Job::new(format!("F{i}"), REGIONS[*region], placements).unwrap()
        })
        .collect()
}

fn ranked(labels: &[&str]) -> Vec<RankedItem> {
    labels.iter().map(|&l| RankedItem::from_label(l)).collect()
}

proptest! {
    #[test]
    fn normalize_is_monotone_and_bounded(total in 2usize..200, a in 1usize..200, b in 1usize..200) {
        let (a, b) = (a.min(total), b.min(total));
        let (na, nb) = (normalize(a, total), normalize(b, total));
        prop_assert!((0.0..=1.0).contains(&na));
        prop_assert!((0.0..=1.0).contains(&nb));
        if a < b {
            prop_assert!(na > nb);
        }
        prop_assert_eq!(normalize(1, total), 1.0);
        prop_assert_eq!(normalize(total, total), 0.0);
    }

    #[test]
    fn unknown_labels_rank_last(labels in prop::collection::hash_set("[a-z]{1,6}", 1..10)) {
        let labels: Vec<String> = labels.into_iter().collect();
        let map = RankMap::from_items(&labels.iter().map(RankedItem::from_label).collect::<Vec<_>>());
        prop_assert_eq!(map.rank_of("UNLISTED"), labels.len());
    }

    #[test]
    fn elo_update_is_direction_symmetric(
        warmup in prop::collection::vec(preference(), 0..10),
        pref in preference(),
    ) {
        let mut state = init_elo_from_ranking(&ranked(&["a", "b", "c"]), &HashSet::new());
        for w in warmup {
            state = update_elo(&state, "a", "b", w);
        }

        let forward = update_elo(&state, "a", "b", pref);
        let backward = update_elo(&state, "b", "a", pref.reversed());

        prop_assert!((forward.rating("a").unwrap() - backward.rating("a").unwrap()).abs() < 1e-9);
        prop_assert!((forward.rating("b").unwrap() - backward.rating("b").unwrap()).abs() < 1e-9);
    }

    #[test]
    fn elo_update_conserves_total_rating(prefs in prop::collection::vec((0usize..4, 0usize..4, preference()), 1..40)) {
        let ids = ["a", "b", "c", "d"];
        let mut state = init_elo(&ids);
        for (i, j, pref) in prefs {
            if i == j {
                continue;
            }
            state = update_elo(&state, ids[i], ids[j], pref);
        }
        let total: f64 = state.ratings().values().sum();
        prop_assert!((total - 4.0 * 1500.0).abs() < 1e-6);
    }

    #[test]
    fn elo_update_increments_counters(i in 0usize..5, offset in 1usize..5, pref in preference()) {
        let ids = ["a", "b", "c", "d", "e"];
        let (a, b) = (ids[i], ids[(i + offset) % ids.len()]);
        let state = init_elo(&ids);
        let next = update_elo(&state, a, b, pref);

        prop_assert_eq!(next.comparisons(a), state.comparisons(a) + 1);
        prop_assert_eq!(next.comparisons(b), state.comparisons(b) + 1);
        prop_assert_eq!(next.pair_count(a, b), state.pair_count(b, a) + 1);
        prop_assert_eq!(next.history().len(), state.history().len() + 1);
        // The input state is untouched.
        prop_assert_eq!(state.total_comparisons(), 0);
    }

    #[test]
    fn preferred_side_never_loses_rating(pref in preference()) {
        let state = init_elo(&["a", "b"]);
        let next = update_elo(&state, "a", "b", pref);
        let gained = next.rating("a").unwrap() - 1500.0;
        match pref.value() {
            v if v < 0 => prop_assert!(gained > 0.0),
            v if v > 0 => prop_assert!(gained < 0.0),
            _ => prop_assert_eq!(gained, 0.0),
        }
    }

    #[test]
    fn confidence_grows_with_manual_placement(n in 2usize..40, moved in 0usize..40) {
        let ids: Vec<String> = (0..n).map(|i| format!("e{i}")).collect();
        let state = init_elo(&ids);
        let moved = moved.min(n);

        let c = get_confidence(&state, Some(moved));
        prop_assert!((0.0..=1.0).contains(&c));
        if moved < n {
            prop_assert!(get_confidence(&state, Some(moved + 1)) > c);
        }
    }

    #[test]
    fn confidence_rises_until_comparison_target(prefs in prop::collection::vec(preference(), 1..30)) {
        let ids = ["a", "b", "c"];
        // n·log2(n)·0.6 comparisons saturate the comparison term.
        let target = 3.0 * 3f64.log2() * 0.6;
        let mut state = init_elo(&ids);
        let mut previous = get_confidence(&state, None);
        for pref in prefs {
            state = update_elo(&state, "a", "b", pref);
            let c = get_confidence(&state, None);
            prop_assert!((0.0..=1.0).contains(&c));
            if (state.total_comparisons() as f64) <= target.ceil() {
                prop_assert!(c > previous);
            }
            previous = c;
        }
    }

    #[test]
    fn locked_regions_keep_region_order(
        specs in prop::collection::vec(job_strategy(), 0..25),
        region_weight in 0.0f64..=1.0,
        hospital_weight in 0.0f64..=1.0,
        specialty_weight in 0.0f64..=1.0,
    ) {
        let jobs = build_jobs(&specs);
        let preferences = RankedPreferences {
            regions: ranked(&["West", "North", "South", "East"]),
            hospitals: ranked(&["Royal", "General", "St Mary", "Harbour"]),
            specialties: ranked(&["GP", "Surgery", "Cardiology", "Psychiatry"]),
        };
        let options = ScoringOptions {
            weights: Weights::new(region_weight, hospital_weight, specialty_weight).unwrap(),
            lock_regions: true,
        };

        let scored = score_jobs(&jobs, &preferences, &options);
        prop_assert_eq!(scored.len(), jobs.len());

        let region_map = RankMap::from_items(&preferences.regions);
        for pair in scored.windows(2) {
            let (ra, rb) = (region_map.rank_of(&pair[0].item.region), region_map.rank_of(&pair[1].item.region));
            prop_assert!(ra <= rb);
            if ra == rb {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }
        for s in &scored {
            prop_assert!(s.score >= 0.0);
            prop_assert!(s.score <= hospital_weight + specialty_weight + 1e-12);
        }
    }

    #[test]
    fn unlocked_scores_are_sorted_and_bounded(specs in prop::collection::vec(job_strategy(), 0..25)) {
        let jobs = build_jobs(&specs);
        let preferences = RankedPreferences {
            regions: ranked(&REGIONS),
            hospitals: ranked(&SITES[..4]),
            specialties: ranked(&SPECIALTIES[..4]),
        };
        let scored = score_jobs(&jobs, &preferences, &ScoringOptions::default());
        for pair in scored.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for s in &scored {
            prop_assert!((0.0..=0.99 + 1e-12).contains(&s.score));
        }
    }
}
