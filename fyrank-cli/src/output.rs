/// Output formatting: terminal table and JSON.
use fyrank_core::{ScoredItem, Weights};
use serde::Serialize;

#[derive(Serialize)]
struct JsonScoredItem<'a> {
    rank: usize,
    id: &'a str,
    title: &'a str,
    region: &'a str,
    effective_score: f64,
    score: f64,
    score_adjustment: f64,
    region_score: f64,
    hospital_score: f64,
    specialty_score: f64,
}

#[derive(Serialize)]
struct JsonWeights {
    region: f64,
    hospital: f64,
    specialty: f64,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: Vec<JsonScoredItem<'a>>,
    total_programmes: usize,
    lock_regions: bool,
    /// Display shares in percent.
    weights: JsonWeights,
}

/// Print results as a formatted terminal table.
pub fn print_table(items: &[ScoredItem], total: usize, weights: &Weights, lock_regions: bool) {
    print!("{}", render_table(items, total, weights, lock_regions));
}

fn render_table(items: &[ScoredItem], total: usize, weights: &Weights, lock_regions: bool) -> String {
    let title_width = items.iter().map(|s| s.item.title.len()).max().unwrap_or(9).max(9); // "Programme"
    let region_width = items.iter().map(|s| s.item.region.len()).max().unwrap_or(6).max(6);

    let mut out = String::new();
    out.push_str(&format!(
        "  # | {:<title_width$} | {:<region_width$} |  Score | Region | Hospital | Specialty\n",
        "Programme", "Region"
    ));
    out.push_str(&format!(
        "----|-{}-|-{}-|--------|--------|----------|----------\n",
        "-".repeat(title_width),
        "-".repeat(region_width)
    ));

    for (i, s) in items.iter().enumerate() {
        out.push_str(&format!(
            "{:>3} | {:<title_width$} | {:<region_width$} | {:>6.4} | {:>6.3} | {:>8.3} | {:>9.3}\n",
            i + 1,
            s.item.title,
            s.item.region,
            s.effective_score(),
            s.region_score,
            s.hospital_score,
            s.specialty_score,
        ));
    }

    let (region, hospital, specialty) = weights.display_shares(lock_regions);
    out.push_str(&format!("\n{} of {} programmes shown\n", items.len(), total));
    if lock_regions {
        out.push_str(&format!(
            "Weights: hospital {hospital:.0}%, specialty {specialty:.0}% (grouped by region order)\n"
        ));
    } else {
        out.push_str(&format!(
            "Weights: region {region:.0}%, hospital {hospital:.0}%, specialty {specialty:.0}%\n"
        ));
    }
    out
}

fn render_json(items: &[ScoredItem], total: usize, weights: &Weights, lock_regions: bool) -> String {
    let (region, hospital, specialty) = weights.display_shares(lock_regions);
    let output = JsonOutput {
        items: items
            .iter()
            .enumerate()
            .map(|(i, s)| JsonScoredItem {
                rank: i + 1,
                id: s.id(),
                title: &s.item.title,
                region: &s.item.region,
                effective_score: s.effective_score(),
                score: s.score,
                score_adjustment: s.score_adjustment,
                region_score: s.region_score,
                hospital_score: s.hospital_score,
                specialty_score: s.specialty_score,
            })
            .collect(),
        total_programmes: total,
        lock_regions,
        weights: JsonWeights { region, hospital, specialty },
    };

    serde_json::to_string_pretty(&output).unwrap_or_else(|e| crate::bail(format!("Failed to encode JSON: {e}")))
}

/// Print results as JSON.
pub fn print_json(items: &[ScoredItem], total: usize, weights: &Weights, lock_regions: bool) {
    println!("{}", render_json(items, total, weights, lock_regions));
}
