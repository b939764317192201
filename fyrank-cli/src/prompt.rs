/// Text shown during interactive refinement.
use fyrank_core::{ComparisonOutcome, RankingEntry};

/// The question for one matchup, with the answer scale.
pub fn build_prompt(left: &str, right: &str) -> String {
    format!(
        "Which programme do you prefer?\n\n\
         Left:  {left}\n\
         Right: {right}\n\n\
         A: Left strongly\n\
         B: Left slightly\n\
         C: No preference\n\
         D: Right slightly\n\
         E: Right strongly\n\
         (s)kip  (u)ndo  (r)edo  (q)uit\n"
    )
}

/// Leaderboard slice with the two entities being compared marked.
pub fn render_neighbourhood(entries: &[RankingEntry], left: &str, right: &str) -> String {
    let label_width = entries.iter().map(|e| e.label.len()).max().unwrap_or(0);
    let mut out = String::new();
    for e in entries {
        let marker = if e.id == left || e.id == right { '>' } else { ' ' };
        out.push_str(&format!(
            "{marker} {:>3}. {:<label_width$}  {:>5}\n",
            e.rank, e.label, e.rating
        ));
    }
    out
}

/// One-line summary of what an answer did.
pub fn describe_outcome(outcome: &ComparisonOutcome, winner_label: Option<&str>) -> String {
    match (winner_label, outcome.winner_delta) {
        (Some(label), Some(delta)) if delta > 0 => format!("{label} moved up {delta}"),
        (Some(label), Some(delta)) if delta < 0 => format!("{label} moved down {}", -delta),
        (Some(label), _) => format!("{label} held its place"),
        (None, _) => "Recorded as a draw".to_string(),
    }
}

pub fn format_confidence(confidence: f64, comparisons: usize) -> String {
    format!("Confidence {:.0}% after {comparisons} comparisons", confidence * 100.0)
}
