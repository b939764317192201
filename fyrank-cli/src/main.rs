mod config;
mod input;
mod logging;
mod nudges;
mod output;
mod parse;
mod prompt;
mod refine;

use clap::Parser;
use fyrank_core::{
    score_jobs, to_ranked_items, EloState, RefinementSession, ScoringOptions, SessionConfig,
    Weights,
};
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::input::ListSources;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "fyrank", version, about = "Rank Foundation programmes by your preferences")]
struct Cli {
    /// More diagnostics on stderr (-v info, -vv debug). FYRANK_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file (default: ~/.config/fyrank/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Score programmes against ranked region, hospital and specialty lists
    Score(ScoreArgs),
    /// Refine an order with pairwise comparisons on stdin
    Refine(RefineArgs),
    /// Create a default config file at ~/.config/fyrank/config.toml
    Init,
}

#[derive(Parser)]
struct ScoreArgs {
    /// JSON array of programmes: {id, title?, region, placements: [{site, specialty}]}
    #[arg(long)]
    jobs: PathBuf,

    /// Regions, most preferred first (one per line or a JSON array)
    #[arg(long)]
    regions: Option<PathBuf>,

    /// Hospitals, most preferred first. Default: per region, in region order
    #[arg(long)]
    hospitals: Option<PathBuf>,

    /// Specialties, most preferred first
    #[arg(long)]
    specialties: Option<PathBuf>,

    #[arg(long)]
    region_weight: Option<f64>,

    #[arg(long)]
    hospital_weight: Option<f64>,

    #[arg(long)]
    specialty_weight: Option<f64>,

    /// Group by region order and leave region out of the score
    #[arg(long)]
    lock_regions: bool,

    /// Nudge a programme up one step; repeat the flag for more steps
    #[arg(long = "boost", value_name = "ID")]
    boost: Vec<String>,

    /// Nudge a programme down one step; repeat the flag for more steps
    #[arg(long = "bury", value_name = "ID")]
    bury: Vec<String>,

    /// Show only the first N programmes
    #[arg(long)]
    top: Option<usize>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct RefineArgs {
    /// Current order, most preferred first (one per line or a JSON array)
    #[arg(long)]
    items: PathBuf,

    /// Entries you placed by hand. Seeds ratings from --items order
    #[arg(long)]
    moved: Option<PathBuf>,

    /// Random seed for matchup selection
    #[arg(long)]
    seed: Option<u64>,

    /// JSON state file to resume from and save to
    #[arg(long)]
    state: Option<PathBuf>,

    /// Where to write the final order (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);

    match cli.command {
        Commands::Score(args) => run_score(args, &config_path),
        Commands::Refine(args) => run_refine(args, &config_path),
        Commands::Init => {
            let path = match cli.config {
                Some(path) => {
                    config::create_config_at(&path);
                    path
                }
                None => config::create_default_config(),
            };
            println!("Created config at {}", path.display());
            println!("Edit it to set your default weights and seed.");
        }
    }
}

fn run_score(args: ScoreArgs, config_path: &Path) {
    let cfg = config::load_config(config_path);

    let defaults = Weights::default();
    let weights = Weights::new(
        args.region_weight.or(cfg.region_weight).unwrap_or(defaults.region),
        args.hospital_weight.or(cfg.hospital_weight).unwrap_or(defaults.hospital),
        args.specialty_weight.or(cfg.specialty_weight).unwrap_or(defaults.specialty),
    )
    .unwrap_or_else(|e| bail(e));
    let lock_regions = args.lock_regions || cfg.lock_regions.unwrap_or(false);

    let jobs = input::load_jobs(&args.jobs);
    if jobs.is_empty() {
        bail(format!("No programmes found in {}", args.jobs.display()));
    }

    let sources = ListSources {
        regions: args.regions.as_deref().map(|p| input::load_list(p, "regions")),
        hospitals: args.hospitals.as_deref().map(|p| input::load_list(p, "hospitals")),
        specialties: args.specialties.as_deref().map(|p| input::load_list(p, "specialties")),
    };
    let preferences = input::build_preferences(&jobs, sources);

    tracing::info!(
        programmes = jobs.len(),
        regions = preferences.regions.len(),
        hospitals = preferences.hospitals.len(),
        specialties = preferences.specialties.len(),
        "scoring"
    );

    let options = ScoringOptions { weights, lock_regions };
    let scored = score_jobs(&jobs, &preferences, &options);
    let mut scored =
        nudges::apply_nudges(scored, &args.boost, &args.bury, lock_regions).unwrap_or_else(|e| bail(e));

    let total = scored.len();
    if let Some(top) = args.top {
        scored.truncate(top);
    }

    if args.json {
        output::print_json(&scored, total, &weights, lock_regions);
    } else {
        output::print_table(&scored, total, &weights, lock_regions);
    }
}

fn load_state(path: &Path) -> Option<EloState> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(
            serde_json::from_str(&content)
                .unwrap_or_else(|e| bail(format!("Failed to parse state at {}: {e}", path.display()))),
        ),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => bail(format!("Failed to read state at {}: {e}", path.display())),
    }
}

fn save_state(path: &Path, state: &EloState) {
    let json = serde_json::to_string_pretty(state)
        .unwrap_or_else(|e| bail(format!("Failed to encode state: {e}")));
    std::fs::write(path, json)
        .unwrap_or_else(|e| bail(format!("Failed to write state to {}: {e}", path.display())));
}

fn write_order<W: Write>(out: &mut W, order: &str) -> io::Result<()> {
    out.write_all(order.as_bytes())?;
    out.flush()
}

fn run_refine(args: RefineArgs, config_path: &Path) {
    let cfg = config::load_config(config_path);

    let labels = input::load_list(&args.items, "items");
    if labels.len() < 2 {
        bail(format!("Need at least 2 items to refine, got {}", labels.len()));
    }
    let unique: HashSet<&str> = labels.iter().map(String::as_str).collect();
    if unique.len() != labels.len() {
        bail("Items file contains duplicate entries");
    }
    let items = to_ranked_items(&labels);

    let moved: Option<HashSet<String>> = args.moved.as_deref().map(|p| {
        let moved: HashSet<String> = input::load_list(p, "moved").into_iter().collect();
        if let Some(unknown) = moved.iter().find(|m| !unique.contains(m.as_str())) {
            bail(format!("Moved entry \"{unknown}\" is not in the items file"));
        }
        moved
    });

    let session_config = SessionConfig { seed: args.seed.or(cfg.seed), ..SessionConfig::default() };

    let resumed = args.state.as_deref().and_then(load_state);
    let mut session = match (resumed, moved) {
        (Some(state), moved) => {
            if state.len() != labels.len() || labels.iter().any(|l| !state.contains(l)) {
                bail("State file does not match the items file");
            }
            RefinementSession::resume(state, moved, &items, session_config)
        }
        (None, Some(moved)) => RefinementSession::seeded_with(&items, moved, session_config),
        (None, None) => RefinementSession::flat_with(&labels, session_config),
    };

    // Prompts go to stderr so stdout carries only the final order.
    let stdin = io::stdin();
    let summary = refine::run_loop(&mut session, stdin.lock(), &mut io::stderr())
        .unwrap_or_else(|e| bail(format!("Failed during refinement: {e}")));

    eprintln!(
        "\n{} answered, {} skipped, confidence {:.0}%",
        summary.answered,
        summary.skipped,
        session.confidence() * 100.0
    );

    let ranked = session.ranked_list();
    let order: String = ranked.iter().map(|item| format!("{}\n", item.label)).collect();

    match args.output {
        Some(ref path) => std::fs::write(path, &order)
            .unwrap_or_else(|e| bail(format!("Failed to write {}: {e}", path.display()))),
        None => write_order(&mut io::stdout().lock(), &order)
            .unwrap_or_else(|e| bail(format!("Failed to write the final order: {e}"))),
    }

    if let Some(ref path) = args.state {
        save_state(path, session.state());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_order() {
        let mut out = Vec::new();
        write_order(&mut out, "b\na\n").unwrap();
        assert_eq!(out, b"b\na\n");
    }

    #[test]
    fn test_write_order_reports_failure() {
        let err = write_order(&mut ClosedPipe, "b\na\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
