use std::path::PathBuf;

use clap::Parser;

use coinche_bench::config::{BenchmarkConfig, ResolvedOutputs};
use coinche_bench::logging::init_logging;
use coinche_bench::tournament::TournamentRunner;

/// Tournament harness for Coinche agents.
#[derive(Debug, Parser)]
#[command(
    name = "coinche-bench",
    author,
    version,
    about = "Deterministic Coinche tournament harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for game generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of seatings each game is replayed under.
    #[arg(long, value_name = "COUNT")]
    permutations: Option<usize>,

    /// Override the score a team must reach to win a game.
    #[arg(long, value_name = "POINTS")]
    winning_score: Option<u32>,

    /// Exit after validating the configuration (no tournament is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(permutations) = cli.permutations {
        config.games.permutations = permutations;
    }

    if let Some(winning_score) = cli.winning_score {
        config.games.table.winning_score = winning_score;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games.count;
    let permutations = config.games.permutations;

    println!(
        "Loaded configuration '{run_id}' ({games} game{}, {permutations} seating{}, playing to {})",
        if games == 1 { "" } else { "s" },
        if permutations == 1 { "" } else { "s" },
        config.games.table.winning_score
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = TournamentRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: tournament execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Tournament complete for '{run_id}': {} games × {} seatings → {} rows at {}",
        summary.games_played,
        summary.seatings,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
