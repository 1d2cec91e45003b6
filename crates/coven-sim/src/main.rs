use std::path::PathBuf;

use clap::Parser;

use coven_sim::config::SimConfig;
use coven_sim::logging::init_logging;
use coven_sim::runner::SimRunner;

/// Balance-simulation harness for the Coven engine.
#[derive(Debug, Parser)]
#[command(
    name = "coven-sim",
    author,
    version,
    about = "Deterministic Coven balance-simulation harness"
)]
struct Cli {
    /// Path to the YAML configuration file (built-in defaults when absent).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the number of games to simulate.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the base RNG seed; games run on sequential seeds.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no games are run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config {
        Some(path) => SimConfig::from_path(&path)?,
        None => SimConfig::default(),
    };

    if let Some(games) = cli.games {
        config.games = games;
    }

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    config.validate()?;
    init_logging(&config.logging)?;

    let seats = config
        .seats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "Simulating {} game(s) from seed {} with seats [{}]",
        config.games, config.seed, seats
    );

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let summary = SimRunner::new(config).run()?;
    print!("{}", summary.render_table());
    Ok(())
}
