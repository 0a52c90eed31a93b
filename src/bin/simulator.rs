//! Spellquest headless practice simulator
//!
//! Plays simulated learners through the real session engine and prints
//! balance statistics.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use spellquest::simulator::{run_simulation, SimConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    Average,
    Strong,
    Struggling,
}

#[derive(Debug, Parser)]
#[command(name = "simulator", about = "Spellquest practice balance simulator")]
struct Args {
    /// Learner model to start from
    #[arg(long, value_enum, default_value = "average")]
    profile: Profile,

    /// Number of simulated learners
    #[arg(long)]
    runs: Option<u32>,

    /// RNG seed; learner N uses seed + N
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Sessions per learner
    #[arg(long)]
    sessions: Option<u32>,

    /// Words per session
    #[arg(long)]
    words: Option<u32>,

    /// First-round accuracy (0.0 - 1.0)
    #[arg(long)]
    accuracy: Option<f64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Per-learner output and debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match args.profile {
        Profile::Average => SimConfig::default(),
        Profile::Strong => SimConfig::strong_speller(),
        Profile::Struggling => SimConfig::struggling_speller(),
    };
    config.seed = Some(args.seed);
    config.verbosity = if args.verbose { 2 } else { 1 };
    if let Some(runs) = args.runs {
        config.num_runs = runs;
    }
    if let Some(sessions) = args.sessions {
        config.sessions_per_run = sessions;
    }
    if let Some(words) = args.words {
        config.words_per_session = words;
    }
    if let Some(accuracy) = args.accuracy {
        if !(0.0..=1.0).contains(&accuracy) {
            bail!("--accuracy must be between 0.0 and 1.0, got {}", accuracy);
        }
        config.accuracy = accuracy;
    }

    eprintln!(
        "Simulating {} learners x {} sessions (seed={})",
        config.num_runs, config.sessions_per_run, args.seed
    );
    let report = run_simulation(&config).context("simulation failed")?;

    if args.json {
        println!("{}", report.to_json());
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
