//! Camel race odds CLI
//!
//! Prints the leg ranking distribution of a board, exactly or by sampling,
//! and times the exact search.

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cu_core::{EstimatorConfig, Game, Scenario};

#[derive(Parser)]
#[command(name = "camel-odds")]
#[command(about = "Leg ranking odds for a stacking camel race", long_about = None)]
struct Cli {
    /// Scenario JSON file (board and dice left); the opening board if omitted
    #[arg(long, global = true)]
    scenario: Option<PathBuf>,

    /// Random seed for the die pyramid (default: current time)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Write timing samples as JSON to this file
    #[arg(long, global = true)]
    prof: Option<PathBuf>,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate every outcome of the current leg
    Exact,

    /// Estimate the distribution from random legs
    Simulate {
        /// Number of simulated legs
        #[arg(long, default_value_t = 1000)]
        samples: usize,

        /// Spread the samples over all cores
        #[arg(long, default_value = "false")]
        parallel: bool,

        /// Sample streams for --parallel (0: a fixed default, independent of core count)
        #[arg(long, default_value_t = 0)]
        workers: usize,
    },

    /// Time repeated exact searches
    Bench {
        /// Number of timed searches
        #[arg(long, default_value_t = 1000)]
        samples: usize,
    },
}

#[derive(Serialize)]
struct TimingReport<'a> {
    command: &'a str,
    seed: u64,
    samples: usize,
    mean_ms: f64,
    variance_ms2: f64,
    times_ns: &'a [f64],
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let seed = cli.seed.unwrap_or_else(clock_seed);
    println!("Seed: {seed}");

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => Scenario::default_opening(),
    };
    let mut game = Game::from_scenario(&scenario, seed).context("invalid board")?;
    println!("Game state:\n{game}\n");

    match cli.command.unwrap_or(Commands::Bench { samples: 1000 }) {
        Commands::Exact => {
            let start = Instant::now();
            let distribution = game.compute_leg_ranking_distribution();
            let elapsed = start.elapsed();
            println!("{distribution}");
            println!("Search time: {:.2} ms", elapsed.as_secs_f64() * 1000.0);
            if let Some(path) = &cli.prof {
                write_timings(path, "exact", seed, &[elapsed.as_nanos() as f64])?;
            }
        }

        Commands::Simulate { samples, parallel, workers } => {
            let config = EstimatorConfig { samples, seed, parallel, workers };
            if parallel {
                println!("Sample streams: {}", config.effective_workers());
            }
            let start = Instant::now();
            let distribution = game.estimate(&config).context("invalid estimator settings")?;
            let elapsed = start.elapsed();
            println!("{distribution}");
            println!("Sampling time: {:.2} ms", elapsed.as_secs_f64() * 1000.0);
            if let Some(path) = &cli.prof {
                write_timings(path, "simulate", seed, &[elapsed.as_nanos() as f64])?;
            }
        }

        Commands::Bench { samples } => {
            anyhow::ensure!(samples > 0, "bench needs at least one sample");
            info!("timing {samples} exact searches");
            let times: Vec<f64> = (0..samples)
                .map(|_| {
                    let start = Instant::now();
                    game.compute_leg_ranking_distribution();
                    start.elapsed().as_nanos() as f64
                })
                .collect();
            let (mean, variance) = mean_variance(&times);
            println!("Search time stats:");
            println!("Mean: {:5.2} ms", mean / 1e6);
            println!("Variance: {:.6} ms squared", variance / 1e12);
            if let Some(path) = &cli.prof {
                write_timings(path, "bench", seed, &times)?;
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn clock_seed() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos() as u64).unwrap_or_default()
}

/// Mean and unbiased variance.
fn mean_variance(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance)
}

fn write_timings(path: &Path, command: &str, seed: u64, times_ns: &[f64]) -> Result<()> {
    let (mean, variance) = mean_variance(times_ns);
    let report = TimingReport {
        command,
        seed,
        samples: times_ns.len(),
        mean_ms: mean / 1e6,
        variance_ms2: variance / 1e12,
        times_ns,
    };
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write timings to {}", path.display()))?;
    println!("\nTimings saved to: {}", path.display());
    Ok(())
}
