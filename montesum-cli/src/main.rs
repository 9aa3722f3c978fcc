//! montesum — weighted Monte-Carlo resampling over streamed CSV records.
//!
//! Reads headerless CSV from stdin (or `--input`), runs the configured
//! number of simulations per record, and writes one summed row per
//! (simulation, group) pair to stdout (or `--output`):
//!
//! ```text
//! cat samples.csv | montesum --simulations 10000 --weights 5 --weights 5 > results.csv
//! montesum --config run.toml --input samples.csv --output results.csv \
//!          --manifest run.json --parallel --header
//! ```
//!
//! Configuration resolution: built-in defaults, then `--config` TOML file,
//! then explicit flags. Fatal errors leave stdout untouched and exit nonzero.

mod config;
mod io;
mod manifest;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use montesum_core::{RunConfig, RunStats, Simulation};

use crate::config::FileConfig;
use crate::io::{open_input, open_output, write_summaries, CsvSource};
use crate::manifest::{write_manifest, RunManifest};

#[derive(Debug, Parser)]
#[command(
    name = "montesum",
    about = "Weighted Monte-Carlo resampling over streamed CSV records"
)]
struct Cli {
    /// Number of simulations to run per record. Defaults to 10000.
    #[arg(long)]
    simulations: Option<usize>,

    /// Relative weight for one group; repeat once per group, in group order.
    #[arg(long = "weights", value_name = "WEIGHT")]
    weights: Vec<f64>,

    /// Random seed. Defaults to 1234.
    #[arg(long)]
    seed: Option<u64>,

    /// Accumulate each record's batch across rayon workers.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Input CSV file. Defaults to stdin.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output CSV file. Defaults to stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write a header row before the summary rows.
    #[arg(long, default_value_t = false)]
    header: bool,

    /// TOML run-configuration file. Flags override file values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON reproducibility manifest here after a successful run.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Suppress the end-of-run summary on stderr.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

impl Cli {
    /// Resolve the run configuration: defaults, then file, then flags.
    fn resolve_config(&self) -> Result<RunConfig> {
        let mut resolved = match &self.config {
            Some(path) => FileConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
                .apply(RunConfig::default()),
            None => RunConfig::default(),
        };

        if let Some(simulations) = self.simulations {
            resolved.simulations = simulations;
        }
        if !self.weights.is_empty() {
            resolved.weights = self.weights.clone();
        }
        if let Some(seed) = self.seed {
            resolved.seed = seed;
        }
        if self.parallel {
            resolved.parallel = true;
        }
        Ok(resolved)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let started = Instant::now();
    let stats = run_pipeline(&cli, &config)?;
    let elapsed = started.elapsed();

    if !cli.quiet {
        print_summary(&config, stats, elapsed.as_millis());
    }

    if let Some(path) = &cli.manifest {
        let manifest = RunManifest::new(&config, stats, elapsed);
        write_manifest(path, &manifest)?;
    }

    Ok(())
}

/// Stream input through the simulation and write the projected grid.
///
/// Output is written only after the driver has consumed the whole stream, so
/// a fatal mid-stream error produces no partial rows.
fn run_pipeline(cli: &Cli, config: &RunConfig) -> Result<RunStats> {
    let mut simulation = Simulation::new(config)?;

    let reader = open_input(cli.input.as_deref())?;
    let mut source = CsvSource::new(reader);
    let stats = simulation.run(&mut source)?;

    let writer = open_output(cli.output.as_deref())?;
    write_summaries(writer, simulation.grid(), cli.header)?;

    Ok(stats)
}

fn print_summary(config: &RunConfig, stats: RunStats, elapsed_ms: u128) {
    eprintln!(
        "montesum: {} records, {} draws, {} simulations x {} groups, {}ms",
        stats.records,
        stats.draws,
        config.simulations,
        config.weights.len(),
        elapsed_ms
    );
}
