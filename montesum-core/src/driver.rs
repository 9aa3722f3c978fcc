//! Simulation driver — per-record resampling cycle over the input stream.
//!
//! Construction allocates the grid, builds the weight distribution, and
//! seeds the draw source. Streaming consumes exactly one draw batch per
//! record in input order: parse, fill one draw per simulation index, resolve
//! each draw to a group, accumulate. A fixed seed and fixed input order
//! therefore reproduce every assignment; reordering records changes all
//! downstream assignments.
//!
//! Key design choices:
//! - Fail-fast: the first malformed record or source failure aborts the run
//!   with the record's ordinal. No partial results survive.
//! - The draw batch is always filled sequentially before any accumulation,
//!   so parallel and sequential runs produce identical grids.
//! - Parallel accumulation zips disjoint grid rows with draw values; no
//!   locks anywhere (per-cell mutexes deliberately rejected).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draws::{DrawSource, UniformSource, DEFAULT_SEED};
use crate::grid::SummaryGrid;
use crate::record::{Observation, RecordError, LABEL_FIELD};
use crate::source::{RecordSource, SourceError};
use crate::weights::{WeightDistribution, WeightError};

/// Configuration for one resampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of independent simulations (grid rows).
    pub simulations: usize,
    /// Relative group weights, in group-index order.
    pub weights: Vec<f64>,
    /// Draw source seed.
    pub seed: u64,
    /// Accumulate each record's batch across rayon workers.
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            simulations: 10_000,
            weights: Vec::new(),
            seed: DEFAULT_SEED,
            parallel: false,
        }
    }
}

/// Counts accumulated over one run, for diagnostics and the manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Input records consumed.
    pub records: u64,
    /// Uniform draws generated (records × simulations).
    pub draws: u64,
}

/// Errors from configuring or running a simulation.
///
/// Allocation failure is not modeled: Rust's global allocator aborts the
/// process, so there is no observable error to return.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid weights: {0}")]
    Weights(#[from] WeightError),
    #[error("simulation count must be positive")]
    NoSimulations,
    #[error("malformed record {record}{}: {source}", label_suffix(.label))]
    MalformedRecord {
        /// 1-based ordinal of the offending record.
        record: u64,
        /// The record's label, when one was readable.
        label: Option<String>,
        source: RecordError,
    },
    #[error("record source failed after {records} records: {source}")]
    Source { records: u64, source: SourceError },
}

fn label_suffix(label: &Option<String>) -> String {
    match label {
        Some(l) => format!(" (label {l:?})"),
        None => String::new(),
    }
}

/// One resampling run: distribution, draw source, grid, and the reusable
/// per-record draw batch.
pub struct Simulation {
    distribution: WeightDistribution,
    draws: Box<dyn DrawSource>,
    grid: SummaryGrid,
    batch: Vec<f64>,
    parallel: bool,
    stats: RunStats,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("distribution", &self.distribution)
            .field("grid", &self.grid)
            .field("batch", &self.batch)
            .field("parallel", &self.parallel)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Build a run from config with the production draw source.
    pub fn new(config: &RunConfig) -> Result<Self, RunError> {
        Self::with_draw_source(config, Box::new(UniformSource::seeded(config.seed)))
    }

    /// Build a run with an injected draw source (tests, alternative
    /// generators).
    pub fn with_draw_source(
        config: &RunConfig,
        draws: Box<dyn DrawSource>,
    ) -> Result<Self, RunError> {
        if config.simulations == 0 {
            return Err(RunError::NoSimulations);
        }
        let distribution = WeightDistribution::from_weights(&config.weights)?;
        let grid = SummaryGrid::new(config.simulations, distribution.groups());

        Ok(Self {
            distribution,
            draws,
            grid,
            batch: vec![0.0; config.simulations],
            parallel: config.parallel,
            stats: RunStats::default(),
        })
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn grid(&self) -> &SummaryGrid {
        &self.grid
    }

    pub fn distribution(&self) -> &WeightDistribution {
        &self.distribution
    }

    /// Run one per-record cycle.
    ///
    /// Parses the record, fills one draw per simulation index, and
    /// accumulates the measurements into each simulation's assigned group.
    pub fn process_record(&mut self, fields: &[String]) -> Result<(), RunError> {
        let ordinal = self.stats.records + 1;
        let observation =
            Observation::from_fields(fields).map_err(|source| RunError::MalformedRecord {
                record: ordinal,
                label: fields.get(LABEL_FIELD).cloned(),
                source,
            })?;

        self.draws.fill_batch(&mut self.batch);
        self.accumulate(&observation);

        self.stats.records = ordinal;
        self.stats.draws += self.batch.len() as u64;
        Ok(())
    }

    fn accumulate(&mut self, observation: &Observation) {
        let distribution = &self.distribution;
        let values = observation.values;

        if self.parallel {
            self.grid
                .par_sim_rows_mut()
                .zip(self.batch.par_iter())
                .for_each(|(row, &draw)| {
                    row[distribution.group_for(draw)].add(values);
                });
        } else {
            for (row, &draw) in self.grid.sim_rows_mut().zip(self.batch.iter()) {
                row[distribution.group_for(draw)].add(values);
            }
        }
    }

    /// Stream every record from the source through the per-record cycle.
    ///
    /// `Ok(None)` from the source ends the run cleanly; any read failure is
    /// fatal and reports how many records were already consumed.
    pub fn run(&mut self, source: &mut dyn RecordSource) -> Result<RunStats, RunError> {
        loop {
            let record = source.next_record().map_err(|source| RunError::Source {
                records: self.stats.records,
                source,
            })?;
            match record {
                Some(fields) => self.process_record(&fields)?,
                None => return Ok(self.stats),
            }
        }
    }

    /// Finish the run and take ownership of the completed grid.
    pub fn into_grid(self) -> SummaryGrid {
        self.grid
    }
}
