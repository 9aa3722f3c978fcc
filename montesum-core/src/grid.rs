//! Summary grid — dense per-(simulation, group) accumulation.
//!
//! The grid is one flat `Vec<SummaryCell>` in simulation-major order, fully
//! allocated and zeroed before any record is processed. Concurrency is
//! expressed as disjoint per-simulation row slices rather than per-cell
//! locks: each worker owns a range of simulation rows outright, so no two
//! workers can ever touch the same cell and the borrow checker enforces it.

use rayon::prelude::*;

/// Running sums of the three measurements for one (simulation, group) pair.
///
/// Mutated additively only; never reset mid-run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SummaryCell {
    pub sums: [f64; 3],
}

impl SummaryCell {
    /// Add one record's measurements into this cell.
    pub fn add(&mut self, values: [f64; 3]) {
        self.sums[0] += values[0];
        self.sums[1] += values[1];
        self.sums[2] += values[2];
    }
}

/// Dense (simulations × groups) grid of summary cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryGrid {
    cells: Vec<SummaryCell>,
    simulations: usize,
    groups: usize,
}

impl SummaryGrid {
    /// Allocate a zero-initialized grid.
    pub fn new(simulations: usize, groups: usize) -> Self {
        Self {
            cells: vec![SummaryCell::default(); simulations * groups],
            simulations,
            groups,
        }
    }

    pub fn simulations(&self) -> usize {
        self.simulations
    }

    pub fn groups(&self) -> usize {
        self.groups
    }

    /// One cell, by (simulation, group).
    pub fn cell(&self, simulation: usize, group: usize) -> &SummaryCell {
        &self.cells[simulation * self.groups + group]
    }

    /// Add measurements into exactly one cell.
    pub fn add(&mut self, simulation: usize, group: usize, values: [f64; 3]) {
        self.cells[simulation * self.groups + group].add(values);
    }

    /// All cells of one simulation, in group order.
    pub fn sim_row(&self, simulation: usize) -> &[SummaryCell] {
        let start = simulation * self.groups;
        &self.cells[start..start + self.groups]
    }

    /// Iterate simulation rows in simulation order.
    pub fn sim_rows(&self) -> impl Iterator<Item = &[SummaryCell]> {
        self.cells.chunks(self.groups)
    }

    /// Mutable simulation rows — disjoint slices, one per simulation.
    pub fn sim_rows_mut(&mut self) -> impl Iterator<Item = &mut [SummaryCell]> {
        self.cells.chunks_mut(self.groups)
    }

    /// Parallel mutable simulation rows for rayon workers.
    ///
    /// Each worker receives ownership of whole rows, so partitioning by
    /// simulation index is a compile-time fact, not a locking discipline.
    pub fn par_sim_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = &mut [SummaryCell]> {
        self.cells.par_chunks_mut(self.groups)
    }
}
