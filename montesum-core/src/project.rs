//! Result projection — flatten the grid into ordered output rows.
//!
//! Rows are produced lazily in simulation-major, group-minor order. Sums are
//! formatted through f64's `Display`: shortest round-trip decimal, never
//! scientific notation, no truncation.

use crate::grid::SummaryGrid;

/// One output row: a (simulation, group) pair and its accumulated sums.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRow {
    pub simulation: usize,
    pub group: usize,
    pub sums: [f64; 3],
}

impl OutputRow {
    /// The row as five decimal text fields, in output column order.
    pub fn to_fields(&self) -> [String; 5] {
        [
            self.simulation.to_string(),
            self.group.to_string(),
            self.sums[0].to_string(),
            self.sums[1].to_string(),
            self.sums[2].to_string(),
        ]
    }
}

/// Lazily enumerate the grid as output rows.
///
/// Pure read of the grid; yields simulations × groups rows.
pub fn project(grid: &SummaryGrid) -> impl Iterator<Item = OutputRow> + '_ {
    grid.sim_rows().enumerate().flat_map(|(simulation, row)| {
        row.iter().enumerate().map(move |(group, cell)| OutputRow {
            simulation,
            group,
            sums: cell.sums,
        })
    })
}
