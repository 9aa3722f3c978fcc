//! Weight distribution — normalized cumulative table and inverse-CDF lookup.
//!
//! A sequence of N relative weights defines N groups, identified by input
//! position. The builder normalizes them into a running-sum table in (0,1]
//! whose last entry is 1.0; assignment maps a uniform draw in [0,1) to the
//! group whose bucket contains it.
//!
//! Key design choices:
//! - Left-closed buckets: bucket i covers [table[i-1], table[i]) with
//!   table[-1] = 0, so a draw exactly equal to a boundary falls into the
//!   next higher group.
//! - A zero weight repeats the previous cumulative value, making that group
//!   unreachable from [0,1) draws; a boundary-equal draw skips the whole
//!   run of tied entries and lands in the first later non-empty bucket.
//! - Draws >= the last entry (floating rounding) clamp to the last index.

use thiserror::Error;

/// Errors from weight distribution construction.
#[derive(Debug, Error, PartialEq)]
pub enum WeightError {
    #[error("no weights supplied; at least one group is required")]
    Empty,
    #[error("weight {value} at position {index} is negative")]
    Negative { index: usize, value: f64 },
    #[error("weight at position {index} is not finite")]
    NonFinite { index: usize },
    #[error("all weights are zero; total weight must be positive")]
    ZeroTotal,
}

/// Normalized cumulative distribution over weighted groups.
///
/// Immutable once built. For identical input weights the table is
/// bit-for-bit identical across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightDistribution {
    cumulative: Vec<f64>,
}

impl WeightDistribution {
    /// Build the cumulative table from relative weights.
    ///
    /// Each entry is the running sum of weights divided by the total, in
    /// input order. Requires at least one weight, every weight finite and
    /// non-negative, and a positive total.
    pub fn from_weights(weights: &[f64]) -> Result<Self, WeightError> {
        if weights.is_empty() {
            return Err(WeightError::Empty);
        }
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() {
                return Err(WeightError::NonFinite { index });
            }
            if value < 0.0 {
                return Err(WeightError::Negative { index, value });
            }
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(WeightError::ZeroTotal);
        }

        let mut cumulative = Vec::with_capacity(weights.len());
        let mut running = 0.0;
        for &weight in weights {
            running += weight;
            cumulative.push(running / total);
        }

        Ok(Self { cumulative })
    }

    /// Number of groups.
    pub fn groups(&self) -> usize {
        self.cumulative.len()
    }

    /// The cumulative table entries.
    pub fn table(&self) -> &[f64] {
        &self.cumulative
    }

    /// Resolve a draw in [0,1) to a group index.
    ///
    /// Returns the lowest index i with `draw < table[i]`; if rounding pushes
    /// a draw to or past the last entry, the last index. Binary search over
    /// the sorted table gives the same answer as the linear `<` scan,
    /// boundary ties included.
    pub fn group_for(&self, draw: f64) -> usize {
        let i = self.cumulative.partition_point(|&c| draw >= c);
        i.min(self.cumulative.len() - 1)
    }
}
