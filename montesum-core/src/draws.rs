//! Deterministic bulk uniform draw generation.
//!
//! One draw per simulation index is consumed for every input record, so the
//! generator must fill batches in the tens of thousands without per-value
//! call overhead. The `DrawSource` trait is the seam: the driver owns a
//! reusable buffer and asks the source to overwrite it once per record.
//!
//! The production source is a seeded `StdRng`. The contract is statistical,
//! not bit-level: uniform in [0,1), reseedable, and deterministic for a
//! fixed seed and call order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 1234;

/// A seedable source of uniform draws in [0,1).
///
/// `fill_batch` overwrites the entire buffer with fresh independent draws
/// and advances internal state, so consecutive calls never repeat a batch.
pub trait DrawSource: Send {
    fn fill_batch(&mut self, buffer: &mut [f64]);
}

/// Production draw source backed by a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: StdRng,
}

impl UniformSource {
    /// Create a source with deterministic state derived from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for UniformSource {
    fn default() -> Self {
        Self::seeded(DEFAULT_SEED)
    }
}

impl DrawSource for UniformSource {
    fn fill_batch(&mut self, buffer: &mut [f64]) {
        // rand's Standard f64 sampling is the half-open uniform [0,1).
        for slot in buffer.iter_mut() {
            *slot = self.rng.gen();
        }
    }
}
