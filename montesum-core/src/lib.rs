//! Montesum Core — streaming weighted Monte-Carlo resampling engine.
//!
//! For each input record the driver draws one uniform value per simulation,
//! maps each draw to a weighted group via inverse-CDF lookup, and adds the
//! record's three measurements into a dense per-(simulation, group) summary
//! grid. The final grid supports bootstrap-style variance estimation across
//! many simulated reassignments of input rows to groups.
//!
//! Modules:
//! - Weight distribution and inverse-CDF assignment
//! - Seedable bulk uniform draw source
//! - Record parsing and the record-source seam
//! - Dense summary grid with lock-free partitioned accumulation
//! - Simulation driver orchestrating the per-record cycle
//! - Result projection into ordered output rows

pub mod draws;
pub mod driver;
pub mod grid;
pub mod project;
pub mod record;
pub mod source;
pub mod weights;

pub use draws::{DrawSource, UniformSource, DEFAULT_SEED};
pub use driver::{RunConfig, RunError, RunStats, Simulation};
pub use grid::{SummaryCell, SummaryGrid};
pub use project::{project, OutputRow};
pub use record::{Observation, RecordError};
pub use source::{MemorySource, RecordSource, SourceError};
pub use weights::{WeightDistribution, WeightError};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn grid_types_are_send_sync() {
        assert_send::<SummaryGrid>();
        assert_sync::<SummaryGrid>();
        assert_send::<SummaryCell>();
        assert_sync::<SummaryCell>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<RunConfig>();
        assert_sync::<RunConfig>();
        assert_send::<RunStats>();
        assert_sync::<RunStats>();
        assert_send::<WeightDistribution>();
        assert_sync::<WeightDistribution>();
    }

    #[test]
    fn draw_source_is_send() {
        assert_send::<UniformSource>();
        assert_send::<Box<dyn DrawSource>>();
    }
}
