//! Run configuration shared by every participant.
//!
//! Each worker receives its own clone of the same `RunConfig` at spawn time,
//! so the constants (worker count, dataset size, seed) never live in a global.

use crate::error::{Result, SquirrelError};

/// Number of squirrels the program is built to run with.
pub const DEFAULT_SQUIRRELS: usize = 4;

/// Total number of nuts in the generated dataset.
pub const DEFAULT_TOTAL_NUTS: usize = 1_000_298;

/// Seed for the dataset and partition generator.
pub const DEFAULT_SEED: u64 = 42;

pub const DEFAULT_MIN_WEIGHT: f64 = 0.1;
pub const DEFAULT_MAX_WEIGHT: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Worker count the run must be launched with (N).
    pub expected_workers: usize,

    /// Worker count the run was actually launched with.
    pub launched_workers: usize,

    /// Dataset size (TotalCount).
    pub total_nuts: usize,

    pub seed: u64,

    /// Inclusive weight range for generated nuts.
    pub min_weight: f64,
    pub max_weight: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            expected_workers: DEFAULT_SQUIRRELS,
            launched_workers: DEFAULT_SQUIRRELS,
            total_nuts: DEFAULT_TOTAL_NUTS,
            seed: DEFAULT_SEED,
            min_weight: DEFAULT_MIN_WEIGHT,
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }
}

impl RunConfig {
    /// Config for `workers` squirrels launched with exactly `workers` units.
    pub fn new(workers: usize, total_nuts: usize) -> Self {
        Self {
            expected_workers: workers,
            launched_workers: workers,
            total_nuts,
            ..Self::default()
        }
    }

    pub fn with_launched_workers(mut self, launched: usize) -> Self {
        self.launched_workers = launched;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_weight_range(mut self, min: f64, max: f64) -> Self {
        self.min_weight = min;
        self.max_weight = max;
        self
    }

    /// Checks parameter ranges.
    ///
    /// A launched/expected mismatch is not rejected here; each worker runs the
    /// launch guard itself.
    pub fn validate(&self) -> Result<()> {
        if self.expected_workers == 0 {
            return Err(SquirrelError::InvalidConfig(
                "expected worker count must be at least 1".to_string(),
            ));
        }
        if self.launched_workers == 0 {
            return Err(SquirrelError::InvalidConfig(
                "launched worker count must be at least 1".to_string(),
            ));
        }
        if !self.min_weight.is_finite() || !self.max_weight.is_finite() {
            return Err(SquirrelError::InvalidConfig(
                "weight range must be finite".to_string(),
            ));
        }
        if self.min_weight < 0.0 || self.min_weight > self.max_weight {
            return Err(SquirrelError::InvalidConfig(format!(
                "weight range [{}, {}] must be non-negative and ordered",
                self.min_weight, self.max_weight
            )));
        }
        Ok(())
    }
}
