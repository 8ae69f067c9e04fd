use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::partitioner::PartitionPlan;
use crate::config::RunConfig;
use crate::error::Result;

/// Ordered sequence of nut weights. Lives on the coordinator until it is split.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    nuts: Vec<f64>,
}

impl Dataset {
    pub fn from_weights(nuts: Vec<f64>) -> Self {
        Self { nuts }
    }

    pub fn len(&self) -> usize {
        self.nuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nuts.is_empty()
    }

    pub fn weights(&self) -> &[f64] {
        &self.nuts
    }

    /// Consumes the dataset and cuts it into one owned segment per worker,
    /// in worker order.
    ///
    /// The plan is validated against the dataset length first; a plan that
    /// does not cover the dataset exactly is an internal consistency fault.
    pub fn into_segments(self, plan: &PartitionPlan) -> Result<Vec<Vec<f64>>> {
        plan.validate(self.nuts.len())?;

        let mut items = self.nuts.into_iter();
        let segments = plan
            .segments()
            .iter()
            .map(|segment| items.by_ref().take(segment.len).collect())
            .collect();

        Ok(segments)
    }
}

/// Seeded source of nuts.
///
/// The partitioner draws its cut points from the same RNG stream, which keeps
/// the whole setup phase reproducible from a single seed.
pub struct DatasetGenerator {
    rng: StdRng,
    min_weight: f64,
    max_weight: f64,
}

impl DatasetGenerator {
    pub fn new(seed: u64, min_weight: f64, max_weight: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            min_weight,
            max_weight,
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.seed, config.min_weight, config.max_weight)
    }

    /// Draws `total` weights uniformly from `[min_weight, max_weight]`.
    pub fn generate(&mut self, total: usize) -> Dataset {
        let (min, max) = (self.min_weight, self.max_weight);
        let nuts = (0..total)
            .map(|_| self.rng.gen_range(min..=max))
            .collect();

        tracing::debug!(
            "Generated {} nuts with weights in [{}, {}]",
            total,
            min,
            max
        );

        Dataset { nuts }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
