use rand::Rng;

use crate::error::{Result, SquirrelError};
use crate::membership::types::WorkerId;

/// The slice of the dataset assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub worker: WorkerId,
    pub offset: usize,
    pub len: usize,
}

/// Mapping from worker index to `(offset, len)`.
///
/// Offsets are contiguous: `offset[i + 1] == offset[i] + len[i]`, starting at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    segments: Vec<Segment>,
}

impl PartitionPlan {
    /// Builds a plan from per-worker lengths, deriving contiguous offsets.
    pub fn from_lengths(lengths: &[usize]) -> Self {
        let mut offset = 0;
        let segments = lengths
            .iter()
            .enumerate()
            .map(|(i, &len)| {
                let segment = Segment {
                    worker: WorkerId(i),
                    offset,
                    len,
                };
                offset += len;
                segment
            })
            .collect();

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, worker: WorkerId) -> Option<&Segment> {
        self.segments.get(worker.0)
    }

    pub fn worker_count(&self) -> usize {
        self.segments.len()
    }

    pub fn lengths(&self) -> Vec<usize> {
        self.segments.iter().map(|s| s.len).collect()
    }

    pub fn total(&self) -> usize {
        self.segments.iter().map(|s| s.len).sum()
    }

    /// Checks that the plan covers exactly `expected` nuts.
    pub fn validate(&self, expected: usize) -> Result<()> {
        let actual = self.total();
        if actual != expected {
            return Err(SquirrelError::PartitionSumMismatch { expected, actual });
        }
        Ok(())
    }
}

/// Splits `TotalCount` nuts across a fixed number of workers.
///
/// Every worker is guaranteed one nut; the remaining `TotalCount - N` are
/// divided by `N - 1` sorted random cut points, so segment sizes vary from run
/// to run while always summing to `TotalCount`.
pub struct Partitioner {
    workers: usize,
}

impl Partitioner {
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    pub fn plan<R: Rng>(&self, total: usize, rng: &mut R) -> Result<PartitionPlan> {
        if self.workers == 0 {
            return Err(SquirrelError::InvalidConfig(
                "cannot partition across zero squirrels".to_string(),
            ));
        }
        if total < self.workers {
            return Err(SquirrelError::InsufficientNuts {
                total,
                workers: self.workers,
            });
        }

        let remaining = total - self.workers;

        let mut cuts: Vec<usize> = (0..self.workers - 1)
            .map(|_| rng.gen_range(0..=remaining))
            .collect();
        cuts.sort_unstable();

        let lengths: Vec<usize> = (0..self.workers)
            .map(|i| {
                let lower = if i == 0 { 0 } else { cuts[i - 1] };
                let upper = if i == self.workers - 1 {
                    remaining
                } else {
                    cuts[i]
                };
                1 + (upper - lower)
            })
            .collect();

        let plan = PartitionPlan::from_lengths(&lengths);
        plan.validate(total)?;

        tracing::debug!("Partition plan for {} nuts: {:?}", total, lengths);

        Ok(plan)
    }
}
