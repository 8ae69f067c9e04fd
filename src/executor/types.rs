use crate::membership::types::{RingTopology, WorkerId};
use serde::{Deserialize, Serialize};

/// Unique identifier for a single run, attached to every log line of that run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(pub String);

impl RunId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

/// A worker's own result: how many nuts it holds and their mean weight.
///
/// Computed once, then shared read-only with every other worker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LocalStatistic {
    pub nuts: usize,
    pub mean: f64,
}

/// What one worker sees after the ring exchange.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborView {
    pub worker: WorkerId,
    pub own: LocalStatistic,
    pub left: LocalStatistic,
    pub right: LocalStatistic,
}

/// Complete, immutable set of statistics, indexed by worker.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticTable {
    ring: RingTopology,
    stats: Vec<LocalStatistic>,
}

impl StatisticTable {
    /// `stats[i]` must belong to worker `i`; the table must not be empty.
    pub fn new(stats: Vec<LocalStatistic>) -> Self {
        Self {
            ring: RingTopology::new(stats.len()),
            stats,
        }
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn get(&self, worker: WorkerId) -> Option<&LocalStatistic> {
        self.stats.get(worker.0)
    }

    pub fn total_nuts(&self) -> usize {
        self.stats.iter().map(|s| s.nuts).sum()
    }

    /// Own, left and right statistics of `worker`, or `None` if it is not in the ring.
    pub fn neighbors(&self, worker: WorkerId) -> Option<NeighborView> {
        let own = *self.get(worker)?;
        let left = self.stats[self.ring.left_of(worker).0];
        let right = self.stats[self.ring.right_of(worker).0];

        Some(NeighborView {
            worker,
            own,
            left,
            right,
        })
    }
}
