use dashmap::DashMap;
use std::sync::Arc;

use super::types::{RingTopology, WorkerId, WorkerState};

/// Concurrent view of every participant's progress through a run.
///
/// Workers and the ring exchange collector record progress here; the
/// executor summarizes it when a run fails.
pub struct Roster {
    pub ring: RingTopology,
    members: DashMap<WorkerId, WorkerState>,
}

impl Roster {
    pub fn new(ring: RingTopology) -> Arc<Self> {
        Arc::new(Self {
            ring,
            members: DashMap::new(),
        })
    }

    /// Registers a worker. Re-joining an already known worker is a no-op.
    pub fn join(&self, worker: WorkerId) {
        self.members.entry(worker).or_insert(WorkerState::Joined);
        tracing::debug!("Squirrel {} joined", worker);
    }

    /// Moves a worker forward in its lifecycle.
    ///
    /// Returns `false` (and leaves the state untouched) for unknown workers
    /// and backward transitions.
    pub fn advance(&self, worker: WorkerId, next: WorkerState) -> bool {
        match self.members.get_mut(&worker) {
            Some(mut entry) => {
                if !entry.can_advance_to(&next) {
                    tracing::trace!(
                        "Ignoring transition {:?} -> {:?} for squirrel {}",
                        *entry,
                        next,
                        worker
                    );
                    return false;
                }
                *entry = next;
                true
            }
            None => false,
        }
    }

    pub fn mark_failed(&self, worker: WorkerId, reason: impl Into<String>) {
        // The reason reaches the user once, through the run's root cause.
        tracing::debug!("Squirrel {} failed", worker);
        self.members.insert(
            worker,
            WorkerState::Failed {
                reason: reason.into(),
            },
        );
    }

    pub fn state(&self, worker: WorkerId) -> Option<WorkerState> {
        self.members.get(&worker).map(|entry| entry.value().clone())
    }

    /// Returns `(joined, received, published, reported, failed)` counts.
    pub fn state_counts(&self) -> (usize, usize, usize, usize, usize) {
        let mut joined = 0;
        let mut received = 0;
        let mut published = 0;
        let mut reported = 0;
        let mut failed = 0;

        for entry in self.members.iter() {
            match entry.value() {
                WorkerState::Joined => joined += 1,
                WorkerState::SegmentReceived { .. } => received += 1,
                WorkerState::Published => published += 1,
                WorkerState::Reported => reported += 1,
                WorkerState::Failed { .. } => failed += 1,
            }
        }

        (joined, received, published, reported, failed)
    }
}
