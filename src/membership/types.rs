use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a squirrel in the ring (`0..N`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(pub usize);

impl WorkerId {
    pub const COORDINATOR: WorkerId = WorkerId(0);

    /// The role this worker plays in the run.
    pub fn role(&self) -> Role {
        if *self == Self::COORDINATOR {
            Role::Coordinator
        } else {
            Role::Worker
        }
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Capability of a participant.
///
/// The coordinator generates and distributes the dataset and then takes part
/// in the run like every other worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Coordinator,
    Worker,
}

impl Role {
    pub fn is_coordinator(&self) -> bool {
        matches!(self, Role::Coordinator)
    }
}

/// Lifecycle of a single squirrel within one run.
///
/// States only move forward; `Failed` is terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerState {
    Joined,
    SegmentReceived { nuts: usize },
    Published,
    Reported,
    Failed { reason: String },
}

impl WorkerState {
    fn rank(&self) -> u8 {
        match self {
            WorkerState::Joined => 0,
            WorkerState::SegmentReceived { .. } => 1,
            WorkerState::Published => 2,
            WorkerState::Reported => 3,
            WorkerState::Failed { .. } => 4,
        }
    }

    /// Whether moving from `self` to `next` is a forward transition.
    pub fn can_advance_to(&self, next: &WorkerState) -> bool {
        !matches!(self, WorkerState::Failed { .. }) && next.rank() > self.rank()
    }
}

/// Circular neighbor relation over `0..size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingTopology {
    size: usize,
}

impl RingTopology {
    /// `size` must be at least 1.
    pub fn new(size: usize) -> Self {
        debug_assert!(size > 0, "ring needs at least one member");
        Self { size }
    }

    /// `(i - 1 + N) mod N`
    pub fn left_of(&self, worker: WorkerId) -> WorkerId {
        WorkerId((worker.0 + self.size - 1) % self.size)
    }

    /// `(i + 1) mod N`
    pub fn right_of(&self, worker: WorkerId) -> WorkerId {
        WorkerId((worker.0 + 1) % self.size)
    }

    pub fn members(&self) -> impl Iterator<Item = WorkerId> {
        (0..self.size).map(WorkerId)
    }
}
