//! Membership & Ring Topology Module
//!
//! Tracks who takes part in a run and how the participants are wired together.
//!
//! ## Core Concepts
//! - **Identity**: Every squirrel is a `WorkerId` in `0..N`. Worker 0 additionally holds the
//!   `Coordinator` role and is the only one allowed to generate and partition the dataset.
//! - **Ring**: `RingTopology` fixes the left/right neighbor of each worker for the run's lifetime.
//! - **Roster**: A concurrent registry of per-worker lifecycle states, summarized when a run
//!   fails.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;
