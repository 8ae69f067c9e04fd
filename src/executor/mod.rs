//! Squirrel Execution Module
//!
//! Runs one batch: N squirrels, one dataset, one ring exchange.
//!
//! ## Architecture Overview
//! Every squirrel is an independent tokio task. Tasks share no mutable state and talk
//! only through bincode frames on channels:
//! 1. **Distribution**: The coordinator (worker 0) generates and partitions the dataset, then
//!    sends each worker a `SegmentHeader` followed by a `SegmentPayload`, itself included.
//! 2. **Aggregation**: Each worker averages the weights of its own segment.
//! 3. **Ring Exchange**: Each worker submits its statistic to a collector and blocks until the
//!    collector broadcasts the complete table, then reads off its left and right neighbor.
//! 4. **Reporting**: Workers hand their records back to the executor, which returns them in id order.
//!
//! Any failure aborts the whole run; the executor surfaces the root cause.
//!
//! ## Submodules
//! - **`protocol`**: Wire frames and their bincode codec.
//! - **`distributor`**: Coordinator-to-worker segment transfer.
//! - **`aggregator`**: Local mean computation.
//! - **`exchange`**: The all-gather collective used for the ring step.
//! - **`executor`**: Spawns the workers and drives a run end to end.

pub mod aggregator;
pub mod distributor;
pub mod exchange;
pub mod executor;
pub mod protocol;
pub mod types;
