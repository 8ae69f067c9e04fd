//! Dataset Module
//!
//! Produces the nuts and decides who gets which of them. Everything here runs on the
//! coordinator only, during the setup phase of a run.
//!
//! ## Core Concepts
//! - **Generation**: `DatasetGenerator` draws `TotalCount` weights from a seeded RNG, so a
//!   given seed always yields the same dataset.
//! - **Partitioning**: `Partitioner` cuts the dataset into N contiguous, non-empty segments
//!   of random length. The resulting `PartitionPlan` is checked to cover the dataset exactly
//!   before anything is handed out.

pub mod generator;
pub mod partitioner;

#[cfg(test)]
mod tests;
