//! Squirrel Ring Library
//!
//! Partitions a synthetic dataset of nuts across a fixed ring of squirrels, lets every
//! squirrel average the weights of its own share, and circulates those averages to each
//! squirrel's left and right neighbors. The binary (`main.rs`) is a thin wrapper around
//! `executor::executor::SquirrelExecutor`.
//!
//! ## Architecture Modules
//! - **`config`**: Run constants (worker count, dataset size, seed) handed to every participant.
//! - **`dataset`**: Seeded dataset generation and the randomized, non-empty partitioner.
//! - **`executor`**: Worker tasks, segment distribution, local aggregation and the
//!   all-gather ring exchange.
//! - **`membership`**: Worker identity, coordinator role, ring topology and the lifecycle roster.
//! - **`report`**: Output records, their text/JSON forms, parsing and ring verification.
//! - **`error`**: The fatal error taxonomy and its exit codes.

pub mod config;
pub mod dataset;
pub mod error;
pub mod executor;
pub mod membership;
pub mod report;
