//! Reporting Module
//!
//! Turns per-worker results into output records and back.
//!
//! - **`types`**: `SquirrelRecord`, the five fields reported per worker.
//! - **`format`**: The exact text line consumed by external tooling, a JSON-lines variant,
//!   and a parser for the text line.
//! - **`verify`**: Cross-record checks (ids, totals, ring neighbor agreement).

pub mod format;
pub mod types;
pub mod verify;
