use super::types::SquirrelRecord;
use crate::membership::types::{RingTopology, WorkerId};

use std::collections::BTreeMap;
use thiserror::Error;

/// Largest accepted difference between a neighbor value and the neighbor's own average.
pub const NEIGHBOR_TOLERANCE: f64 = 1e-9;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RingViolation {
    #[error("expected {expected} records, found {actual}")]
    RecordCount { expected: usize, actual: usize },

    #[error("squirrel {0} reported more than once")]
    DuplicateId(usize),

    #[error("squirrel {0} is not part of the ring")]
    UnknownId(usize),

    #[error("nut counts sum to {actual}, expected {expected}")]
    NutTotal { expected: usize, actual: usize },

    #[error("squirrel {0} holds no nuts")]
    EmptySegment(usize),

    #[error("squirrel {id} reports {side} = {reported}, neighbor {neighbor} has {actual}")]
    NeighborMismatch {
        id: usize,
        side: &'static str,
        neighbor: usize,
        reported: f64,
        actual: f64,
    },

    #[error("squirrel {0} reports a negative weight")]
    NegativeWeight(usize),
}

/// Checks a full set of records against the ring invariants.
///
/// `workers` records with ids `0..workers`, nut counts summing to
/// `total_nuts`, no empty segment, non-negative values, and every
/// `left`/`right` equal to the neighbor's `avg`.
pub fn verify_ring(
    records: &[SquirrelRecord],
    workers: usize,
    total_nuts: usize,
) -> Result<(), RingViolation> {
    if records.len() != workers {
        return Err(RingViolation::RecordCount {
            expected: workers,
            actual: records.len(),
        });
    }

    let mut by_id = BTreeMap::new();
    for record in records {
        if record.id >= workers {
            return Err(RingViolation::UnknownId(record.id));
        }
        if by_id.insert(record.id, record).is_some() {
            return Err(RingViolation::DuplicateId(record.id));
        }
    }

    let actual: usize = records.iter().map(|r| r.nuts).sum();
    if actual != total_nuts {
        return Err(RingViolation::NutTotal {
            expected: total_nuts,
            actual,
        });
    }

    if by_id.is_empty() {
        return Ok(());
    }

    let ring = RingTopology::new(workers);
    for (&id, record) in &by_id {
        if record.nuts == 0 {
            return Err(RingViolation::EmptySegment(id));
        }
        if record.avg < 0.0 || record.left < 0.0 || record.right < 0.0 {
            return Err(RingViolation::NegativeWeight(id));
        }

        let left = ring.left_of(WorkerId(id)).0;
        let right = ring.right_of(WorkerId(id)).0;

        for (side, neighbor, reported) in [("left", left, record.left), ("right", right, record.right)] {
            let actual = by_id[&neighbor].avg;
            if (reported - actual).abs() > NEIGHBOR_TOLERANCE {
                return Err(RingViolation::NeighborMismatch {
                    id,
                    side,
                    neighbor,
                    reported,
                    actual,
                });
            }
        }
    }

    Ok(())
}
