//! Wire Protocol Definitions
//!
//! Frames exchanged between squirrels. Every frame is an `Envelope` serialized with
//! bincode, so workers never share memory, only bytes.
//!
//! A segment transfer is always exactly two frames, header then payload. Frames name the
//! worker they are addressed to (or, for statistics, the worker they come from).

use super::types::LocalStatistic;
use crate::error::Result;
use crate::membership::types::WorkerId;
use serde::{Deserialize, Serialize};

/// Encoded envelope.
pub type Frame = Vec<u8>;

/// Frames per segment transfer; also the capacity of each worker's inbox.
pub const SEGMENT_FRAMES: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Envelope {
    /// Announces how many nuts the following payload carries.
    SegmentHeader { worker: WorkerId, len: usize },

    /// The nuts themselves, in dataset order.
    SegmentPayload { worker: WorkerId, items: Vec<f64> },

    /// A worker publishing its local statistic to the ring exchange.
    Statistic {
        worker: WorkerId,
        stat: LocalStatistic,
    },
}

impl Envelope {
    pub fn worker(&self) -> WorkerId {
        match self {
            Envelope::SegmentHeader { worker, .. }
            | Envelope::SegmentPayload { worker, .. }
            | Envelope::Statistic { worker, .. } => *worker,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Envelope::SegmentHeader { .. } => "segment header",
            Envelope::SegmentPayload { .. } => "segment payload",
            Envelope::Statistic { .. } => "statistic",
        }
    }

    pub fn encode(&self) -> Result<Frame> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(frame: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(frame)?)
    }
}
