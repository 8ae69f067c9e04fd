//! Segment Distribution
//!
//! Point-to-point transfer of segments from the coordinator to every worker. Each worker
//! owns a bounded inbox sized for exactly one transfer, so the coordinator never blocks
//! on a slow receiver and no worker can receive another worker's nuts.

use super::protocol::{Envelope, Frame, SEGMENT_FRAMES};
use crate::error::{Result, SquirrelError};
use crate::membership::types::WorkerId;

use tokio::sync::mpsc;

/// Sending side, held by the coordinator only.
pub struct Distributor {
    outboxes: Vec<mpsc::Sender<Frame>>,
}

/// Receiving side of one worker.
pub struct SegmentInbox {
    worker: WorkerId,
    rx: mpsc::Receiver<Frame>,
}

/// Creates one inbox per worker and the distributor that feeds them.
pub fn segment_channels(workers: usize) -> (Distributor, Vec<SegmentInbox>) {
    let mut outboxes = Vec::with_capacity(workers);
    let mut inboxes = Vec::with_capacity(workers);

    for i in 0..workers {
        let (tx, rx) = mpsc::channel(SEGMENT_FRAMES);
        outboxes.push(tx);
        inboxes.push(SegmentInbox {
            worker: WorkerId(i),
            rx,
        });
    }

    (Distributor { outboxes }, inboxes)
}

impl Distributor {
    pub fn worker_count(&self) -> usize {
        self.outboxes.len()
    }

    /// Sends `segments[i]` to worker `i`: its length first, then its contents.
    ///
    /// Consumes the distributor; once it returns, every inbox has seen its
    /// last frame.
    pub async fn send_segments(self, segments: Vec<Vec<f64>>) -> Result<()> {
        if segments.len() != self.outboxes.len() {
            return Err(SquirrelError::ProtocolViolation {
                worker: WorkerId::COORDINATOR.0,
                reason: format!(
                    "{} segments planned for {} squirrels",
                    segments.len(),
                    self.outboxes.len()
                ),
            });
        }

        for (i, items) in segments.into_iter().enumerate() {
            let worker = WorkerId(i);
            let len = items.len();

            self.send_frame(worker, &Envelope::SegmentHeader { worker, len })
                .await?;
            self.send_frame(worker, &Envelope::SegmentPayload { worker, items })
                .await?;

            tracing::debug!("Sent {} nuts to squirrel {}", len, worker);
        }

        tracing::info!("Distributed segments to {} squirrels", self.outboxes.len());
        Ok(())
    }

    /// Sends a single envelope to `target`.
    pub async fn send_frame(&self, target: WorkerId, envelope: &Envelope) -> Result<()> {
        let outbox = self
            .outboxes
            .get(target.0)
            .ok_or_else(|| SquirrelError::ProtocolViolation {
                worker: WorkerId::COORDINATOR.0,
                reason: format!("no squirrel {} in this run", target),
            })?;

        let frame = envelope.encode()?;
        outbox
            .send(frame)
            .await
            .map_err(|_| SquirrelError::PeerLost {
                worker: WorkerId::COORDINATOR.0,
            })
    }
}

impl SegmentInbox {
    pub fn worker(&self) -> WorkerId {
        self.worker
    }

    /// Blocks until this worker's full segment has arrived.
    ///
    /// The header must come first and be addressed to this worker, and the
    /// payload must carry exactly the announced number of nuts.
    pub async fn receive(&mut self) -> Result<Vec<f64>> {
        let declared = match self.next_envelope().await? {
            Envelope::SegmentHeader { worker, len } if worker == self.worker => len,
            other => return Err(self.unexpected(&other, "segment header")),
        };

        let items = match self.next_envelope().await? {
            Envelope::SegmentPayload { worker, items } if worker == self.worker => items,
            other => return Err(self.unexpected(&other, "segment payload")),
        };

        if items.len() != declared {
            return Err(SquirrelError::ProtocolViolation {
                worker: self.worker.0,
                reason: format!("declared {} nuts, received {}", declared, items.len()),
            });
        }

        tracing::debug!("Squirrel {} received {} nuts", self.worker, items.len());
        Ok(items)
    }

    async fn next_envelope(&mut self) -> Result<Envelope> {
        let frame = self
            .rx
            .recv()
            .await
            .ok_or(SquirrelError::PeerLost {
                worker: self.worker.0,
            })?;
        Envelope::decode(&frame)
    }

    fn unexpected(&self, got: &Envelope, expected: &str) -> SquirrelError {
        SquirrelError::ProtocolViolation {
            worker: self.worker.0,
            reason: format!(
                "expected {}, got {} for squirrel {}",
                expected,
                got.kind(),
                got.worker()
            ),
        }
    }
}
