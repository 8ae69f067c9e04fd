//! Ring Exchange Collective
//!
//! An all-gather built from a fan-in channel and a broadcast. Every worker submits its
//! `LocalStatistic` to a single collector task; once the collector holds all N entries it
//! publishes one shared `StatisticTable`, releasing every worker at once with the same
//! complete view. Workers then pick their ring neighbors out of that table.
//!
//! The collector never publishes a partial table. If every submitter is gone before the
//! table is complete, the run fails with `MissingPeers`.

use super::protocol::{Envelope, Frame};
use super::types::{LocalStatistic, StatisticTable};
use crate::error::{Result, SquirrelError};
use crate::membership::service::Roster;
use crate::membership::types::{WorkerId, WorkerState};

use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// A worker's single-use ticket into the collective.
pub struct ExchangeHandle {
    worker: WorkerId,
    submit: mpsc::Sender<Frame>,
    results: broadcast::Receiver<Arc<StatisticTable>>,
}

/// Owner of the collector task.
pub struct RingExchange {
    collector: JoinHandle<Result<()>>,
}

/// Spawns the collector for a ring of `workers` members and returns one handle per worker.
pub fn ring_exchange(workers: usize, roster: Arc<Roster>) -> (RingExchange, Vec<ExchangeHandle>) {
    let (submit_tx, submit_rx) = mpsc::channel(workers.max(1));
    let (publish_tx, _) = broadcast::channel(1);

    let handles = (0..workers)
        .map(|i| ExchangeHandle {
            worker: WorkerId(i),
            submit: submit_tx.clone(),
            results: publish_tx.subscribe(),
        })
        .collect();

    // Only the handles keep the fan-in open; the collector must see it close
    // once the last live worker has submitted or died.
    drop(submit_tx);

    let collector = tokio::spawn(collect(workers, submit_rx, publish_tx, roster));

    (RingExchange { collector }, handles)
}

impl RingExchange {
    /// Waits for the collector and returns its outcome.
    pub async fn finish(self) -> Result<()> {
        match self.collector.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Ring exchange collector did not finish: {}", e);
                Err(SquirrelError::WorkerPanicked {
                    worker: WorkerId::COORDINATOR.0,
                })
            }
        }
    }
}

impl ExchangeHandle {
    pub fn worker(&self) -> WorkerId {
        self.worker
    }

    /// Publishes `stat` and blocks until every worker has published.
    pub async fn all_gather(self, stat: LocalStatistic) -> Result<Arc<StatisticTable>> {
        let ExchangeHandle {
            worker,
            submit,
            mut results,
        } = self;

        let frame = Envelope::Statistic { worker, stat }.encode()?;
        submit
            .send(frame)
            .await
            .map_err(|_| SquirrelError::PeerLost { worker: worker.0 })?;

        // Release the fan-in before waiting, otherwise a dead peer could never be noticed.
        drop(submit);

        tracing::debug!("Squirrel {} published, waiting at the barrier", worker);

        results
            .recv()
            .await
            .map_err(|_| SquirrelError::PeerLost { worker: worker.0 })
    }
}

async fn collect(
    workers: usize,
    mut inbox: mpsc::Receiver<Frame>,
    publish: broadcast::Sender<Arc<StatisticTable>>,
    roster: Arc<Roster>,
) -> Result<()> {
    let mut slots: Vec<Option<LocalStatistic>> = vec![None; workers];
    let mut filled = 0;

    while filled < workers {
        let Some(frame) = inbox.recv().await else {
            let missing: Vec<usize> = slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.is_none())
                .map(|(i, _)| i)
                .collect();
            if filled == 0 {
                // Nobody reached the barrier: the run already failed upstream.
                tracing::debug!("Ring exchange closed before any statistic arrived");
            } else {
                tracing::error!(
                    "Ring exchange closed with {}/{} statistics, missing {:?}",
                    filled,
                    workers,
                    missing
                );
            }
            return Err(SquirrelError::MissingPeers { missing });
        };

        match Envelope::decode(&frame)? {
            Envelope::Statistic { worker, stat } => {
                let slot = slots
                    .get_mut(worker.0)
                    .ok_or_else(|| SquirrelError::ProtocolViolation {
                        worker: worker.0,
                        reason: format!("statistic from outside a ring of {}", workers),
                    })?;

                if slot.is_some() {
                    return Err(SquirrelError::ProtocolViolation {
                        worker: worker.0,
                        reason: "statistic published twice".to_string(),
                    });
                }

                *slot = Some(stat);
                filled += 1;
                roster.advance(worker, WorkerState::Published);

                tracing::trace!("Collected statistic {}/{} from {}", filled, workers, worker);
            }
            other => {
                return Err(SquirrelError::ProtocolViolation {
                    worker: other.worker().0,
                    reason: format!("{} sent to the ring exchange", other.kind()),
                });
            }
        }
    }

    let table = Arc::new(StatisticTable::new(slots.into_iter().flatten().collect()));

    if publish.send(table).is_err() {
        tracing::warn!("Ring exchange complete but no squirrel is waiting");
    }

    tracing::info!("Ring exchange complete for {} squirrels", workers);
    Ok(())
}
