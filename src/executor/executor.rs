//! Run Driver
//!
//! Spawns one task per launched squirrel, wires them to the distributor and the ring
//! exchange, and gathers their records. Each task runs the same sequence:
//! launch guard → (coordinator only) generate, partition, distribute → receive segment →
//! aggregate → ring exchange → record.

use super::aggregator;
use super::distributor::{segment_channels, Distributor, SegmentInbox};
use super::exchange::{ring_exchange, ExchangeHandle};
use super::types::RunId;
use crate::config::RunConfig;
use crate::dataset::generator::DatasetGenerator;
use crate::dataset::partitioner::Partitioner;
use crate::error::{Result, SquirrelError};
use crate::membership::service::Roster;
use crate::membership::types::{RingTopology, WorkerId, WorkerState};
use crate::report::types::SquirrelRecord;

use std::sync::Arc;
use tracing::Instrument;

/// Drives a single run of the squirrel ring.
pub struct SquirrelExecutor {
    config: RunConfig,
    roster: Arc<Roster>,
    run_id: RunId,
}

impl SquirrelExecutor {
    pub fn new(config: RunConfig) -> Result<Self> {
        config.validate()?;
        let roster = Roster::new(RingTopology::new(config.launched_workers));

        Ok(Self {
            config,
            roster,
            run_id: RunId::new(),
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn roster(&self) -> Arc<Roster> {
        self.roster.clone()
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// Runs every squirrel to completion and returns their records sorted by id.
    ///
    /// Fails as a whole if any participant fails; the returned error is the
    /// root cause rather than a peer's reaction to it.
    pub async fn run(&self) -> Result<Vec<SquirrelRecord>> {
        let span = tracing::info_span!("run", run_id = %self.run_id.0);
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&self) -> Result<Vec<SquirrelRecord>> {
        let launched = self.config.launched_workers;
        tracing::info!(
            "Launching {} squirrels ({} expected, {} nuts, seed {})",
            launched,
            self.config.expected_workers,
            self.config.total_nuts,
            self.config.seed
        );

        let (distributor, inboxes) = segment_channels(launched);
        let (exchange, handles) = ring_exchange(launched, self.roster.clone());
        let mut distributor = Some(distributor);

        let mut joins = Vec::with_capacity(launched);
        for (inbox, exchange_handle) in inboxes.into_iter().zip(handles) {
            let worker = inbox.worker();
            let squirrel = Squirrel {
                worker,
                config: self.config.clone(),
                roster: self.roster.clone(),
                distributor: if worker.role().is_coordinator() {
                    distributor.take()
                } else {
                    None
                },
                inbox,
                exchange: exchange_handle,
            };

            let span = tracing::debug_span!("squirrel", id = worker.0);
            joins.push((worker, tokio::spawn(squirrel.run().instrument(span))));
        }

        let mut records = Vec::with_capacity(launched);
        let mut errors = Vec::new();

        for (worker, join) in joins {
            match join.await {
                Ok(Ok(record)) => records.push(record),
                Ok(Err(e)) => errors.push(e),
                Err(e) => {
                    tracing::error!("Squirrel {} task aborted: {}", worker, e);
                    errors.push(SquirrelError::WorkerPanicked { worker: worker.0 });
                }
            }
        }

        if let Err(e) = exchange.finish().await {
            errors.push(e);
        }

        if let Some(root_cause) = root_cause(errors) {
            let (joined, received, published, reported, failed) = self.roster.state_counts();
            tracing::debug!(
                "Run failed (joined={}, received={}, published={}, reported={}, failed={})",
                joined,
                received,
                published,
                reported,
                failed
            );
            return Err(root_cause);
        }

        records.sort_by_key(|record| record.id);
        tracing::info!("Run complete, {} records", records.len());
        Ok(records)
    }
}

/// Picks the first primary failure, falling back to the first secondary one.
///
/// Worker errors come in rank order, so the coordinator's failure wins over
/// anything its peers observed afterwards.
fn root_cause(errors: Vec<SquirrelError>) -> Option<SquirrelError> {
    let fallback = errors.first().cloned();
    errors
        .into_iter()
        .find(|e| !e.is_secondary())
        .or(fallback)
}

/// Every unit must see the launch size it was built for.
///
/// All workers fail on a mismatch. The coordinator's error becomes the run's
/// root cause, which is the only place the diagnostic is printed.
pub fn guard_world_size(config: &RunConfig, worker: WorkerId) -> Result<()> {
    if config.launched_workers != config.expected_workers {
        tracing::debug!("Squirrel {} refuses to start", worker);
        return Err(SquirrelError::WorkerCountMismatch {
            expected: config.expected_workers,
            actual: config.launched_workers,
        });
    }
    Ok(())
}

/// Setup phase, coordinator only: generate, partition, distribute.
///
/// The dataset and plan are dropped when this returns.
pub async fn coordinate(config: &RunConfig, distributor: Distributor) -> Result<()> {
    let mut generator = DatasetGenerator::from_config(config);
    let dataset = generator.generate(config.total_nuts);

    let plan = Partitioner::new(distributor.worker_count()).plan(dataset.len(), generator.rng())?;
    tracing::info!("Partitioned {} nuts: {:?}", dataset.len(), plan.lengths());

    let segments = dataset.into_segments(&plan)?;
    distributor.send_segments(segments).await
}

struct Squirrel {
    worker: WorkerId,
    config: RunConfig,
    roster: Arc<Roster>,
    distributor: Option<Distributor>,
    inbox: SegmentInbox,
    exchange: ExchangeHandle,
}

impl Squirrel {
    async fn run(self) -> Result<SquirrelRecord> {
        let worker = self.worker;
        let roster = self.roster.clone();
        roster.join(worker);

        let result = self.execute().await;
        match &result {
            Ok(record) => {
                roster.advance(worker, WorkerState::Reported);
                tracing::debug!("Squirrel {} done: {:?}", worker, record);
            }
            Err(e) => roster.mark_failed(worker, e.to_string()),
        }
        result
    }

    async fn execute(self) -> Result<SquirrelRecord> {
        let Squirrel {
            worker,
            config,
            roster,
            distributor,
            mut inbox,
            exchange,
        } = self;

        guard_world_size(&config, worker)?;

        if let Some(distributor) = distributor {
            coordinate(&config, distributor).await?;
        }

        let segment = inbox.receive().await?;
        roster.advance(
            worker,
            WorkerState::SegmentReceived {
                nuts: segment.len(),
            },
        );

        let stat = aggregator::local_statistic(&segment);
        drop(segment);
        tracing::debug!(
            "Squirrel {} holds {} nuts, mean {:.4}",
            worker,
            stat.nuts,
            stat.mean
        );

        let table = exchange.all_gather(stat).await?;
        let view = table
            .neighbors(worker)
            .ok_or_else(|| SquirrelError::ProtocolViolation {
                worker: worker.0,
                reason: format!("missing from a table of {}", table.len()),
            })?;

        Ok(SquirrelRecord::from(&view))
    }
}
