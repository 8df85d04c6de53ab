//! One acquisition sweep over the ledger.

use anyhow::Result;
use std::sync::Arc;

use super::progress::SweepProgress;
use super::Acquirer;
use crate::control::RunControl;
use crate::ledger::{AssetStatus, Ledger};
use crate::scheduler::{job, Job, WorkerPool};

/// Statuses a sweep picks up. `Succeeded` and `Abandoned` are final.
pub const SWEEP_STATUSES: [AssetStatus; 2] = [AssetStatus::Pending, AssetStatus::Exhausted];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub total: usize,
    pub cached: usize,
    pub downloaded: usize,
    pub exhausted: usize,
    pub failed: usize,
    pub not_admitted: usize,
}

/// Schedule one job per `Pending`/`Exhausted` asset with at most `max_concurrent` in flight.
pub async fn run_sweep(
    ledger: &Ledger,
    acquirer: Arc<Acquirer>,
    max_concurrent: usize,
    control: Arc<RunControl>,
) -> Result<SweepReport> {
    let assets = ledger.list_assets_by_status(&SWEEP_STATUSES).await?;
    let total = assets.len();
    tracing::info!(total, max_concurrent, "starting sweep");

    let progress = Arc::new(SweepProgress::new(total));
    let jobs: Vec<Job> = assets
        .into_iter()
        .map(|asset| {
            let acquirer = Arc::clone(&acquirer);
            let progress = Arc::clone(&progress);
            job(move || async move {
                let result = acquirer.acquire(&asset).await;
                progress.record(&result);
                result.map(|_| ())
            })
        })
        .collect();

    let pool = WorkerPool::new(max_concurrent);
    let pool_report = pool.run(jobs, control).await;
    let snap = progress.snapshot();

    let report = SweepReport {
        total,
        cached: snap.cached,
        downloaded: snap.downloaded,
        exhausted: snap.exhausted,
        failed: pool_report.failed,
        not_admitted: pool_report.not_admitted,
    };
    tracing::info!(?report, "sweep finished");
    Ok(report)
}
