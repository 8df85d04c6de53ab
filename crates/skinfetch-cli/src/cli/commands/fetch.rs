//! `skinfetch fetch` – run one acquisition sweep over the ledger.

use anyhow::Result;
use skinfetch_core::acquire::{run_sweep, SweepReport};
use skinfetch_core::config::SyncConfig;
use skinfetch_core::control::RunControl;
use skinfetch_core::ledger::Ledger;
use std::sync::Arc;

use super::{build_acquirer, stop_on_ctrl_c};

pub async fn run_fetch(ledger: &Ledger, cfg: &SyncConfig, jobs: Option<usize>) -> Result<()> {
    let control = Arc::new(RunControl::new());
    stop_on_ctrl_c(&control);
    sweep(ledger, cfg, jobs, control).await
}

pub(super) async fn sweep(
    ledger: &Ledger,
    cfg: &SyncConfig,
    jobs: Option<usize>,
    control: Arc<RunControl>,
) -> Result<()> {
    let max_concurrent = jobs.unwrap_or(cfg.max_concurrent).max(1);
    let acquirer = build_acquirer(ledger, cfg)?;
    println!("Saving to {}", acquirer.cache().dir().display());
    let report = run_sweep(ledger, acquirer, max_concurrent, control).await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &SweepReport) {
    if report.total == 0 {
        println!("Nothing to download.");
        return;
    }
    println!(
        "{} skin(s): {} downloaded, {} already present, {} not found, {} failed",
        report.total, report.downloaded, report.cached, report.exhausted, report.failed
    );
    if report.not_admitted > 0 {
        println!("{} skin(s) left for the next run.", report.not_admitted);
    }
}
