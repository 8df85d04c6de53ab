//! `skinfetch sync` – refresh the catalog, then run a sweep.

use anyhow::Result;
use skinfetch_core::catalog::CatalogClient;
use skinfetch_core::config::SyncConfig;
use skinfetch_core::control::RunControl;
use skinfetch_core::ledger::Ledger;
use skinfetch_core::remote::CurlHost;
use std::sync::Arc;

use super::fetch::sweep;
use super::stop_on_ctrl_c;

pub async fn run_sync(ledger: &Ledger, cfg: &SyncConfig, jobs: Option<usize>) -> Result<()> {
    let control = Arc::new(RunControl::new());
    stop_on_ctrl_c(&control);

    let catalog = CatalogClient::new(Arc::new(CurlHost::default()), &cfg.catalog_base_url, &cfg.locale)
        .with_retry(cfg.retry_policy());
    let max_concurrent = jobs.unwrap_or(cfg.max_concurrent).max(1);
    let report = catalog
        .ingest(ledger, max_concurrent, Arc::clone(&control))
        .await?;
    println!(
        "Catalog {}: {} champion(s), {} new skin(s)",
        report.version, report.champions, report.new_assets
    );
    if report.failed_champions > 0 {
        println!("{} champion(s) could not be read; see the log.", report.failed_champions);
    }

    if control.is_stop_requested() {
        return Ok(());
    }
    sweep(ledger, cfg, jobs, control).await
}
