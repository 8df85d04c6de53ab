//! CLI command handlers, one file per command.

mod abandon;
mod candidates;
mod exhausted;
mod fetch;
mod retry;
mod status;
mod sync;

pub use abandon::run_abandon;
pub use candidates::run_candidates;
pub use exhausted::run_exhausted;
pub use fetch::run_fetch;
pub use retry::run_retry;
pub use status::run_status;
pub use sync::run_sync;

use anyhow::Result;
use skinfetch_core::acquire::Acquirer;
use skinfetch_core::config::SyncConfig;
use skinfetch_core::control::{Interrupt, RunControl};
use skinfetch_core::ledger::{AssetId, AssetRecord, Ledger};
use skinfetch_core::remote::CurlHost;
use std::sync::Arc;

/// Acquirer wired to the ledger and a curl host, per config.
fn build_acquirer(ledger: &Ledger, cfg: &SyncConfig) -> Result<Arc<Acquirer>> {
    let acquirer = Acquirer::from_config(cfg, Arc::new(ledger.clone()), Arc::new(CurlHost::default()))?;
    Ok(Arc::new(acquirer))
}

/// First Ctrl-C stops admitting queued work; a second one exits immediately.
fn stop_on_ctrl_c(control: &Arc<RunControl>) {
    let control = Arc::clone(control);
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            match control.interrupt() {
                Interrupt::Drain => {
                    eprintln!("stopping after in-flight downloads finish (Ctrl-C again to quit now)...");
                }
                Interrupt::ForceExit => {
                    eprintln!("interrupted");
                    std::process::exit(130);
                }
            }
        }
    });
}

async fn require_asset(ledger: &Ledger, id: AssetId) -> Result<AssetRecord> {
    ledger
        .get_asset(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no skin with id {} in the ledger", id))
}
