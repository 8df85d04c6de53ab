//! `skinfetch retry <id>` – run the fallback walk for one skin immediately.

use anyhow::Result;
use skinfetch_core::acquire::AcquireOutcome;
use skinfetch_core::config::SyncConfig;
use skinfetch_core::ledger::{AssetStatus, Ledger};

use super::{build_acquirer, require_asset};

pub async fn run_retry(ledger: &Ledger, cfg: &SyncConfig, id: i64) -> Result<()> {
    let asset = require_asset(ledger, id).await?;
    if asset.status == AssetStatus::Abandoned {
        anyhow::bail!("skin {} was abandoned", id);
    }

    let acquirer = build_acquirer(ledger, cfg)?;
    for c in acquirer.candidates(&asset) {
        println!("trying {} <{}>", c.derived_name, c.url);
    }
    match acquirer.acquire(&asset).await? {
        AcquireOutcome::Cached { derived_name } => {
            println!("{} is already on disk as {}", asset.raw_name, derived_name);
        }
        AcquireOutcome::Downloaded { derived_name, bytes } => {
            let path = acquirer.cache().path_for(&derived_name);
            println!("Saved {} ({} bytes) to {}", asset.raw_name, bytes, path.display());
        }
        AcquireOutcome::Exhausted => {
            println!("No image found for {}", asset.raw_name);
        }
    }
    Ok(())
}
