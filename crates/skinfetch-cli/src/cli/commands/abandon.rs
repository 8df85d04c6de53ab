//! `skinfetch abandon <id>` – stop retrying a skin.

use anyhow::Result;
use skinfetch_core::ledger::{AssetStatus, Ledger, StatusLedger};

pub async fn run_abandon(ledger: &Ledger, id: i64) -> Result<()> {
    ledger.set_status(id, AssetStatus::Abandoned).await?;
    println!("Abandoned skin {id}");
    Ok(())
}
