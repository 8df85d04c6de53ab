//! `skinfetch exhausted` – list skins with no matching remote name.

use anyhow::Result;
use skinfetch_core::ledger::{AssetStatus, Ledger};

pub async fn run_exhausted(ledger: &Ledger) -> Result<()> {
    let assets = ledger.list_assets_by_status(&[AssetStatus::Exhausted]).await?;
    if assets.is_empty() {
        println!("No exhausted skins.");
        return Ok(());
    }
    println!("{:<8} {:<16} {}", "ID", "CHAMPION", "NAME");
    for a in assets {
        println!("{:<8} {:<16} {}", a.id, a.owner_name, a.raw_name);
    }
    Ok(())
}
