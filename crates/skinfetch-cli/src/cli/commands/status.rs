//! `skinfetch status` – counts per status.

use anyhow::Result;
use skinfetch_core::ledger::{AssetStatus, Ledger};

pub async fn run_status(ledger: &Ledger) -> Result<()> {
    let counts = ledger.status_counts().await?;
    if counts.total() == 0 {
        println!("Ledger is empty. Run `skinfetch sync` first.");
        return Ok(());
    }
    for status in AssetStatus::ALL {
        println!("{:<10} {}", status.as_str(), counts.get(status));
    }
    println!("{:<10} {}", "total", counts.total());
    Ok(())
}
