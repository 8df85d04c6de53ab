#![allow(dead_code)]

pub mod asset_server;
pub mod mock_host;

use skinfetch_core::ledger::{AssetId, AssetRecord, Grouping, Ledger, NewAsset};
use std::path::Path;

/// Open a file-backed ledger under `dir` and record one champion with the given skins.
pub async fn seeded_ledger(
    dir: &Path,
    owner_id: &str,
    owner_name: &str,
    skins: &[(AssetId, i64, &str)],
) -> Ledger {
    let ledger = Ledger::open_at(dir.join("ledger.db")).await.unwrap();
    ledger
        .upsert_grouping(&Grouping {
            id: owner_id.to_string(),
            name: owner_name.to_string(),
            title: String::new(),
            lore: String::new(),
        })
        .await
        .unwrap();
    for (id, number, raw_name) in skins {
        ledger
            .insert_asset_if_absent(&NewAsset {
                id: *id,
                number: *number,
                raw_name: raw_name.to_string(),
                owner_id: owner_id.to_string(),
            })
            .await
            .unwrap();
    }
    ledger
}

pub async fn record(ledger: &Ledger, id: AssetId) -> AssetRecord {
    ledger.get_asset(id).await.unwrap().expect("asset in ledger")
}
