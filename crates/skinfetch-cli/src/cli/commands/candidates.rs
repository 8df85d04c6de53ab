//! `skinfetch candidates <id>` – show derived names and URLs without fetching.

use anyhow::Result;
use skinfetch_core::cache::ArtifactCache;
use skinfetch_core::config::SyncConfig;
use skinfetch_core::ledger::Ledger;
use skinfetch_core::resolver::Resolver;

use super::require_asset;

pub async fn run_candidates(ledger: &Ledger, cfg: &SyncConfig, id: i64) -> Result<()> {
    let asset = require_asset(ledger, id).await?;
    let cache = ArtifactCache::new(cfg.artifact_dir()?);
    println!("{} ({}) [{}]", asset.raw_name, asset.owner_name, asset.status);
    for (i, c) in Resolver::new(&cfg.remote_base_url)
        .candidates(&asset)
        .iter()
        .enumerate()
    {
        let mark = if cache.contains(&c.derived_name) { " (on disk)" } else { "" };
        println!("{}. {}{}\n   {}", i + 1, c.derived_name, mark, c.url);
    }
    Ok(())
}
