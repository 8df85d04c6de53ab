//! Catalog source client and ledger ingestion.
//!
//! Reads the latest version token, the champion index and each champion's
//! skin list, and inserts skins the ledger does not know yet as `Pending`.

mod parse;

pub use parse::{ChampionDetail, ChampionDocument, ChampionIndex, SkinEntry};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::control::RunControl;
use crate::ledger::Ledger;
use crate::remote::RemoteHost;
use crate::retry::{run_with_retry, FetchError, RetryPolicy};
use crate::scheduler::{job, Job, WorkerPool};

/// Summary of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub version: String,
    pub champions: usize,
    pub new_assets: usize,
    pub failed_champions: usize,
}

#[derive(Clone)]
pub struct CatalogClient {
    host: Arc<dyn RemoteHost>,
    base_url: String,
    locale: String,
    retry: RetryPolicy,
}

impl CatalogClient {
    pub fn new(host: Arc<dyn RemoteHost>, base_url: &str, locale: &str) -> Self {
        Self {
            host,
            base_url: base_url.trim_end_matches('/').to_string(),
            locale: locale.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let host = &self.host;
        let body = run_with_retry(&self.retry, move || async move {
            let resp = host.get(url).await?;
            if resp.is_found() {
                Ok(resp.body)
            } else {
                Err(FetchError::Http(resp.status))
            }
        })
        .await
        .with_context(|| format!("GET {}", url))?;
        serde_json::from_slice(&body).with_context(|| format!("parse JSON from {}", url))
    }

    /// Newest version token (first entry of `versions.json`).
    pub async fn latest_version(&self) -> Result<String> {
        let url = format!("{}/api/versions.json", self.base_url);
        let versions: Vec<String> = self.get_json(&url).await?;
        versions
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("catalog returned no versions"))
    }

    pub async fn champion_ids(&self, version: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/cdn/{}/data/{}/champion.json",
            self.base_url, version, self.locale
        );
        let index: ChampionIndex = self.get_json(&url).await?;
        Ok(index.data.into_values().map(|c| c.id).collect())
    }

    pub async fn champion(&self, version: &str, id: &str) -> Result<ChampionDetail> {
        let url = format!(
            "{}/cdn/{}/data/{}/champion/{}.json",
            self.base_url, version, self.locale, id
        );
        let doc: ChampionDocument = self.get_json(&url).await?;
        doc.into_detail(id)
    }

    /// Fetch the latest catalog and record new champions and skins.
    /// Champion detail requests run through the worker pool, `max_concurrent` at a time.
    pub async fn ingest(
        &self,
        ledger: &Ledger,
        max_concurrent: usize,
        control: Arc<RunControl>,
    ) -> Result<IngestReport> {
        let version = self.latest_version().await?;
        let ids = self.champion_ids(&version).await?;
        tracing::info!(%version, champions = ids.len(), "catalog index fetched");

        let new_assets = Arc::new(AtomicUsize::new(0));
        let jobs: Vec<Job> = ids
            .iter()
            .map(|id| {
                let client = self.clone();
                let ledger = ledger.clone();
                let version = version.clone();
                let id = id.clone();
                let new_assets = Arc::clone(&new_assets);
                job(move || async move {
                    let added = client.ingest_champion(&ledger, &version, &id).await?;
                    new_assets.fetch_add(added, Ordering::Relaxed);
                    Ok(())
                })
            })
            .collect();

        let report = WorkerPool::new(max_concurrent).run(jobs, control).await;
        Ok(IngestReport {
            version,
            champions: ids.len(),
            new_assets: new_assets.load(Ordering::Relaxed),
            failed_champions: report.failed + report.not_admitted,
        })
    }

    async fn ingest_champion(&self, ledger: &Ledger, version: &str, id: &str) -> Result<usize> {
        let detail = self.champion(version, id).await?;
        ledger.upsert_grouping(&detail.grouping()).await?;

        let known = ledger.known_asset_ids(&detail.id).await?;
        let mut added = 0;
        for asset in detail.assets()? {
            if known.contains(&asset.id) {
                continue;
            }
            if ledger.insert_asset_if_absent(&asset).await? {
                added += 1;
            }
        }
        if added > 0 {
            tracing::info!(champion = %detail.name, added, "skins recorded");
        }
        Ok(added)
    }
}
