//! Fallback download executor: try candidates in order, commit the first hit.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use super::outcome::{AcquireError, AcquireOutcome};
use crate::cache::ArtifactCache;
use crate::ledger::{AssetId, AssetStatus, StatusLedger};
use crate::remote::RemoteHost;
use crate::resolver::Candidate;
use crate::retry::{run_with_retry, FetchError, RetryPolicy};
use crate::transcode::Transcode;

/// Everything the executor touches, passed in explicitly.
pub struct FallbackExecutor {
    ledger: Arc<dyn StatusLedger>,
    host: Arc<dyn RemoteHost>,
    transcoder: Arc<dyn Transcode>,
    cache: ArtifactCache,
    retry: RetryPolicy,
    pacing: Duration,
}

enum Attempt {
    Hit(Vec<u8>),
    Miss(u32),
    Unreachable(FetchError),
}

impl FallbackExecutor {
    pub fn new(
        ledger: Arc<dyn StatusLedger>,
        host: Arc<dyn RemoteHost>,
        transcoder: Arc<dyn Transcode>,
        cache: ArtifactCache,
    ) -> Self {
        Self {
            ledger,
            host,
            transcoder,
            cache,
            retry: RetryPolicy::default(),
            pacing: Duration::from_millis(10),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Delay after each successful download before the caller gets its slot back.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn cache(&self) -> &ArtifactCache {
        &self.cache
    }

    pub(crate) fn ledger(&self) -> &dyn StatusLedger {
        self.ledger.as_ref()
    }

    /// Resolve one asset to a terminal outcome.
    ///
    /// Candidates are tried strictly in order and the loop stops at the first
    /// hit. The ledger is written only on a terminal path.
    pub async fn execute(&self, asset_id: AssetId, candidates: &[Candidate]) -> Result<AcquireOutcome> {
        let mut unreachable: Vec<String> = Vec::new();

        for candidate in candidates {
            let name = candidate.derived_name.as_str();
            if self.cache.contains(name) {
                tracing::debug!(asset = asset_id, name, "artifact already present");
                self.ledger.set_status(asset_id, AssetStatus::Succeeded).await?;
                return Ok(AcquireOutcome::Cached {
                    derived_name: name.to_string(),
                });
            }

            match self.fetch(candidate).await {
                Attempt::Hit(payload) => {
                    let transcoder = Arc::clone(&self.transcoder);
                    let transcoded = tokio::task::spawn_blocking(move || transcoder.transcode(&payload))
                        .await
                        .context("transcode task join")?;
                    let bytes = match transcoded {
                        Ok(bytes) => bytes,
                        Err(e) => {
                            tracing::warn!(asset = asset_id, name, "payload rejected, trying next name: {:#}", e);
                            continue;
                        }
                    };
                    let path = self.cache.commit(name, &bytes).await?;
                    self.ledger.set_status(asset_id, AssetStatus::Succeeded).await?;
                    tracing::info!(asset = asset_id, name, path = %path.display(), "downloaded");
                    tokio::time::sleep(self.pacing).await;
                    return Ok(AcquireOutcome::Downloaded {
                        derived_name: name.to_string(),
                        bytes: bytes.len(),
                    });
                }
                Attempt::Miss(status) => {
                    tracing::debug!(asset = asset_id, name, status, url = %candidate.url, "no such image, trying next name");
                }
                Attempt::Unreachable(e) => {
                    tracing::warn!(asset = asset_id, name, url = %candidate.url, "candidate unreachable: {}", e);
                    unreachable.push(name.to_string());
                }
            }
        }

        if !unreachable.is_empty() {
            return Err(AcquireError::AmbiguousExhaustion {
                asset_id,
                unreachable,
            }
            .into());
        }

        tracing::info!(asset = asset_id, tried = candidates.len(), "no candidate found");
        self.ledger.set_status(asset_id, AssetStatus::Exhausted).await?;
        Ok(AcquireOutcome::Exhausted)
    }

    async fn fetch(&self, candidate: &Candidate) -> Attempt {
        let host = &self.host;
        let url = candidate.url.as_str();
        let result = run_with_retry(&self.retry, move || async move {
            let resp = host.get(url).await?;
            if resp.is_found() {
                Ok(resp.body)
            } else {
                Err(FetchError::Http(resp.status))
            }
        })
        .await;

        match result {
            Ok(body) => Attempt::Hit(body),
            Err(e) if e.is_ambiguous() => Attempt::Unreachable(e),
            Err(FetchError::Http(status)) => Attempt::Miss(status),
            Err(e) => Attempt::Unreachable(e),
        }
    }
}
