//! Acquisition pipeline: cache probe → candidate resolution → fallback
//! download → ledger update, driven per asset by the worker pool.

mod executor;
mod outcome;
mod progress;
mod sweep;

pub use executor::FallbackExecutor;
pub use outcome::{AcquireError, AcquireOutcome};
pub use progress::{ProgressSnapshot, SweepProgress};
pub use sweep::{run_sweep, SweepReport, SWEEP_STATUSES};

use anyhow::Result;
use std::sync::Arc;

use crate::cache::ArtifactCache;
use crate::config::SyncConfig;
use crate::ledger::{AssetRecord, AssetStatus, StatusLedger};
use crate::remote::RemoteHost;
use crate::resolver::{Candidate, Resolver};
use crate::transcode::JpegReencode;

/// Per-asset entry point: the unit of work a scheduled job runs.
pub struct Acquirer {
    resolver: Resolver,
    executor: FallbackExecutor,
}

impl Acquirer {
    pub fn new(resolver: Resolver, executor: FallbackExecutor) -> Self {
        Self { resolver, executor }
    }

    /// Production wiring from config: JPEG re-encode, configured retry and pacing.
    pub fn from_config(
        cfg: &SyncConfig,
        ledger: Arc<dyn StatusLedger>,
        host: Arc<dyn RemoteHost>,
    ) -> Result<Self> {
        let cache = ArtifactCache::new(cfg.artifact_dir()?);
        let executor = FallbackExecutor::new(
            ledger,
            host,
            Arc::new(JpegReencode::new(cfg.jpeg_quality)),
            cache,
        )
        .with_retry(cfg.retry_policy())
        .with_pacing(cfg.pacing());
        Ok(Self::new(Resolver::new(&cfg.remote_base_url), executor))
    }

    pub fn candidates(&self, asset: &AssetRecord) -> Vec<Candidate> {
        self.resolver.candidates(asset)
    }

    pub fn cache(&self) -> &ArtifactCache {
        self.executor.cache()
    }

    /// Acquire one asset. A present artifact under the primary name
    /// short-circuits before any candidate is fetched.
    pub async fn acquire(&self, asset: &AssetRecord) -> Result<AcquireOutcome> {
        let candidates = self.resolver.candidates(asset);
        if let Some(primary) = candidates.first() {
            if self.executor.cache().contains(&primary.derived_name) {
                tracing::debug!(asset = asset.id, name = %primary.derived_name, "already downloaded");
                if asset.status != AssetStatus::Succeeded {
                    self.executor
                        .ledger()
                        .set_status(asset.id, AssetStatus::Succeeded)
                        .await?;
                }
                return Ok(AcquireOutcome::Cached {
                    derived_name: primary.derived_name.clone(),
                });
            }
        }
        tracing::debug!(asset = asset.id, raw_name = %asset.raw_name, "preparing download");
        self.executor.execute(asset.id, &candidates).await
    }
}
