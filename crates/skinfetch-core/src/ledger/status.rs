//! The status seam the executor writes through.

use anyhow::Result;
use async_trait::async_trait;

use super::db::Ledger;
use super::types::{AssetId, AssetStatus};

/// Per-asset status store used by the acquisition pipeline.
///
/// Implementations must make `set_status` atomic per asset and reject
/// transitions `AssetStatus::can_transition_to` forbids.
#[async_trait]
pub trait StatusLedger: Send + Sync {
    async fn status(&self, id: AssetId) -> Result<Option<AssetStatus>>;
    async fn set_status(&self, id: AssetId, status: AssetStatus) -> Result<()>;
}

#[async_trait]
impl StatusLedger for Ledger {
    async fn status(&self, id: AssetId) -> Result<Option<AssetStatus>> {
        self.get_status(id).await
    }

    async fn set_status(&self, id: AssetId, status: AssetStatus) -> Result<()> {
        self.update_status(id, status).await
    }
}
