//! Terminal outcomes of one asset's acquisition.

use crate::ledger::AssetId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// Artifact already on disk; no network call was made.
    Cached { derived_name: String },
    /// Fetched, transcoded and committed under `derived_name`.
    Downloaded { derived_name: String, bytes: usize },
    /// Every candidate was a clear miss.
    Exhausted,
}

impl AcquireOutcome {
    pub fn derived_name(&self) -> Option<&str> {
        match self {
            AcquireOutcome::Cached { derived_name }
            | AcquireOutcome::Downloaded { derived_name, .. } => Some(derived_name),
            AcquireOutcome::Exhausted => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    /// No candidate succeeded but at least one failed at the transport level,
    /// so the asset's absence is not established. The ledger is left as is.
    #[error("asset {asset_id}: no candidate succeeded and {} could not be reached: {}", .unreachable.len(), .unreachable.join(", "))]
    AmbiguousExhaustion {
        asset_id: AssetId,
        unreachable: Vec<String>,
    },
}
