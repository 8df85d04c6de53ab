//! Types used by the asset ledger.

use std::fmt;
use std::str::FromStr;

/// Asset identifier (catalog skin id).
pub type AssetId = i64;

/// Acquisition status of one asset, stored as a string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetStatus {
    Pending,
    Succeeded,
    Exhausted,
    Abandoned,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 4] = [
        AssetStatus::Pending,
        AssetStatus::Succeeded,
        AssetStatus::Exhausted,
        AssetStatus::Abandoned,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Pending => "pending",
            AssetStatus::Succeeded => "succeeded",
            AssetStatus::Exhausted => "exhausted",
            AssetStatus::Abandoned => "abandoned",
        }
    }

    /// Statuses from which `self` may be written. Always includes `self`.
    ///
    /// `Exhausted -> Succeeded` is allowed because exhausted assets are
    /// retried by later sweeps.
    pub fn allowed_sources(self) -> &'static [AssetStatus] {
        match self {
            AssetStatus::Pending => &[AssetStatus::Pending],
            AssetStatus::Succeeded => &[
                AssetStatus::Succeeded,
                AssetStatus::Pending,
                AssetStatus::Exhausted,
            ],
            AssetStatus::Exhausted => &[AssetStatus::Exhausted, AssetStatus::Pending],
            AssetStatus::Abandoned => &[
                AssetStatus::Abandoned,
                AssetStatus::Pending,
                AssetStatus::Exhausted,
            ],
        }
    }

    pub fn can_transition_to(self, next: AssetStatus) -> bool {
        next.allowed_sources().contains(&self)
    }
}

impl FromStr for AssetStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AssetStatus::Pending),
            "succeeded" => Ok(AssetStatus::Succeeded),
            "exhausted" => Ok(AssetStatus::Exhausted),
            "abandoned" => Ok(AssetStatus::Abandoned),
            other => Err(LedgerError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors the ledger reports for status writes.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("asset {0} is not in the ledger")]
    UnknownAsset(AssetId),
    #[error("unknown stored status {0:?}")]
    UnknownStatus(String),
    #[error("asset {id}: illegal status transition {from} -> {to}")]
    IllegalTransition {
        id: AssetId,
        from: AssetStatus,
        to: AssetStatus,
    },
}

/// A champion as stored by catalog ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping {
    /// Catalog key, e.g. `MonkeyKing`.
    pub id: String,
    /// Display name, e.g. `Wukong`.
    pub name: String,
    pub title: String,
    pub lore: String,
}

/// A skin to insert during ingestion. New rows always start `Pending`.
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub id: AssetId,
    pub number: i64,
    pub raw_name: String,
    pub owner_id: String,
}

/// Asset row joined with its grouping's display name.
#[derive(Debug, Clone)]
pub struct AssetRecord {
    pub id: AssetId,
    pub number: i64,
    pub raw_name: String,
    pub owner_id: String,
    pub owner_name: String,
    pub status: AssetStatus,
    pub updated_at: i64,
}

/// Per-status counts for `skinfetch status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: u64,
    pub succeeded: u64,
    pub exhausted: u64,
    pub abandoned: u64,
}

impl StatusCounts {
    pub fn get(&self, status: AssetStatus) -> u64 {
        match status {
            AssetStatus::Pending => self.pending,
            AssetStatus::Succeeded => self.succeeded,
            AssetStatus::Exhausted => self.exhausted,
            AssetStatus::Abandoned => self.abandoned,
        }
    }

    pub(crate) fn add(&mut self, status: AssetStatus, n: u64) {
        match status {
            AssetStatus::Pending => self.pending += n,
            AssetStatus::Succeeded => self.succeeded += n,
            AssetStatus::Exhausted => self.exhausted += n,
            AssetStatus::Abandoned => self.abandoned += n,
        }
    }

    pub fn total(&self) -> u64 {
        self.pending + self.succeeded + self.exhausted + self.abandoned
    }
}
