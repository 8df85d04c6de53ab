//! Persistent asset ledger (SQLite via sqlx).
//!
//! Stores champions (groupings), their skins (assets) and each asset's
//! acquisition status so sweeps are idempotent and resumable.

mod db;
mod read;
mod status;
mod types;
mod write;

pub use db::Ledger;
pub use status::StatusLedger;
pub use types::*;

#[cfg(test)]
pub(crate) use db::open_memory;
