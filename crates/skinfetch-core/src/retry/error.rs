//! Fetch error type for retry classification.

use super::classify::classify;
use super::policy::ErrorKind;

/// Error returned by a single fetch attempt against a remote host.
/// Kept separate from anyhow so the executor can classify it.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response status was not 200.
    #[error("HTTP {0}")]
    Http(u32),
    /// The blocking fetch task was cancelled or panicked.
    #[error("fetch task failed: {0}")]
    Task(String),
}

impl FetchError {
    /// True when the error says nothing about whether the asset exists.
    pub fn is_ambiguous(&self) -> bool {
        !matches!(classify(self), ErrorKind::Other)
    }
}
