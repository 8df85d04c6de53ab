//! Retry and backoff policy for candidate fetches.
//!
//! Classifies transport failures (timeouts, connection errors) and
//! throttling/5xx statuses into retryable kinds, and computes exponential
//! backoff so a flaky host is not mistaken for a missing asset.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
