//! Progress accounting for a sweep.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::outcome::AcquireOutcome;

/// Snapshot of sweep progress (CLI-friendly).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub done: usize,
    pub cached: usize,
    pub downloaded: usize,
    pub exhausted: usize,
    pub failed: usize,
}

impl ProgressSnapshot {
    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.done as f64 / self.total as f64).min(1.0)
    }
}

/// Shared counters updated by every finished job.
#[derive(Debug, Default)]
pub struct SweepProgress {
    total: usize,
    done: AtomicUsize,
    cached: AtomicUsize,
    downloaded: AtomicUsize,
    exhausted: AtomicUsize,
    failed: AtomicUsize,
}

impl SweepProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Count one finished asset and log the running percentage.
    pub fn record(&self, result: &anyhow::Result<AcquireOutcome>) -> ProgressSnapshot {
        let counter = match result {
            Ok(AcquireOutcome::Cached { .. }) => &self.cached,
            Ok(AcquireOutcome::Downloaded { .. }) => &self.downloaded,
            Ok(AcquireOutcome::Exhausted) => &self.exhausted,
            Err(_) => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.done.fetch_add(1, Ordering::Relaxed);

        let snap = self.snapshot();
        tracing::info!(
            "progress {:.2}% ({}/{})",
            snap.fraction() * 100.0,
            snap.done,
            snap.total
        );
        snap
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.total,
            done: self.done.load(Ordering::Relaxed),
            cached: self.cached.load(Ordering::Relaxed),
            downloaded: self.downloaded.load(Ordering::Relaxed),
            exhausted: self.exhausted.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
