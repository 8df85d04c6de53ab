//! Fixed-size worker pool over a bounded FIFO channel.
//!
//! The caller's task feeds the channel; `workers` long-lived tasks pull from
//! it. A worker takes its next job only after the previous one finished, so
//! admission happens on completion and concurrency never exceeds `workers`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

use super::job::Job;
use crate::control::RunControl;

/// Outcome counts for one `WorkerPool::run`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolReport {
    pub completed: usize,
    pub failed: usize,
    /// Jobs dropped unrun because a stop was requested before admission.
    pub not_admitted: usize,
}

impl PoolReport {
    pub fn total(&self) -> usize {
        self.completed + self.failed + self.not_admitted
    }
}

#[derive(Default)]
struct Counters {
    completed: AtomicUsize,
    failed: AtomicUsize,
    not_admitted: AtomicUsize,
}

#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Pool running at most `workers` jobs at once (minimum 1).
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Run every job in `jobs` once, in FIFO admission order.
    ///
    /// Returns when the queue is drained and every admitted job finished.
    /// After `control.request_stop()`, queued jobs are counted as not admitted
    /// and in-flight jobs are left to finish.
    pub async fn run<I>(&self, jobs: I, control: Arc<RunControl>) -> PoolReport
    where
        I: IntoIterator<Item = Job>,
    {
        let (tx, rx) = mpsc::channel::<Job>(self.workers * 2);
        let rx = Arc::new(Mutex::new(rx));
        let counters = Arc::new(Counters::default());

        let mut set = JoinSet::new();
        for worker in 0..self.workers {
            let rx = Arc::clone(&rx);
            let counters = Arc::clone(&counters);
            let control = Arc::clone(&control);
            set.spawn(async move { worker_loop(worker, rx, counters, control).await });
        }

        let mut jobs = jobs.into_iter();
        for next in jobs.by_ref() {
            if control.is_stop_requested() {
                counters.not_admitted.fetch_add(1, Ordering::Relaxed);
                break;
            }
            if tx.send(next).await.is_err() {
                counters.not_admitted.fetch_add(1, Ordering::Relaxed);
                break;
            }
        }
        let rest = jobs.count();
        counters.not_admitted.fetch_add(rest, Ordering::Relaxed);
        drop(tx);

        while let Some(res) = set.join_next().await {
            if let Err(e) = res {
                tracing::error!("scheduler worker exited abnormally: {}", e);
            }
        }

        PoolReport {
            completed: counters.completed.load(Ordering::Relaxed),
            failed: counters.failed.load(Ordering::Relaxed),
            not_admitted: counters.not_admitted.load(Ordering::Relaxed),
        }
    }
}

async fn worker_loop(
    worker: usize,
    rx: Arc<Mutex<mpsc::Receiver<Job>>>,
    counters: Arc<Counters>,
    control: Arc<RunControl>,
) {
    loop {
        let next = { rx.lock().await.recv().await };
        let Some(job) = next else {
            break;
        };
        if control.is_stop_requested() {
            counters.not_admitted.fetch_add(1, Ordering::Relaxed);
            continue;
        }

        // Own task per job: a panic is reported here instead of killing the worker.
        match tokio::spawn(job()).await {
            Ok(Ok(())) => {
                counters.completed.fetch_add(1, Ordering::Relaxed);
            }
            Ok(Err(e)) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(worker, "job failed: {:#}", e);
            }
            Err(e) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!(worker, "job panicked: {}", e);
            }
        }
    }
    tracing::trace!(worker, "worker drained");
}
