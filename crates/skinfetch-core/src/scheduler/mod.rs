//! Concurrency-bounded job scheduler.
//!
//! Jobs are opaque deferred actions; the scheduler knows nothing about
//! assets, URLs or files. At most `workers` jobs run at once, queued jobs are
//! admitted in FIFO order as running ones complete, and a failing job never
//! takes its siblings down.

mod job;
mod pool;

pub use job::{job, Job, JobFuture};
pub use pool::{PoolReport, WorkerPool};
