use std::future::Future;
use std::pin::Pin;

/// Future produced by a job once admitted.
pub type JobFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;

/// Zero-argument deferred action. Owned by the pool while queued or running.
pub type Job = Box<dyn FnOnce() -> JobFuture + Send + 'static>;

/// Box an async closure as a `Job`.
pub fn job<F, Fut>(f: F) -> Job
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Box::new(move || Box::pin(f()) as JobFuture)
}
