//! In-process `RemoteHost` for pipeline tests.
//!
//! Answers from a URL table (404 for anything unknown), can fail chosen URLs
//! at the transport level, and records every request plus peak concurrency.

use async_trait::async_trait;
use skinfetch_core::remote::{HttpResponse, RemoteHost};
use skinfetch_core::retry::FetchError;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MockHost {
    responses: HashMap<String, (u32, Vec<u8>)>,
    broken: HashSet<String>,
    delay: Duration,
    requests: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: &str, body: &[u8]) -> Self {
        self.responses.insert(url.to_string(), (200, body.to_vec()));
        self
    }

    pub fn status(mut self, url: &str, status: u32) -> Self {
        self.responses.insert(url.to_string(), (status, Vec::new()));
        self
    }

    /// Requests to `url` fail as if the connection dropped.
    pub fn unreachable(mut self, url: &str) -> Self {
        self.broken.insert(url.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteHost for MockHost {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.broken.contains(url) {
            return Err(FetchError::Task("connection reset by peer".to_string()));
        }
        let (status, body) = self
            .responses
            .get(url)
            .cloned()
            .unwrap_or((404, Vec::new()));
        Ok(HttpResponse { status, body })
    }
}
