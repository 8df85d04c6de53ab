//! Request/response access to remote hosts (image host and catalog source).

mod curl_host;

pub use curl_host::{CurlHost, CurlOptions};

use async_trait::async_trait;

use crate::retry::FetchError;

/// Status and body of one GET.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Only 200 counts as "found"; any other status means try the next candidate.
    pub fn is_found(&self) -> bool {
        self.status == 200
    }
}

/// `GET url -> (status, bytes)`. Transport failures are errors; any HTTP
/// status, including 404, is a successful response.
#[async_trait]
pub trait RemoteHost: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}
