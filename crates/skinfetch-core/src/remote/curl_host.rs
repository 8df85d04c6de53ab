//! libcurl-backed `RemoteHost`.
//!
//! Each GET runs on the blocking pool with its own Easy handle, so many
//! requests can be outstanding while the async side only awaits them.

use async_trait::async_trait;
use std::time::Duration;

use super::{HttpResponse, RemoteHost};
use crate::retry::FetchError;

/// Per-request curl settings.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_redirections: u32,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(120),
            max_redirections: 10,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CurlHost {
    opts: CurlOptions,
}

impl CurlHost {
    pub fn new(opts: CurlOptions) -> Self {
        Self { opts }
    }
}

/// Performs a GET in the current thread, following redirects.
/// Call from `spawn_blocking` when used from async code.
fn get_blocking(url: &str, opts: CurlOptions) -> Result<HttpResponse, curl::Error> {
    let mut body = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;
    easy.useragent(concat!("skinfetch/", env!("CARGO_PKG_VERSION")))?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    Ok(HttpResponse { status, body })
}

#[async_trait]
impl RemoteHost for CurlHost {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let opts = self.opts;
        let owned = url.to_string();
        let resp = tokio::task::spawn_blocking(move || get_blocking(&owned, opts))
            .await
            .map_err(|e| FetchError::Task(e.to_string()))??;
        tracing::trace!(url, status = resp.status, bytes = resp.body.len(), "GET");
        Ok(resp)
    }
}
