//! HTTP transport for upstream feeds
//!
//! One GET per call, no retries. Transport, status and decode failures are
//! returned to the caller untouched.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::FeedError;

/// Expected encoding of a feed body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Json,
    Xml,
}

/// Raw body returned by a [`Fetcher`]
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    Json(serde_json::Value),
    Xml(String),
}

/// Source of raw feed payloads
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and decode the body as `format`
    async fn fetch(&self, url: &str, format: PayloadFormat) -> Result<RawPayload, FeedError>;
}

/// [`Fetcher`] backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .user_agent("Posterfy/1.0")
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, format: PayloadFormat) -> Result<RawPayload, FeedError> {
        debug!("Fetching {:?} feed from {}", format, redact(url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::Status {
                status: response.status().as_u16(),
                url: redact(url),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Transport(e.without_url().to_string()))?;

        match format {
            PayloadFormat::Json => serde_json::from_str(&body)
                .map(RawPayload::Json)
                .map_err(|e| FeedError::Decode(e.to_string())),
            PayloadFormat::Xml => Ok(RawPayload::Xml(body)),
        }
    }
}

/// Strip the query string so API keys never reach the logs
fn redact(url: &str) -> String {
    match url.split_once('?') {
        Some((path, _)) => format!("{}?…", path),
        None => url.to_string(),
    }
}
