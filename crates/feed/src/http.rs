//! HTTP feed source — fetches the provider's menu document.
//!
//! One GET per turn, no retries. Any transport failure, timeout, or non-2xx
//! status is reported as a `FeedError`; the skill turns that into a
//! "try again later" reply.

use async_trait::async_trait;
use lunchline_core::FeedSource;
use lunchline_core::error::FeedError;
use std::time::Duration;
use tracing::{debug, warn};

pub struct HttpFeedSource {
    url: String,
    client: reqwest::Client,
}

impl HttpFeedSource {
    /// Create a source for `url` with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_raw(&self) -> Result<Vec<u8>, FeedError> {
        debug!(url = %self.url, "Fetching menu feed");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            warn!(url = %self.url, error = %e, "Menu feed request failed");
            if e.is_timeout() {
                FeedError::Timeout(e.to_string())
            } else {
                FeedError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "Menu feed returned error status");
            return Err(FeedError::Status {
                status_code: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FeedError::Network(format!("failed to read body: {e}")))?;

        debug!(bytes = body.len(), "Fetched menu feed");
        Ok(body.to_vec())
    }
}
