//! In-memory feed source with a scripted outcome.

use async_trait::async_trait;
use lunchline_core::FeedSource;
use lunchline_core::error::FeedError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns the same bytes (or the same failure) on every fetch.
pub struct StaticFeedSource {
    outcome: Result<Vec<u8>, FeedError>,
    fetches: AtomicUsize,
}

impl StaticFeedSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            outcome: Ok(bytes.into()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// A source whose every fetch fails with `error`.
    pub fn failing(error: FeedError) -> Self {
        Self {
            outcome: Err(error),
            fetches: AtomicUsize::new(0),
        }
    }

    /// How many times the feed was fetched.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_raw(&self) -> Result<Vec<u8>, FeedError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
