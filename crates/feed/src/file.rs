//! File feed source — reads a saved copy of the provider's document.
//!
//! Useful for offline runs and for pinning a known cycle during testing.

use async_trait::async_trait;
use lunchline_core::FeedSource;
use lunchline_core::error::FeedError;
use std::path::{Path, PathBuf};

pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl FeedSource for FileFeedSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_raw(&self) -> Result<Vec<u8>, FeedError> {
        tokio::fs::read(&self.path).await.map_err(|e| FeedError::Io {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
