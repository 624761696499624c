//! Menu feed sources for Lunchline.
//!
//! All sources implement the `lunchline_core::FeedSource` trait.
//! [`build_from_config`] picks one based on configuration.

pub mod file;
pub mod fixed;
pub mod http;

pub use file::FileFeedSource;
pub use fixed::StaticFeedSource;
pub use http::HttpFeedSource;

use std::sync::Arc;
use std::time::Duration;

use lunchline_core::FeedSource;
use lunchline_core::error::FeedError;

/// Build the feed source described by the configuration.
///
/// A configured `feed.file` wins over `feed.url`.
pub fn build_from_config(
    config: &lunchline_config::AppConfig,
) -> Result<Arc<dyn FeedSource>, FeedError> {
    if let Some(path) = &config.feed.file {
        tracing::info!(path = %path.display(), "Using file menu feed");
        return Ok(Arc::new(FileFeedSource::new(path)));
    }

    tracing::info!(url = %config.feed.url, "Using HTTP menu feed");
    let source = HttpFeedSource::new(
        &config.feed.url,
        Duration::from_secs(config.feed.timeout_secs),
    )?;
    Ok(Arc::new(source))
}
