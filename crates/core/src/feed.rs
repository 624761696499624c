//! FeedSource trait — the abstraction over where the raw menu feed comes from.
//!
//! A source hands back the provider's document as raw bytes. It does not
//! interpret them; decoding lives in `lunchline-menu`.

use async_trait::async_trait;
use crate::error::FeedError;

/// The fetch collaborator.
///
/// An `Ok` with no bytes means the same thing as a transport failure. Callers
/// must treat both as "feed unavailable".
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable source name (e.g., "http", "file").
    fn name(&self) -> &str;

    /// Fetch the raw feed document.
    async fn fetch_raw(&self) -> std::result::Result<Vec<u8>, FeedError>;
}
