//! Error types for the Lunchline domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Lunchline operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Menu lookup errors ---
    #[error("Menu error: {0}")]
    Menu(#[from] MenuError),

    // --- Feed fetch errors ---
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    // --- Channel errors ---
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Everything that can go wrong while answering a menu question.
///
/// Each variant maps to its own spoken wording. Date-bearing variants carry
/// the spoken rendering of the date (e.g. "Tuesday October 7 2025").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    #[error("Could not understand the date: {input}")]
    DateUnparsable { input: String },

    #[error("Date outside known cycle range: {date}")]
    DateOutOfCycleRange { date: String },

    #[error("No service on this day: {date}")]
    NonServiceDay { date: String },

    #[error("Menu feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("Menu feed malformed for this date: {0}")]
    FeedMalformed(String),

    #[error("No entrees for this date: {date}")]
    NoEntreesFound { date: String },

    #[error("No dialog in progress")]
    InvalidDialogState,
}

impl MenuError {
    /// Whether the user may simply try again later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::FeedUnavailable(_) | Self::FeedMalformed(_))
    }
}

/// Failures of the feed fetch collaborator.
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Feed request failed with status {status_code}")]
    Status { status_code: u16 },

    #[error("Failed to read feed file {path}: {reason}")]
    Io { path: String, reason: String },
}

impl From<FeedError> for MenuError {
    fn from(err: FeedError) -> Self {
        MenuError::FeedUnavailable(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Channel connection lost: {0}")]
    ConnectionLost(String),
}
