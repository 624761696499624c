//! Conversational front ends for Lunchline.
//!
//! Voice hosts call the skill directly. The terminal is the one channel
//! shipped here, together with the keyword recognizer that stands in for
//! the host's intent recognition.
//!
//! Available pieces:
//! - **CLI** — Interactive terminal conversation (stdin/stdout)
//! - **Utterance** — Typed line to intent mapping

pub mod cli;
pub mod utterance;

pub use cli::{CLI_CHAT_ID, CliChannel, is_exit_command};
pub use utterance::recognize;
