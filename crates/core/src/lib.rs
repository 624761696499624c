//! # Lunchline Core
//!
//! Domain types, traits, and error definitions for the Lunchline school-lunch
//! menu skill. This crate does no I/O — it defines the domain model that all
//! other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator (feed fetch, clock, front-end channel) is a trait here.
//! Implementations live in their respective crates, so tests can swap in
//! fixed clocks and canned feeds.

pub mod channel;
pub mod clock;
pub mod cycle;
pub mod error;
pub mod feed;
pub mod menu;
pub mod session;
pub mod skill;

// Re-export key types at crate root for ergonomics
pub use channel::{Channel, ChannelId, ChannelMessage};
pub use clock::{Clock, FixedClock, SystemClock};
pub use cycle::{CycleIndex, month_name, spoken_date};
pub use error::{ChannelError, Error, FeedError, MenuError, Result};
pub use feed::FeedSource;
pub use menu::{Category, CategoryMenu, StationTable};
pub use session::{SessionAttributes, SessionId};
pub use skill::{Card, IntentRequest, OutputSpeech, RequestKind, SkillRequest, SkillResponse};
