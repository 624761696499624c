//! Menu-cycle logic for Lunchline.
//!
//! - [`resolver`] maps a calendar date onto the feed's repeating week cycle.
//! - [`feed`] decodes the provider's raw document into a [`MenuFeed`].
//! - [`parser`] pulls one day's categories out of a decoded feed.
//!
//! Everything here is pure: no clock reads, no network.

pub mod feed;
pub mod parser;
pub mod resolver;

pub use feed::MenuFeed;
pub use parser::{parse_menu, sanitize_label};
pub use resolver::{DATE_FORMAT, parse_requested_date, resolve_cycle_index};
