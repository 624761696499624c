//! The multi-turn lunch menu dialog — the heart of Lunchline.
//!
//! A conversation goes:
//!
//! 1. **Ask** for a day (or none, meaning today)
//! 2. **Resolve** the day onto the feed's menu cycle and parse its categories
//! 3. **Reveal** entrees and store the rest of the day's menu in the session
//! 4. **More?** Each "yes" reveals the next category, in fixed order, until
//!    fruit and dessert closes the conversation
//!
//! [`LunchSkill`] is the intent dispatcher the host talks to. The
//! [`disclosure`] state machine is the only code that reads or writes the
//! dialog record in the session, and [`composer`] turns one category into
//! speech and card text.

pub mod composer;
pub mod disclosure;
pub mod session;
pub mod skill;

pub use composer::{MORE_PROMPT, Rendered, render};
pub use disclosure::{DialogSession, Reveal, SESSION_KEY, Stage};
pub use session::InMemorySessionStore;
pub use skill::{LunchSkill, Wording};
