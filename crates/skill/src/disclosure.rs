//! Disclosure state machine — reveals a day's menu one category per turn.
//!
//! ```text
//! NotStarted ──lookup──▶ Entrees ──more──▶ Soups ──more──▶ Salads
//!                                                           │
//!                  Done ◀──more (reveals dessert)── Deli ◀──more
//! ```
//!
//! The dialog record lives in the host's session attributes under
//! [`SESSION_KEY`]. Only this module reads or writes it.

use chrono::NaiveDate;
use lunchline_core::cycle::{month_name, spoken_date};
use lunchline_core::menu::{Category, CategoryMenu};
use lunchline_core::session::SessionAttributes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::composer::{Rendered, render};

/// Session attribute holding the [`DialogSession`].
pub const SESSION_KEY: &str = "dialog";

/// How far the conversation has walked through the categories.
///
/// Stored as an integer: 0 = not started, 1..=5 = the category most recently
/// revealed, 6 = done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Stage {
    NotStarted,
    Revealed(Category),
    Done,
}

const DONE: u8 = 6;

impl From<Stage> for u8 {
    fn from(stage: Stage) -> u8 {
        match stage {
            Stage::NotStarted => 0,
            Stage::Revealed(category) => category.position(),
            Stage::Done => DONE,
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Stage::NotStarted),
            DONE => Ok(Stage::Done),
            n => Category::from_position(n)
                .map(Stage::Revealed)
                .ok_or_else(|| format!("invalid dialog stage {n}")),
        }
    }
}

impl Stage {
    /// The transition function: which category a "more" reveals from here,
    /// and the stage after revealing it.
    ///
    /// Revealing the last category moves straight to `Done`. There is no
    /// transition out of `Done`.
    pub fn next_reveal(self) -> Option<(Category, Stage)> {
        let category = match self {
            Stage::NotStarted => Category::Entrees,
            Stage::Revealed(current) => current.next()?,
            Stage::Done => return None,
        };
        let next = if category.is_last() {
            Stage::Done
        } else {
            Stage::Revealed(category)
        };
        Some((category, next))
    }

    pub fn is_active(self) -> bool {
        matches!(self, Stage::Revealed(_))
    }
}

/// Everything the conversation remembers between turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSession {
    stage: Stage,
    target_date: NaiveDate,
    target_month: String,
    target_date_label: String,
    menu: CategoryMenu,
}

impl DialogSession {
    /// Read the dialog record, if one is stored.
    pub fn load(attributes: &SessionAttributes) -> Option<Self> {
        attributes.get_as(SESSION_KEY)
    }

    fn save(&self, attributes: &mut SessionAttributes) -> Result<(), serde_json::Error> {
        attributes.set_as(SESSION_KEY, self)
    }

    /// Forget any dialog in progress.
    pub fn clear(attributes: &mut SessionAttributes) {
        attributes.remove(SESSION_KEY);
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn target_date(&self) -> NaiveDate {
        self.target_date
    }

    pub fn target_month(&self) -> &str {
        &self.target_month
    }

    /// Spoken rendering of the target date, e.g. "Monday September 8 2025".
    pub fn target_date_label(&self) -> &str {
        &self.target_date_label
    }

    pub fn menu(&self) -> &CategoryMenu {
        &self.menu
    }

    /// Card title, identical on every turn of one lookup.
    pub fn card_title(&self) -> String {
        format!(
            "Menu for {} {}",
            self.target_month,
            self.target_date.format("%Y-%m-%d")
        )
    }
}

/// One category revealed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub category: Category,
    pub rendered: Rendered,
    pub card_title: String,
    /// Stage stored after this reveal
    pub stage: Stage,
}

/// Begin a conversation about `date` with its parsed `menu`.
///
/// Always reveals entrees and stores stage 1, even when the day has none,
/// so "more" keeps working. Any earlier dialog is replaced.
pub fn start(
    attributes: &mut SessionAttributes,
    date: NaiveDate,
    menu: CategoryMenu,
) -> Result<Reveal, serde_json::Error> {
    let session = DialogSession {
        stage: Stage::NotStarted,
        target_date: date,
        target_month: month_name(date).to_string(),
        target_date_label: spoken_date(date),
        menu,
    };
    info!(date = %date, categories = session.menu.len(), "Starting menu dialog");
    reveal(
        attributes,
        session,
        Category::Entrees,
        Stage::Revealed(Category::Entrees),
    )
}

/// Reveal the next category of the stored dialog.
///
/// Returns `Ok(None)` when there is no dialog to continue (never started,
/// already done, or unreadable). The caller treats that as a fresh start.
pub fn advance(attributes: &mut SessionAttributes) -> Result<Option<Reveal>, serde_json::Error> {
    let Some(session) = DialogSession::load(attributes) else {
        debug!("No dialog in session");
        return Ok(None);
    };
    if !session.stage.is_active() {
        debug!(stage = u8::from(session.stage), "Dialog not active");
        return Ok(None);
    }
    let Some((category, next)) = session.stage.next_reveal() else {
        return Ok(None);
    };
    reveal(attributes, session, category, next).map(Some)
}

fn reveal(
    attributes: &mut SessionAttributes,
    mut session: DialogSession,
    category: Category,
    next: Stage,
) -> Result<Reveal, serde_json::Error> {
    let items = session.menu.get(category).unwrap_or_default();
    let rendered = render(category, items, &session.target_date_label);

    session.stage = next;
    session.save(attributes)?;
    debug!(%category, stage = u8::from(next), "Revealed category");

    Ok(Reveal {
        category,
        rendered,
        card_title: session.card_title(),
        stage: next,
    })
}
