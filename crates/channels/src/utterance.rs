//! Keyword recognizer for typed utterances.
//!
//! Voice hosts do their own intent recognition. The terminal has none, so
//! this maps a typed line onto the same intents a voice host would send.

use chrono::{Days, NaiveDate};
use lunchline_core::skill::IntentRequest;

/// Slot the menu intent reads its date from.
const DAY_SLOT: &str = "day";

/// Prefixes stripped before looking for a date.
const MENU_PREFIXES: [&str; 4] = ["menu for", "lunch for", "menu on", "lunch on"];

/// Map a typed line to an intent.
///
/// `today` resolves relative words like "tomorrow" into a `YYYY-MM-DD`
/// slot. Anything that is not a known keyword is passed through as the date
/// slot, so the skill gets to say it did not understand the date.
pub fn recognize(line: &str, today: NaiveDate) -> IntentRequest {
    let text = line
        .trim()
        .trim_end_matches(['.', '!', '?'])
        .to_lowercase();

    match text.as_str() {
        "help" | "what can i say" => IntentRequest::new("AMAZON.HelpIntent"),
        "stop" | "bye" | "goodbye" => IntentRequest::new("AMAZON.StopIntent"),
        "cancel" => IntentRequest::new("AMAZON.CancelIntent"),
        "no" | "no thanks" | "nope" => IntentRequest::new("AMAZON.NoIntent"),
        "yes" | "yes please" | "sure" => IntentRequest::new("AMAZON.YesIntent"),
        "more" => IntentRequest::new("AMAZON.MoreIntent"),
        "next" => IntentRequest::new("AMAZON.NextIntent"),
        "" | "today" | "menu" | "lunch" | "what's for lunch" => {
            IntentRequest::new("GetMenuIntent")
        }
        _ => {
            let day = MENU_PREFIXES
                .iter()
                .find_map(|prefix| text.strip_prefix(prefix))
                .unwrap_or(&text)
                .trim();
            menu_for(day, today)
        }
    }
}

fn menu_for(day: &str, today: NaiveDate) -> IntentRequest {
    let intent = IntentRequest::new("GetMenuIntent");
    let resolved = match day {
        "today" => return intent,
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => None,
    };
    match resolved {
        Some(date) => intent.with_slot(DAY_SLOT, date.format("%Y-%m-%d").to_string()),
        None => intent.with_slot(DAY_SLOT, day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 8).unwrap()
    }

    #[test]
    fn keywords_map_to_intents() {
        assert_eq!(recognize("help", today()).name, "AMAZON.HelpIntent");
        assert_eq!(recognize("Stop.", today()).name, "AMAZON.StopIntent");
        assert_eq!(recognize("cancel", today()).name, "AMAZON.CancelIntent");
        assert_eq!(recognize("No", today()).name, "AMAZON.NoIntent");
        assert_eq!(recognize("yes", today()).name, "AMAZON.YesIntent");
        assert_eq!(recognize("more", today()).name, "AMAZON.MoreIntent");
        assert_eq!(recognize("next", today()).name, "AMAZON.NextIntent");
    }

    #[test]
    fn today_has_no_slot() {
        let intent = recognize("today", today());
        assert_eq!(intent.name, "GetMenuIntent");
        assert_eq!(intent.slot(DAY_SLOT), None);
        assert_eq!(recognize("menu for today", today()).slot(DAY_SLOT), None);
    }

    #[test]
    fn dates_fill_the_slot() {
        let intent = recognize("2025-09-09", today());
        assert_eq!(intent.name, "GetMenuIntent");
        assert_eq!(intent.slot(DAY_SLOT), Some("2025-09-09"));

        let intent = recognize("Menu for 2025-10-07?", today());
        assert_eq!(intent.slot(DAY_SLOT), Some("2025-10-07"));
    }

    #[test]
    fn relative_days_resolve() {
        assert_eq!(
            recognize("tomorrow", today()).slot(DAY_SLOT),
            Some("2025-09-09")
        );
        assert_eq!(
            recognize("lunch for yesterday", today()).slot(DAY_SLOT),
            Some("2025-09-07")
        );
    }

    #[test]
    fn unknown_text_is_passed_as_the_date() {
        let intent = recognize("the ides of march", today());
        assert_eq!(intent.name, "GetMenuIntent");
        assert_eq!(intent.slot(DAY_SLOT), Some("the ides of march"));
    }
}
