//! Date resolver — calendar date to cycle position.
//!
//! The feed repeats a fixed number of weeks starting at its anchor date.
//! A target date lands in week `floor(days_since_anchor / 7)` on its own
//! day of the week (0 = Sunday).

use chrono::{Datelike, NaiveDate};
use lunchline_core::cycle::{CycleIndex, spoken_date};
use lunchline_core::error::MenuError;
use tracing::debug;

/// The only date format accepted from the user.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Turn the date slot into a calendar date.
///
/// An absent slot means `today`. A present slot that is not `YYYY-MM-DD`
/// is a [`MenuError::DateUnparsable`], never a silent fallback to today.
pub fn parse_requested_date(slot: Option<&str>, today: NaiveDate) -> Result<NaiveDate, MenuError> {
    let Some(raw) = slot.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(today);
    };

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
        debug!(input = raw, error = %e, "Rejected date slot");
        MenuError::DateUnparsable {
            input: raw.to_string(),
        }
    })
}

/// Map `target` onto the cycle anchored at `anchor`.
///
/// Weekends are rejected before the range check, so a Saturday is always a
/// non-service day no matter how long the cycle is.
pub fn resolve_cycle_index(
    anchor: NaiveDate,
    target: NaiveDate,
    cycle_length: u32,
) -> Result<CycleIndex, MenuError> {
    let weekday = target.weekday().num_days_from_sunday();
    if !(1..=5).contains(&weekday) {
        return Err(MenuError::NonServiceDay {
            date: spoken_date(target),
        });
    }

    let days_diff = target.signed_duration_since(anchor).num_days();
    let week = days_diff.div_euclid(7);
    if week < 0 || week >= i64::from(cycle_length) {
        debug!(%anchor, %target, week, cycle_length, "Date outside menu cycle");
        return Err(MenuError::DateOutOfCycleRange {
            date: spoken_date(target),
        });
    }

    let index = CycleIndex {
        week: week as u32,
        weekday,
    };
    debug!(%target, week = index.week, weekday, day = index.day_index(), "Resolved cycle index");
    Ok(index)
}
