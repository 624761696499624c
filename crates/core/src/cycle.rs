//! Cycle positions and spoken date rendering.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A position in the feed's repeating menu cycle.
///
/// `weekday` uses 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleIndex {
    pub week: u32,
    pub weekday: u32,
}

impl CycleIndex {
    /// Days since the start of the cycle.
    pub fn day_index(&self) -> u32 {
        self.week * 7 + self.weekday
    }

    /// Monday through Friday.
    pub fn is_serving_day(&self) -> bool {
        (1..=5).contains(&self.weekday)
    }
}

/// Render a date the way it is spoken, e.g. "Tuesday October 7 2025".
pub fn spoken_date(date: NaiveDate) -> String {
    date.format("%A %B %-d %Y").to_string()
}

/// Full English month name of a date.
pub fn month_name(date: NaiveDate) -> &'static str {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    MONTHS[date.month0() as usize]
}
