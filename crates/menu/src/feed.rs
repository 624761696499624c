//! Decoding of the provider's menu document.
//!
//! Wire layout:
//! - `menuList[1].menuFirstDate` is the cycle anchor, in epoch seconds.
//! - `menu.menu.items` holds week buckets. Bucket 0 is not part of the cycle,
//!   so cycle week `w` lives at `items[w + 1]`.
//! - `items[w + 1][weekday]` is a list of layers; layer 1 is the day's menu.
//! - The day's menu is a list of station slots, each a list of `{"a": label}`.
//!
//! Only the envelope is decoded eagerly. The per-day structure stays as JSON
//! and is checked when a specific day is read, so a short or ragged feed
//! fails only for the dates it cannot answer.

use chrono::{DateTime, NaiveDate};
use lunchline_core::cycle::CycleIndex;
use lunchline_core::error::MenuError;
use serde::Deserialize;
use serde_json::Value;

/// Listing entry that carries the active cycle's anchor.
const ACTIVE_LISTING: usize = 1;
/// Week buckets before the first cycle week.
const LEADING_BUCKETS: usize = 1;
/// Layer of a day that holds its station slots.
const MENU_LAYER: usize = 1;
/// Listing field holding the anchor timestamp.
const ANCHOR_FIELD: &str = "menuFirstDate";

/// A decoded menu feed. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuFeed {
    anchor_date: NaiveDate,
    weeks: Vec<Value>,
}

#[derive(Deserialize)]
struct RawFeed {
    /// Only the active listing is read; the others may be any shape.
    #[serde(rename = "menuList")]
    menu_list: Vec<Value>,
    menu: RawEnvelope,
}

#[derive(Deserialize)]
struct RawEnvelope {
    menu: RawBody,
}

#[derive(Deserialize)]
struct RawBody {
    items: Vec<Value>,
}

impl MenuFeed {
    /// Build a feed from an anchor date and the cycle's week buckets.
    pub fn new(anchor_date: NaiveDate, weeks: Vec<Value>) -> Self {
        Self { anchor_date, weeks }
    }

    /// Decode the provider's raw bytes.
    ///
    /// Empty input is [`MenuError::FeedUnavailable`]; anything that does not
    /// match the wire layout is [`MenuError::FeedMalformed`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MenuError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(MenuError::FeedUnavailable("feed returned no data".into()));
        }

        let raw: RawFeed = serde_json::from_slice(bytes)
            .map_err(|e| MenuError::FeedMalformed(format!("undecodable feed: {e}")))?;

        let first_date = raw
            .menu_list
            .get(ACTIVE_LISTING)
            .and_then(|listing| listing.get(ANCHOR_FIELD))
            .and_then(epoch_seconds)
            .ok_or_else(|| MenuError::FeedMalformed("feed has no cycle anchor date".into()))?;

        let anchor_date = DateTime::from_timestamp(first_date, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| {
                MenuError::FeedMalformed(format!("anchor timestamp {first_date} is out of range"))
            })?;

        let weeks = raw.menu.menu.items.into_iter().skip(LEADING_BUCKETS).collect();
        Ok(Self::new(anchor_date, weeks))
    }

    /// Calendar date of cycle week 0.
    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor_date
    }

    /// Number of week buckets in the cycle.
    pub fn cycle_length(&self) -> u32 {
        u32::try_from(self.weeks.len()).unwrap_or(u32::MAX)
    }

    /// The station slots for one day.
    pub fn stations(&self, index: CycleIndex) -> Result<&[Value], MenuError> {
        let malformed = |what: &str| {
            MenuError::FeedMalformed(format!(
                "{what} missing at week {} weekday {}",
                index.week, index.weekday
            ))
        };

        let week = self
            .weeks
            .get(index.week as usize)
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("week bucket"))?;
        let day = week
            .get(index.weekday as usize)
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("day"))?;
        let stations = day
            .get(MENU_LAYER)
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("menu layer"))?;

        Ok(stations.as_slice())
    }
}

/// An epoch-seconds timestamp sent as a JSON integer or a numeric string.
fn epoch_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
