//! Menu feed parser — one day's station slots to a [`CategoryMenu`].

use lunchline_core::cycle::CycleIndex;
use lunchline_core::error::MenuError;
use lunchline_core::menu::{CategoryMenu, StationTable};
use serde_json::Value;
use tracing::debug;

use crate::feed::MenuFeed;

/// Field of a feed entry holding its label.
const LABEL_FIELD: &str = "a";

/// Build the category mapping for one resolved day.
///
/// Only slots named in `stations` are read. A slot that is absent, null, or
/// empty leaves its category out of the result. Structural surprises (a slot
/// that is not a list, an entry without a label) are
/// [`MenuError::FeedMalformed`].
///
/// A mapping without entrees is still `Ok`; callers decide how to report it.
pub fn parse_menu(
    feed: &MenuFeed,
    index: CycleIndex,
    stations: &StationTable,
) -> Result<CategoryMenu, MenuError> {
    let slots = feed.stations(index)?;
    let mut menu = CategoryMenu::new();

    for (slot, category) in stations.iter() {
        let entries = match slots.get(slot) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(MenuError::FeedMalformed(format!(
                    "station slot {slot} is not a list: {other}"
                )));
            }
        };

        let items = entries
            .iter()
            .map(|entry| entry_label(entry, slot))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|label| !label.is_empty())
            .collect::<Vec<_>>();

        debug!(%category, slot, count = items.len(), "Parsed station");
        menu.insert(category, items);
    }

    Ok(menu)
}

/// An entry's label. Scalar labels are taken as their text; a null label
/// is empty and gets dropped.
fn entry_label(entry: &Value, slot: usize) -> Result<String, MenuError> {
    let label = match entry.get(LABEL_FIELD) {
        Some(Value::String(s)) => sanitize_label(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) => String::new(),
        _ => {
            return Err(MenuError::FeedMalformed(format!(
                "entry without a label in station slot {slot}"
            )));
        }
    };
    Ok(label)
}

/// Make a label safe to speak: `&` becomes "and".
///
/// Item labels are cleaned here once; the composer uses them as given.
pub fn sanitize_label(label: &str) -> String {
    label.replace('&', "and").trim().to_string()
}
