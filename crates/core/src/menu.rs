//! Menu domain types: categories, the per-day category mapping, and the
//! station-slot table that ties feed positions to categories.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A menu category, in the fixed order it is disclosed to the user.
///
/// The derived `Ord` follows declaration order, which is what pins the
/// iteration order of [`CategoryMenu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Entrees,
    Soups,
    Salads,
    Deli,
    Dessert,
}

impl Category {
    /// All categories in disclosure order.
    pub const ALL: [Category; 5] = [
        Category::Entrees,
        Category::Soups,
        Category::Salads,
        Category::Deli,
        Category::Dessert,
    ];

    /// The name used in speech and on cards.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Entrees => "Entrees",
            Category::Soups => "Soups",
            Category::Salads => "Salads",
            Category::Deli => "Deli",
            Category::Dessert => "Fruit and Dessert",
        }
    }

    /// 1-based position in the disclosure order.
    pub fn position(&self) -> u8 {
        match self {
            Category::Entrees => 1,
            Category::Soups => 2,
            Category::Salads => 3,
            Category::Deli => 4,
            Category::Dessert => 5,
        }
    }

    /// Inverse of [`Category::position`].
    pub fn from_position(position: u8) -> Option<Self> {
        Self::ALL.get(usize::from(position).checked_sub(1)?).copied()
    }

    /// The category revealed after this one, if any.
    pub fn next(&self) -> Option<Self> {
        Self::from_position(self.position() + 1)
    }

    /// Whether this is the final category of a conversation.
    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Category name to ordered item labels, for one resolved day.
///
/// Categories with nothing on offer are absent rather than empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMenu {
    entries: BTreeMap<Category, Vec<String>>,
}

impl CategoryMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category's items. Empty lists are ignored.
    pub fn insert(&mut self, category: Category, items: Vec<String>) {
        if !items.is_empty() {
            self.entries.insert(category, items);
        }
    }

    /// Items for a category, if it is on the menu.
    pub fn get(&self, category: Category) -> Option<&[String]> {
        self.entries.get(&category).map(|items| items.as_slice())
    }

    pub fn contains(&self, category: Category) -> bool {
        self.entries.contains_key(&category)
    }

    pub fn has_entrees(&self) -> bool {
        self.contains(Category::Entrees)
    }

    /// Categories present, in disclosure order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Station-slot number to category, the explicit table handed to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationTable {
    slots: Vec<(usize, Category)>,
}

impl StationTable {
    /// Build a table from `(slot, category)` pairs.
    pub fn new(slots: impl IntoIterator<Item = (usize, Category)>) -> Self {
        let mut slots: Vec<_> = slots.into_iter().collect();
        slots.sort_by_key(|(_, category)| *category);
        Self { slots }
    }

    /// The station slot a category is served from.
    pub fn slot_for(&self, category: Category) -> Option<usize> {
        self.slots
            .iter()
            .find(|(_, c)| *c == category)
            .map(|(slot, _)| *slot)
    }

    /// `(slot, category)` pairs in disclosure order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Category)> + '_ {
        self.slots.iter().copied()
    }
}

impl Default for StationTable {
    /// The provider's standard station layout.
    fn default() -> Self {
        Self::new([
            (3, Category::Entrees),
            (0, Category::Soups),
            (4, Category::Salads),
            (2, Category::Deli),
            (8, Category::Dessert),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_is_fixed() {
        let names: Vec<_> = Category::ALL.iter().map(|c| c.display_name()).collect();
        assert_eq!(
            names,
            vec!["Entrees", "Soups", "Salads", "Deli", "Fruit and Dessert"]
        );
        assert_eq!(Category::Deli.next(), Some(Category::Dessert));
        assert!(Category::Dessert.is_last());
        assert_eq!(Category::from_position(0), None);
        assert_eq!(Category::from_position(6), None);
    }

    #[test]
    fn menu_iterates_in_disclosure_order() {
        let mut menu = CategoryMenu::new();
        menu.insert(Category::Dessert, vec!["Brownie".into()]);
        menu.insert(Category::Soups, vec!["Minestrone".into()]);
        menu.insert(Category::Entrees, vec!["Tacos".into()]);

        let order: Vec<_> = menu.categories().collect();
        assert_eq!(
            order,
            vec![Category::Entrees, Category::Soups, Category::Dessert]
        );
    }

    #[test]
    fn empty_items_are_not_stored() {
        let mut menu = CategoryMenu::new();
        menu.insert(Category::Salads, vec![]);
        assert!(!menu.contains(Category::Salads));
        assert!(menu.is_empty());
    }

    #[test]
    fn menu_serializes_with_category_keys() {
        let mut menu = CategoryMenu::new();
        menu.insert(Category::Entrees, vec!["Mac and Cheese".into()]);
        let json = serde_json::to_value(&menu).unwrap();
        assert_eq!(json["entrees"][0], "Mac and Cheese");
        let back: CategoryMenu = serde_json::from_value(json).unwrap();
        assert_eq!(back, menu);
    }

    #[test]
    fn default_station_table() {
        let table = StationTable::default();
        assert_eq!(table.slot_for(Category::Entrees), Some(3));
        assert_eq!(table.slot_for(Category::Dessert), Some(8));
        let order: Vec<_> = table.iter().map(|(_, c)| c).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }
}
