//! List Filtering
//!
//! Predicates the item list can be narrowed by. Every predicate that is set
//! must match; unset predicates mean "all". Results keep collection order.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::{Item, UsedStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemFilter {
    pub category: Option<String>,
    pub status: Option<UsedStatus>,
    pub location: Option<String>,
    /// Inclusive lower bound on `date_added`
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `date_added`
    pub date_to: Option<DateTime<Utc>>,
    /// Case-insensitive substring of name or notes
    pub search_text: Option<String>,
}

impl ItemFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.status.is_none()
            && self.location.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.search_needle().is_none()
    }

    fn search_needle(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.matches_with(item, self.search_needle().as_deref())
    }

    fn matches_with(&self, item: &Item, needle: Option<&str>) -> bool {
        if let Some(category) = &self.category {
            if &item.category != category {
                return false;
            }
        }
        if let Some(status) = self.status {
            if item.used_status != status {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if item.location.as_ref() != Some(location) {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if item.date_added < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if item.date_added > to {
                return false;
            }
        }
        if let Some(needle) = needle {
            let in_name = item.name.to_lowercase().contains(needle);
            let in_notes = item
                .notes
                .as_deref()
                .map(|n| n.to_lowercase().contains(needle))
                .unwrap_or(false);
            if !in_name && !in_notes {
                return false;
            }
        }
        true
    }

    /// Matching items, in the order they appear in `items`
    pub fn apply(&self, items: &[Item]) -> Vec<Item> {
        let needle = self.search_needle();
        items
            .iter()
            .filter(|item| self.matches_with(item, needle.as_deref()))
            .cloned()
            .collect()
    }
}

/// Categories present on items, in order of first appearance
pub fn distinct_categories(items: &[Item]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.category.as_str()))
        .map(|item| item.category.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::parse_timestamp;

    fn item(id: &str, name: &str, category: &str, location: &str, status: UsedStatus, added: &str) -> Item {
        let mut item = Item::with_id(
            id.to_string(),
            name.to_string(),
            category.to_string(),
            parse_timestamp(added).unwrap(),
        )
        .with_location(location);
        item.used_status = status;
        item
    }

    fn fixture() -> Vec<Item> {
        vec![
            item("1", "Hammer", "Tools", "Garage", UsedStatus::Unused, "2024-01-05T00:00:00Z"),
            item("2", "Saw", "Tools", "Garage", UsedStatus::Used, "2024-02-10T00:00:00Z"),
            item("3", "Blender", "Kitchen", "Kitchen", UsedStatus::Unused, "2024-03-15T00:00:00Z"),
            item("4", "Wrench", "Tools", "Shed", UsedStatus::Unused, "2024-04-20T00:00:00Z")
                .with_notes("Spare for the bike"),
            item("5", "Bike", "Sports", "Shed", UsedStatus::Used, "2024-05-25T00:00:00Z"),
        ]
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let filter = ItemFilter::default();
        assert!(filter.is_empty());
        assert_eq!(ids(&filter.apply(&fixture())), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_category_and_status() {
        let filter = ItemFilter {
            category: Some("Tools".to_string()),
            status: Some(UsedStatus::Unused),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&fixture())), vec!["1", "4"]);
    }

    #[test]
    fn test_location() {
        let filter = ItemFilter {
            location: Some("Shed".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&fixture())), vec!["4", "5"]);
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let filter = ItemFilter {
            date_from: Some(parse_timestamp("2024-02-10T00:00:00Z").unwrap()),
            date_to: Some(parse_timestamp("2024-04-20T00:00:00Z").unwrap()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&fixture())), vec!["2", "3", "4"]);
    }

    #[test]
    fn test_search_matches_name_or_notes() {
        let filter = ItemFilter {
            search_text: Some("BIKE".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&fixture())), vec!["4", "5"]);

        let blank = ItemFilter {
            search_text: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(blank.is_empty());
    }

    #[test]
    fn test_location_filter_skips_items_without_location() {
        let mut items = fixture();
        items[0].location = None;
        let filter = ItemFilter {
            location: Some("Garage".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&items)), vec!["2"]);
    }

    #[test]
    fn test_distinct_categories() {
        assert_eq!(distinct_categories(&fixture()), vec!["Tools", "Kitchen", "Sports"]);
    }
}
