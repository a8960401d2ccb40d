//! Insights
//!
//! Aggregates shown on the insights screen.

use std::collections::HashMap;

use serde::Serialize;

use super::item::{Item, UsedStatus};

/// How many unused categories are reported
pub const TOP_CATEGORY_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub used_count: usize,
    pub unused_count: usize,
    pub used_pct: u32,
    pub unused_pct: u32,
    /// Most frequent categories among unused items, count descending, ties
    /// in order of first occurrence
    pub top_unused_categories: Vec<CategoryCount>,
    /// Unused item with the earliest `date_added`
    pub oldest_unused: Option<Item>,
}

impl Insights {
    pub fn compute(items: &[Item]) -> Self {
        let (used, unused): (Vec<&Item>, Vec<&Item>) = items
            .iter()
            .partition(|item| item.used_status == UsedStatus::Used);

        let total = used.len() + unused.len();
        let used_pct = if total == 0 {
            0
        } else {
            ((used.len() as f64 / total as f64) * 100.0).round() as u32
        };

        Self {
            used_count: used.len(),
            unused_count: unused.len(),
            used_pct,
            unused_pct: 100 - used_pct,
            top_unused_categories: top_categories(&unused, TOP_CATEGORY_LIMIT),
            oldest_unused: unused.iter().min_by_key(|item| item.date_added).map(|item| (*item).clone()),
        }
    }

    pub fn total(&self) -> usize {
        self.used_count + self.unused_count
    }
}

fn top_categories(items: &[&Item], limit: usize) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items {
        match index.get(item.category.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(item.category.as_str(), counts.len());
                counts.push(CategoryCount {
                    category: item.category.clone(),
                    count: 1,
                });
            }
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn item(id: &str, category: &str, status: UsedStatus, days_ago: i64) -> Item {
        let mut item = Item::with_id(
            id.to_string(),
            format!("Item {}", id),
            category.to_string(),
            Utc::now() - Duration::days(days_ago),
        );
        item.used_status = status;
        item
    }

    #[test]
    fn test_empty_collection() {
        let insights = Insights::compute(&[]);
        assert_eq!(insights.used_pct, 0);
        assert_eq!(insights.unused_pct, 100);
        assert!(insights.top_unused_categories.is_empty());
        assert!(insights.oldest_unused.is_none());
    }

    #[test]
    fn test_percentages() {
        let items = vec![
            item("1", "A", UsedStatus::Used, 1),
            item("2", "A", UsedStatus::Used, 1),
            item("3", "B", UsedStatus::Used, 1),
            item("4", "B", UsedStatus::Unused, 1),
        ];
        let insights = Insights::compute(&items);
        assert_eq!(insights.used_count, 3);
        assert_eq!(insights.unused_count, 1);
        assert_eq!(insights.used_pct, 75);
        assert_eq!(insights.unused_pct, 25);
    }

    #[test]
    fn test_percentages_round() {
        let items = vec![
            item("1", "A", UsedStatus::Used, 1),
            item("2", "A", UsedStatus::Unused, 1),
            item("3", "A", UsedStatus::Unused, 1),
        ];
        let insights = Insights::compute(&items);
        assert_eq!(insights.used_pct, 33);
        assert_eq!(insights.unused_pct, 67);
    }

    #[test]
    fn test_top_categories_tie_break_first_seen() {
        let items = vec![
            item("1", "Books", UsedStatus::Unused, 1),
            item("2", "Toys", UsedStatus::Unused, 1),
            item("3", "Tools", UsedStatus::Unused, 1),
            item("4", "Toys", UsedStatus::Unused, 1),
            item("5", "Games", UsedStatus::Unused, 1),
            item("6", "Tools", UsedStatus::Unused, 1),
            item("7", "Books", UsedStatus::Used, 1),
            item("8", "Games", UsedStatus::Unused, 1),
        ];
        let top: Vec<(String, usize)> = Insights::compute(&items)
            .top_unused_categories
            .into_iter()
            .map(|c| (c.category, c.count))
            .collect();
        assert_eq!(
            top,
            vec![
                ("Toys".to_string(), 2),
                ("Tools".to_string(), 2),
                ("Games".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_oldest_unused() {
        let items = vec![
            item("1", "A", UsedStatus::Unused, 5),
            item("2", "A", UsedStatus::Used, 50),
            item("3", "A", UsedStatus::Unused, 20),
        ];
        let oldest = Insights::compute(&items).oldest_unused.unwrap();
        assert_eq!(oldest.id, "3");
    }
}
