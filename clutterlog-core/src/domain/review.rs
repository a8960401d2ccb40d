//! Usage Review
//!
//! Items untouched for longer than the review interval are queued so the
//! owner can say whether they were used. Answering stamps `last_checked`,
//! which keeps the item out of the queue for another interval.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

use super::item::{Item, UsedStatus};

pub const REVIEW_INTERVAL_DAYS: i64 = 30;

pub fn review_interval() -> Duration {
    Duration::days(REVIEW_INTERVAL_DAYS)
}

/// Later of `date_added` and `last_checked`
pub fn last_activity(item: &Item) -> DateTime<Utc> {
    match item.last_checked {
        Some(checked) if checked > item.date_added => checked,
        _ => item.date_added,
    }
}

pub fn needs_review(item: &Item, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(last_activity(item)) > review_interval()
}

/// Answer to "did you use this in the last 30 days?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAnswer {
    Yes,
    No,
}

impl ReviewAnswer {
    pub fn status(&self) -> UsedStatus {
        match self {
            ReviewAnswer::Yes => UsedStatus::Used,
            ReviewAnswer::No => UsedStatus::Unused,
        }
    }
}

/// In-memory queue of items awaiting a usage answer
#[derive(Debug, Clone, Default)]
pub struct ReviewQueue {
    items: VecDeque<Item>,
}

impl ReviewQueue {
    /// Select the items due at `now`, keeping collection order
    pub fn build(items: &[Item], now: DateTime<Utc>) -> Self {
        Self {
            items: items
                .iter()
                .filter(|item| needs_review(item, now))
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn front(&self) -> Option<&Item> {
        self.items.front()
    }

    /// Apply `answer` to the queued item `id` and drop it from the queue.
    ///
    /// Returns the updated item for the caller to persist, or None when the
    /// item is not queued.
    pub fn answer(&mut self, id: &str, answer: ReviewAnswer, now: DateTime<Utc>) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let mut item = self.items.remove(index)?;
        item.record_check(answer.status(), now);
        Some(item)
    }

    /// Drop an item without answering
    pub fn skip(&mut self, id: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        self.items.remove(index)
    }
}
