//! Usage Review Commands

use chrono::{DateTime, Utc};

use crate::domain::{Item, ReviewAnswer, ReviewQueue};
use crate::repository::Repository;
use crate::AppState;

/// Items due for a usage check right now
pub async fn review_queue(state: &AppState) -> Result<ReviewQueue, String> {
    review_queue_at(state, Utc::now()).await
}

pub async fn review_queue_at(state: &AppState, now: DateTime<Utc>) -> Result<ReviewQueue, String> {
    let items = state.item_repo.list().await.map_err(|e| e.to_string())?;
    let queue = ReviewQueue::build(&items, now);
    log::debug!("{} of {} items due for review", queue.len(), items.len());
    Ok(queue)
}

/// Record the answer for a queued item and persist it.
///
/// Returns None when `id` is not in the queue.
pub async fn answer_review(
    state: &AppState,
    queue: &mut ReviewQueue,
    id: &str,
    answer: ReviewAnswer,
) -> Result<Option<Item>, String> {
    let Some(updated) = queue.answer(id, answer, Utc::now()) else {
        return Ok(None);
    };
    state.item_repo.update(&updated).await.map_err(|e| e.to_string())?;
    Ok(Some(updated))
}
