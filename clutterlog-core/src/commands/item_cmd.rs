//! Item Commands
//!
//! Item editor, item list and item detail operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{distinct_categories, truncate_to_millis, DomainError, Item, ItemFilter, UsedStatus};
use crate::repository::Repository;
use crate::AppState;

/// Fields the item editor collects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    pub category: String,
    pub location: String,
    pub notes: Option<String>,
    /// Defaults to now for new items, keeps the stored value on edit
    pub date_added: Option<DateTime<Utc>>,
    pub photo_uri: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ItemDraft {
    /// Copy the draft onto `item`, trimming text fields
    fn apply_to(self, item: &mut Item) {
        item.name = self.name.trim().to_string();
        item.category = self.category.trim().to_string();
        item.location = non_empty(Some(self.location));
        item.notes = non_empty(self.notes);
        item.photo_uri = non_empty(self.photo_uri);
        if let Some(date_added) = self.date_added {
            item.date_added = truncate_to_millis(date_added);
        }
    }

    /// Prefill from an existing item
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.clone(),
            location: item.location.clone().unwrap_or_default(),
            notes: item.notes.clone(),
            date_added: Some(item.date_added),
            photo_uri: item.photo_uri.clone(),
        }
    }
}

/// Create a new item
pub async fn create_item(state: &AppState, draft: ItemDraft) -> Result<Item, String> {
    let mut item = Item::new(String::new(), String::new());
    draft.apply_to(&mut item);
    item.validate(Utc::now()).map_err(|e| e.to_string())?;

    let created = state.item_repo.create(&item).await.map_err(|e| e.to_string())?;
    log::info!("Item '{}' added ({})", created.name, created.id);
    Ok(created)
}

/// Items matching `filter`, in the order they were added
pub async fn list_items(state: &AppState, filter: &ItemFilter) -> Result<Vec<Item>, String> {
    let items = state.item_repo.list().await.map_err(|e| e.to_string())?;
    Ok(filter.apply(&items))
}

/// Categories that appear on at least one item (list screen picker)
pub async fn list_item_categories(state: &AppState) -> Result<Vec<String>, String> {
    let items = state.item_repo.list().await.map_err(|e| e.to_string())?;
    Ok(distinct_categories(&items))
}

/// Get item by ID
pub async fn get_item(state: &AppState, id: &str) -> Result<Option<Item>, String> {
    state
        .item_repo
        .find_by_id(&id.to_string())
        .await
        .map_err(|e| e.to_string())
}

async fn require_item(state: &AppState, id: &str) -> Result<Item, String> {
    get_item(state, id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Item {}", id)).to_string())
}

/// Save the editor's fields over an existing item. Usage status and last
/// check are kept.
pub async fn update_item(state: &AppState, id: &str, draft: ItemDraft) -> Result<Item, String> {
    let mut item = require_item(state, id).await?;
    draft.apply_to(&mut item);
    item.validate(Utc::now()).map_err(|e| e.to_string())?;

    state.item_repo.update(&item).await.map_err(|e| e.to_string())
}

/// Delete item
pub async fn delete_item(state: &AppState, id: &str) -> Result<(), String> {
    state
        .item_repo
        .delete(&id.to_string())
        .await
        .map_err(|e| e.to_string())?;
    log::info!("Item {} deleted", id);
    Ok(())
}

/// Mark an item used or unused from its detail view; counts as a usage check
pub async fn mark_item_status(state: &AppState, id: &str, status: UsedStatus) -> Result<Item, String> {
    let mut item = require_item(state, id).await?;
    item.record_check(status, Utc::now());
    state.item_repo.update(&item).await.map_err(|e| e.to_string())
}
