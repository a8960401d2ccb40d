//! Category and Location Commands
//!
//! Same operations for both vocabularies. The guards live here rather than in
//! the repository: blank names, duplicate names and deleting a name that items
//! still use are all rejected.

use crate::domain::{DomainError, VocabularyEntry, VocabularyKind};
use crate::repository::VocabularyOperations;
use crate::AppState;

fn clean_name(kind: VocabularyKind, name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput(format!("A {} name is required.", kind.label())).to_string());
    }
    Ok(trimmed.to_string())
}

pub async fn list_vocabulary(state: &AppState, kind: VocabularyKind) -> Result<Vec<String>, String> {
    state.vocabulary(kind).list().await.map_err(|e| e.to_string())
}

/// Names with the number of items using each
pub async fn list_vocabulary_with_counts(
    state: &AppState,
    kind: VocabularyKind,
) -> Result<Vec<VocabularyEntry>, String> {
    let names = list_vocabulary(state, kind).await?;
    let counts = state
        .item_repo
        .count_by_field(kind)
        .await
        .map_err(|e| e.to_string())?;

    Ok(names
        .into_iter()
        .map(|name| VocabularyEntry {
            item_count: counts.get(&name).copied().unwrap_or(0),
            name,
        })
        .collect())
}

/// Add a name; returns the stored (trimmed) value
pub async fn add_vocabulary(state: &AppState, kind: VocabularyKind, name: &str) -> Result<String, String> {
    let name = clean_name(kind, name)?;
    let repo = state.vocabulary(kind);

    if !repo.add(&name).await.map_err(|e| e.to_string())? {
        return Err(DomainError::Conflict(kind.duplicate_message().to_string()).to_string());
    }
    log::info!("Added {} '{}'", kind.label(), name);
    Ok(name)
}

/// Add a name picked in the item editor unless it is already known.
///
/// Returns true when the name was new.
pub async fn ensure_vocabulary(state: &AppState, kind: VocabularyKind, name: &str) -> Result<bool, String> {
    let name = clean_name(kind, name)?;
    state.vocabulary(kind).add(&name).await.map_err(|e| e.to_string())
}

/// Rename and rewrite the items using the old name; returns how many items
/// were rewritten
pub async fn rename_vocabulary(
    state: &AppState,
    kind: VocabularyKind,
    old_name: &str,
    new_name: &str,
) -> Result<usize, String> {
    let new_name = clean_name(kind, new_name)?;
    let repo = state.vocabulary(kind);

    if !repo.contains(old_name).await.map_err(|e| e.to_string())? {
        return Err(DomainError::NotFound(format!("{} '{}'", kind.label(), old_name)).to_string());
    }
    if old_name == new_name {
        return Ok(0);
    }
    if repo.contains(&new_name).await.map_err(|e| e.to_string())? {
        return Err(DomainError::Conflict(kind.duplicate_message().to_string()).to_string());
    }

    repo.rename(old_name, &new_name).await.map_err(|e| e.to_string())
}

/// Delete a name no item uses
pub async fn delete_vocabulary(state: &AppState, kind: VocabularyKind, name: &str) -> Result<(), String> {
    let repo = state.vocabulary(kind);
    if !repo.contains(name).await.map_err(|e| e.to_string())? {
        return Err(DomainError::NotFound(format!("{} '{}'", kind.label(), name)).to_string());
    }

    let counts = state
        .item_repo
        .count_by_field(kind)
        .await
        .map_err(|e| e.to_string())?;

    if let Some(&in_use) = counts.get(name).filter(|&&n| n > 0) {
        return Err(DomainError::Conflict(format!(
            "'{}' is used by {} item(s) and cannot be deleted.",
            name, in_use
        ))
        .to_string());
    }

    repo.delete(name).await.map_err(|e| e.to_string())?;
    log::info!("Deleted {} '{}'", kind.label(), name);
    Ok(())
}
