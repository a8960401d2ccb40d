//! Export Commands
//!
//! CSV export of the item list, and a JSON backup of everything the app
//! stores that can be restored later.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::domain::export::{CSV_FILE_NAME, BACKUP_VERSION};
use crate::domain::{items_to_csv, Backup, DomainError};
use crate::repository::{Repository, VocabularyOperations};
use crate::AppState;

/// Write the CSV export and return where it went.
///
/// `path` defaults to `<export_dir>/clutterlog_export.csv`.
pub async fn export_csv(state: &AppState, path: Option<PathBuf>) -> Result<PathBuf, String> {
    let items = state.item_repo.list().await.map_err(|e| e.to_string())?;
    if items.is_empty() {
        return Err(DomainError::InvalidInput("No items to export".to_string()).to_string());
    }

    let path = path.unwrap_or_else(|| state.config.export_dir.join(CSV_FILE_NAME));
    write_file(&path, items_to_csv(&items).as_bytes())?;

    log::info!("Exported {} items to {}", items.len(), path.display());
    Ok(path)
}

/// Counts reported after a backup or restore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackupSummary {
    pub items: usize,
    pub categories: usize,
    pub locations: usize,
}

impl BackupSummary {
    fn of(backup: &Backup) -> Self {
        Self {
            items: backup.items.len(),
            categories: backup.categories.len(),
            locations: backup.locations.len(),
        }
    }
}

/// Snapshot of items, vocabularies and settings
pub async fn collect_backup(state: &AppState) -> Result<Backup, String> {
    Ok(Backup {
        version: BACKUP_VERSION,
        exported_at: Some(Utc::now()),
        items: state.item_repo.list().await.map_err(|e| e.to_string())?,
        categories: state.category_repo.list().await.map_err(|e| e.to_string())?,
        locations: state.location_repo.list().await.map_err(|e| e.to_string())?,
        settings: state.settings_repo.load().await.map_err(|e| e.to_string())?,
    })
}

pub async fn export_backup(state: &AppState, path: &Path) -> Result<BackupSummary, String> {
    let backup = collect_backup(state).await?;
    let json = serde_json::to_string_pretty(&backup)
        .map_err(|e| format!("Failed to serialize backup: {}", e))?;
    write_file(path, json.as_bytes())?;

    let summary = BackupSummary::of(&backup);
    log::info!(
        "Backup saved to {}: {} items, {} categories, {} locations",
        path.display(),
        summary.items,
        summary.categories,
        summary.locations
    );
    Ok(summary)
}

/// Merge a backup into the current data.
///
/// Items are upserted by id, vocabulary names are added with set semantics
/// and the settings record is replaced, so restoring twice changes nothing.
pub async fn restore_backup(state: &AppState, backup: &Backup) -> Result<BackupSummary, String> {
    if backup.version > BACKUP_VERSION {
        return Err(DomainError::InvalidInput(format!(
            "Backup version {} is newer than supported version {}",
            backup.version, BACKUP_VERSION
        ))
        .to_string());
    }

    for name in &backup.categories {
        state.category_repo.add(name).await.map_err(|e| e.to_string())?;
    }
    for name in &backup.locations {
        state.location_repo.add(name).await.map_err(|e| e.to_string())?;
    }
    for item in &backup.items {
        state.item_repo.upsert(item).await.map_err(|e| e.to_string())?;
    }
    state
        .settings_repo
        .save(&backup.settings)
        .await
        .map_err(|e| e.to_string())?;

    Ok(BackupSummary::of(backup))
}

pub async fn import_backup(state: &AppState, path: &Path) -> Result<BackupSummary, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read backup {}: {}", path.display(), e))?;
    let backup: Backup = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse backup {}: {}", path.display(), e))?;

    let summary = restore_backup(state, &backup).await?;
    log::info!("Restored backup from {}", path.display());
    Ok(summary)
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    fs::write(path, content).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}
