//! Item Repository Implementation
//!
//! SQLite-backed implementation of Repository<Item>. Rows are keyed by the
//! item id; `seq` keeps the order items were created in.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use std::collections::HashMap;

use crate::domain::{
    format_timestamp, parse_timestamp, DomainError, DomainResult, Item, UsedStatus, VocabularyKind,
};
use super::db::SharedConnection;
use super::traits::Repository;

const ITEM_COLUMNS: &str =
    "id, name, category, location, notes, date_added, photo_uri, last_checked, used_status";

/// SQLite implementation of Item repository
pub struct ItemRepository {
    conn: SharedConnection,
}

impl ItemRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Insert, or overwrite the item with the same id in place
    pub async fn upsert(&self, entity: &Item) -> DomainResult<Item> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute(
            "INSERT INTO items (id, name, category, location, notes, date_added, photo_uri, last_checked, used_status)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                category = excluded.category,
                location = excluded.location,
                notes = excluded.notes,
                date_added = excluded.date_added,
                photo_uri = excluded.photo_uri,
                last_checked = excluded.last_checked,
                used_status = excluded.used_status",
            params![
                entity.id,
                entity.name,
                entity.category,
                entity.location,
                entity.notes,
                format_timestamp(&entity.date_added),
                entity.photo_uri,
                entity.last_checked.as_ref().map(format_timestamp),
                entity.used_status.as_str(),
            ],
        )
        .map_err(DomainError::internal)?;

        Ok(entity.clone())
    }

    /// Number of items per distinct value of the category or location column
    pub async fn count_by_field(&self, kind: VocabularyKind) -> DomainResult<HashMap<String, usize>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let column = kind.item_column();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {col}, COUNT(*) FROM items WHERE {col} IS NOT NULL GROUP BY {col}",
                col = column
            ))
            .map_err(DomainError::internal)?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))
            .map_err(DomainError::internal)?;

        let mut counts = HashMap::new();
        for row in rows {
            let (value, count) = row.map_err(DomainError::internal)?;
            counts.insert(value, count as usize);
        }
        Ok(counts)
    }

    /// Photo paths referenced by any item
    pub async fn photo_uris(&self) -> DomainResult<Vec<String>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare("SELECT photo_uri FROM items WHERE photo_uri IS NOT NULL ORDER BY seq")
            .map_err(DomainError::internal)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(DomainError::internal)?;

        let mut uris = Vec::new();
        for row in rows {
            uris.push(row.map_err(DomainError::internal)?);
        }
        Ok(uris)
    }
}

#[async_trait]
impl Repository<Item> for ItemRepository {
    async fn create(&self, entity: &Item) -> DomainResult<Item> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let exists = conn
            .query_row("SELECT 1 FROM items WHERE id = ?", params![entity.id], |_| Ok(()))
            .optional()
            .map_err(DomainError::internal)?
            .is_some();
        if exists {
            return Err(DomainError::Conflict(format!("Item {} already exists", entity.id)));
        }

        conn.execute(
            "INSERT INTO items (id, name, category, location, notes, date_added, photo_uri, last_checked, used_status)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.id,
                entity.name,
                entity.category,
                entity.location,
                entity.notes,
                format_timestamp(&entity.date_added),
                entity.photo_uri,
                entity.last_checked.as_ref().map(format_timestamp),
                entity.used_status.as_str(),
            ],
        )
        .map_err(DomainError::internal)?;

        log::debug!("Created item {}", entity.id);
        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<Item>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS))
            .map_err(DomainError::internal)?;
        let mut rows = stmt
            .query(params![id])
            .map_err(DomainError::internal)?;

        match rows.next().map_err(DomainError::internal)? {
            Some(row) => Ok(Some(row_to_item(row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> DomainResult<Vec<Item>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM items ORDER BY seq ASC", ITEM_COLUMNS))
            .map_err(DomainError::internal)?;
        let mut rows = stmt
            .query([])
            .map_err(DomainError::internal)?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().map_err(DomainError::internal)? {
            items.push(row_to_item(row)?);
        }
        Ok(items)
    }

    async fn update(&self, entity: &Item) -> DomainResult<Item> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let changed = conn
            .execute(
                "UPDATE items SET name = ?, category = ?, location = ?, notes = ?, date_added = ?, photo_uri = ?, last_checked = ?, used_status = ? WHERE id = ?",
                params![
                    entity.name,
                    entity.category,
                    entity.location,
                    entity.notes,
                    format_timestamp(&entity.date_added),
                    entity.photo_uri,
                    entity.last_checked.as_ref().map(format_timestamp),
                    entity.used_status.as_str(),
                    entity.id,
                ],
            )
            .map_err(DomainError::internal)?;

        if changed == 0 {
            log::debug!("Update skipped, item {} not found", entity.id);
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute("DELETE FROM items WHERE id = ?", params![id])
            .map_err(DomainError::internal)?;

        Ok(())
    }
}

/// Convert a database row to Item
fn row_to_item(row: &Row) -> DomainResult<Item> {
    let date_added: String = row.get(5).map_err(DomainError::internal)?;
    let last_checked: Option<String> = row.get(7).unwrap_or(None);
    let used_status: String = row.get(8).unwrap_or_else(|_| "unused".to_string());

    Ok(Item {
        id: row.get(0).map_err(DomainError::internal)?,
        name: row.get(1).map_err(DomainError::internal)?,
        category: row.get(2).map_err(DomainError::internal)?,
        location: row.get::<_, Option<String>>(3).unwrap_or(None),
        notes: row.get::<_, Option<String>>(4).unwrap_or(None),
        date_added: parse_timestamp(&date_added)?,
        photo_uri: row.get::<_, Option<String>>(6).unwrap_or(None),
        last_checked: last_checked.as_deref().map(parse_timestamp).transpose()?,
        used_status: used_status.parse::<UsedStatus>().unwrap_or_default(),
    })
}
