//! Vocabulary Repository
//!
//! Categories and locations share one implementation; `VocabularyKind`
//! selects the table and the item column a rename cascades into.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainError, DomainResult, VocabularyKind};
use super::db::SharedConnection;
use super::traits::VocabularyOperations;

pub struct VocabularyRepository {
    conn: SharedConnection,
    kind: VocabularyKind,
}

impl VocabularyRepository {
    pub fn new(conn: SharedConnection, kind: VocabularyKind) -> Self {
        Self { conn, kind }
    }

    pub fn categories(conn: SharedConnection) -> Self {
        Self::new(conn, VocabularyKind::Category)
    }

    pub fn locations(conn: SharedConnection) -> Self {
        Self::new(conn, VocabularyKind::Location)
    }
}

#[async_trait]
impl VocabularyOperations for VocabularyRepository {
    fn kind(&self) -> VocabularyKind {
        self.kind
    }

    async fn list(&self) -> DomainResult<Vec<String>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!("SELECT name FROM {} ORDER BY position", self.kind.table()))
            .map_err(DomainError::internal)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(DomainError::internal)?;

        let mut names = Vec::new();
        for row in rows {
            names.push(row.map_err(DomainError::internal)?);
        }
        Ok(names)
    }

    async fn contains(&self, name: &str) -> DomainResult<bool> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let found = conn
            .query_row(
                &format!("SELECT 1 FROM {} WHERE name = ?", self.kind.table()),
                params![name],
                |_| Ok(()),
            )
            .optional()
            .map_err(DomainError::internal)?;
        Ok(found.is_some())
    }

    async fn add(&self, name: &str) -> DomainResult<bool> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let inserted = conn
            .execute(
                &format!("INSERT OR IGNORE INTO {} (name) VALUES (?)", self.kind.table()),
                params![name],
            )
            .map_err(DomainError::internal)?;
        Ok(inserted > 0)
    }

    async fn rename(&self, old_name: &str, new_name: &str) -> DomainResult<usize> {
        if old_name == new_name {
            return Ok(0);
        }

        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let tx = conn.transaction().map_err(DomainError::internal)?;

        tx.execute(
            &format!("UPDATE {} SET name = ? WHERE name = ?", self.kind.table()),
            params![new_name, old_name],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DomainError::Conflict(self.kind.duplicate_message().to_string())
            }
            other => DomainError::Internal(other.to_string()),
        })?;

        let rewritten = tx
            .execute(
                &format!(
                    "UPDATE items SET {col} = ? WHERE {col} = ?",
                    col = self.kind.item_column()
                ),
                params![new_name, old_name],
            )
            .map_err(DomainError::internal)?;

        tx.commit().map_err(DomainError::internal)?;

        log::info!(
            "Renamed {} '{}' to '{}' ({} items rewritten)",
            self.kind.label(),
            old_name,
            new_name,
            rewritten
        );
        Ok(rewritten)
    }

    async fn delete(&self, name: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute(
            &format!("DELETE FROM {} WHERE name = ?", self.kind.table()),
            params![name],
        )
        .map_err(DomainError::internal)?;
        Ok(())
    }
}
