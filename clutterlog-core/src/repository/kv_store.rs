//! Key-Value Store
//!
//! Whole JSON values stored under fixed key names.

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{DomainError, DomainResult};
use super::db::SharedConnection;

pub const SETTINGS_KEY: &str = "settings";

pub struct KvStore {
    conn: SharedConnection,
}

impl KvStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Value stored under `key`, None when absent
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> DomainResult<Option<T>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;
        read_json(conn, key)
    }

    /// Insert or replace the value under `key`
    pub async fn set_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;
        write_json(conn, key, value)
    }

    /// Read, modify and write back under one lock. Absent or unreadable
    /// values start from `T::default()`.
    pub async fn update_json<T, F>(&self, key: &str, f: F) -> DomainResult<T>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(&mut T),
    {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut value = match read_json::<T>(conn, key) {
            Ok(Some(v)) => v,
            Ok(None) => T::default(),
            Err(e) => {
                log::warn!("Replacing unreadable value under '{}': {}", key, e);
                T::default()
            }
        };
        f(&mut value);
        write_json(conn, key, &value)?;
        Ok(value)
    }

    pub async fn remove(&self, key: &str) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute("DELETE FROM kv_store WHERE key = ?", params![key])
            .map_err(DomainError::internal)?;
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(conn: &Connection, key: &str) -> DomainResult<Option<T>> {
    let raw: Option<String> = conn
        .query_row("SELECT value FROM kv_store WHERE key = ?", params![key], |row| row.get(0))
        .optional()
        .map_err(DomainError::internal)?;

    match raw {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| DomainError::Internal(format!("Corrupt value under '{}': {}", key, e))),
        None => Ok(None),
    }
}

fn write_json<T: Serialize + ?Sized>(conn: &Connection, key: &str, value: &T) -> DomainResult<()> {
    let json = serde_json::to_string(value).map_err(DomainError::internal)?;

    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, json, chrono::Utc::now().timestamp_millis()],
    )
    .map_err(DomainError::internal)?;
    Ok(())
}
