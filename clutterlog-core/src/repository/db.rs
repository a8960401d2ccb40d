//! Database Connection and Setup
//!
//! Manages SQLite database connection and migrations.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared connection handle used by every repository
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
    pub path: PathBuf,
}

impl DbState {
    pub fn new(path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            path,
        }
    }

    pub async fn is_ready(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Drop the connection; repositories report "not initialized" afterwards
    pub async fn close(&self) {
        let mut guard = self.conn.lock().await;
        if let Some(conn) = guard.take() {
            if let Err((_, e)) = conn.close() {
                log::warn!("Failed to close database cleanly: {}", e);
            }
        }
    }
}

/// Initialize database with path (`:memory:` for a throwaway database)
pub async fn init_db(db_path: &Path) -> Result<DbState, String> {
    let conn = Connection::open(db_path)
        .map_err(|e| format!("Failed to open db {}: {}", db_path.display(), e))?;

    // journal_mode returns a row, so it cannot go through execute
    let _mode: String = conn
        .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
        .map_err(|e| format!("Failed to set journal mode: {}", e))?;

    run_migrations(&conn)?;

    let state = DbState::new(db_path.to_path_buf());
    *state.conn.lock().await = Some(conn);

    log::info!("Database ready at {}", db_path.display());
    Ok(state)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(names) = stmt.query_map([], |row| row.get::<_, String>(1)) else {
        return false;
    };
    let found = names.filter_map(Result::ok).any(|name| name == column);
    found
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    // Items table - `seq` keeps insertion order, `id` is the public key
    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            notes TEXT,
            date_added TEXT NOT NULL,
            photo_uri TEXT,
            last_checked TEXT,
            used_status TEXT NOT NULL DEFAULT 'unused'
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    // Location arrived after the first release
    if !column_exists(conn, "items", "location") {
        conn.execute("ALTER TABLE items ADD COLUMN location TEXT", [])
            .map_err(|e| format!("Failed to add location: {}", e))?;
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_items_category ON items(category)",
        [],
    )
    .map_err(|e| e.to_string())?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_items_location ON items(location)",
        [],
    )
    .map_err(|e| e.to_string())?;

    // Vocabularies - `position` keeps insertion order, renames keep it
    for table in ["categories", "locations"] {
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    position INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL UNIQUE
                )",
                table
            ),
            [],
        )
        .map_err(|e| e.to_string())?;
    }

    // Whole JSON values by fixed key (settings)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
