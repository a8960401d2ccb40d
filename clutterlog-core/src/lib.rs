//! ClutterLog Backend
//!
//! Layered architecture:
//! - domain: Core entities and the logic computed over them
//! - repository: Data access abstractions and SQLite implementations
//! - commands: Operations the front end calls, with form-level validation

pub mod config;
pub mod domain;
pub mod repository;
pub mod commands;

use config::AppConfig;
use domain::VocabularyKind;
use repository::{
    init_db, DbState, ItemRepository, SettingsRepository, VocabularyRepository,
};

/// Application state shared across commands
pub struct AppState {
    pub config: AppConfig,
    pub db_state: DbState,
    pub item_repo: ItemRepository,
    pub category_repo: VocabularyRepository,
    pub location_repo: VocabularyRepository,
    pub settings_repo: SettingsRepository,
}

impl AppState {
    /// Create the directories, open (and migrate) the database
    pub async fn open(config: AppConfig) -> Result<Self, String> {
        config.ensure_dirs()?;
        let db_state = init_db(&config.db_path).await?;
        Ok(Self::with_db(config, db_state))
    }

    pub fn with_db(config: AppConfig, db_state: DbState) -> Self {
        let conn = db_state.conn.clone();
        Self {
            config,
            item_repo: ItemRepository::new(conn.clone()),
            category_repo: VocabularyRepository::categories(conn.clone()),
            location_repo: VocabularyRepository::locations(conn.clone()),
            settings_repo: SettingsRepository::new(conn),
            db_state,
        }
    }

    pub fn vocabulary(&self, kind: VocabularyKind) -> &VocabularyRepository {
        match kind {
            VocabularyKind::Category => &self.category_repo,
            VocabularyKind::Location => &self.location_repo,
        }
    }
}
