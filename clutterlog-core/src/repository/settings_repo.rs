//! Settings Repository
//!
//! Stores the settings record as one JSON value in the key-value store.

use crate::domain::{DomainResult, SettingKey, Settings};
use super::db::SharedConnection;
use super::kv_store::{KvStore, SETTINGS_KEY};

pub struct SettingsRepository {
    kv: KvStore,
}

impl SettingsRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { kv: KvStore::new(conn) }
    }

    /// Stored settings, defaults when nothing (or nothing readable) is stored
    pub async fn load(&self) -> DomainResult<Settings> {
        match self.kv.get_json::<Settings>(SETTINGS_KEY).await {
            Ok(Some(settings)) => Ok(settings),
            Ok(None) => Ok(Settings::default()),
            Err(e) => {
                log::warn!("Falling back to default settings: {}", e);
                Ok(Settings::default())
            }
        }
    }

    pub async fn save(&self, settings: &Settings) -> DomainResult<()> {
        self.kv.set_json(SETTINGS_KEY, settings).await
    }

    /// Change one toggle, leaving the other as stored
    pub async fn update(&self, key: SettingKey, value: bool) -> DomainResult<Settings> {
        self.kv
            .update_json::<Settings, _>(SETTINGS_KEY, |settings| settings.set(key, value))
            .await
    }

    pub async fn reset(&self) -> DomainResult<()> {
        self.kv.remove(SETTINGS_KEY).await
    }
}
