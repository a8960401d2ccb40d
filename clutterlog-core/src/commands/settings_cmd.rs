//! Settings Commands

use crate::domain::{SettingKey, Settings};
use crate::AppState;

pub async fn get_settings(state: &AppState) -> Result<Settings, String> {
    state.settings_repo.load().await.map_err(|e| e.to_string())
}

pub async fn update_setting(state: &AppState, key: SettingKey, value: bool) -> Result<Settings, String> {
    let settings = state
        .settings_repo
        .update(key, value)
        .await
        .map_err(|e| e.to_string())?;
    log::info!("Setting {} = {}", key.as_str(), value);
    Ok(settings)
}
