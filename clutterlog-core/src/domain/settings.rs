//! Settings Record
//!
//! Fixed-shape set of user toggles. Missing fields take their defaults so
//! older stored records keep loading.

use serde::{Deserialize, Serialize};

use super::entity::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub reminders_enabled: bool,
    pub secure_mode_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reminders_enabled: true,
            secure_mode_enabled: false,
        }
    }
}

/// Individual toggle inside [`Settings`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    RemindersEnabled,
    SecureModeEnabled,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::RemindersEnabled => "remindersEnabled",
            SettingKey::SecureModeEnabled => "secureModeEnabled",
        }
    }
}

impl std::str::FromStr for SettingKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remindersEnabled" | "reminders" => Ok(SettingKey::RemindersEnabled),
            "secureModeEnabled" | "secure-mode" => Ok(SettingKey::SecureModeEnabled),
            other => Err(DomainError::InvalidInput(format!("Unknown setting '{}'", other))),
        }
    }
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::RemindersEnabled => self.reminders_enabled,
            SettingKey::SecureModeEnabled => self.secure_mode_enabled,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::RemindersEnabled => self.reminders_enabled = value,
            SettingKey::SecureModeEnabled => self.secure_mode_enabled = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.reminders_enabled);
        assert!(!s.secure_mode_enabled);
    }

    #[test]
    fn test_partial_record_takes_defaults() {
        let s: Settings = serde_json::from_str(r#"{"secureModeEnabled": true}"#).unwrap();
        assert!(s.reminders_enabled);
        assert!(s.secure_mode_enabled);
    }

    #[test]
    fn test_set_single_key() {
        let mut s = Settings::default();
        s.set(SettingKey::RemindersEnabled, false);
        assert!(!s.get(SettingKey::RemindersEnabled));
        assert!(!s.get(SettingKey::SecureModeEnabled));
        assert_eq!("reminders".parse::<SettingKey>().unwrap(), SettingKey::RemindersEnabled);
    }
}
