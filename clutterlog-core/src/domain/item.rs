//! Item Entity
//!
//! A logged possession: what it is, where it lives, and whether its owner
//! still uses it.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult, Entity};

/// Whether the owner confirmed using the item during the last review window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UsedStatus {
    Used,
    /// New items start here until the first usage check
    #[default]
    Unused,
}

impl UsedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsedStatus::Used => "used",
            UsedStatus::Unused => "unused",
        }
    }
}

impl std::str::FromStr for UsedStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "used" => Ok(UsedStatus::Used),
            "unused" => Ok(UsedStatus::Unused),
            other => Err(DomainError::InvalidInput(format!("Unknown status '{}'", other))),
        }
    }
}

impl std::fmt::Display for UsedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged household item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Generated at creation, never changes
    pub id: String,
    pub name: String,
    /// Value from the category vocabulary
    pub category: String,
    /// Value from the location vocabulary (missing on the earliest records)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date_added: DateTime<Utc>,
    /// Path of a locally stored photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
    /// Last usage confirmation, None until the first check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<DateTime<Utc>>,
    #[serde(default)]
    pub used_status: UsedStatus,
}

impl Item {
    /// Create a new item with a fresh id, added now, not yet checked
    pub fn new(name: String, category: String) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, category, Utc::now())
    }

    pub fn with_id(id: String, name: String, category: String, date_added: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            category,
            location: None,
            notes: None,
            date_added: truncate_to_millis(date_added),
            photo_uri: None,
            last_checked: None,
            used_status: UsedStatus::Unused,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_used(&self) -> bool {
        self.used_status == UsedStatus::Used
    }

    /// Record the answer to a usage check made at `now`
    pub fn record_check(&mut self, status: UsedStatus, now: DateTime<Utc>) {
        self.used_status = status;
        self.last_checked = Some(truncate_to_millis(now));
    }

    /// Save-time rules: name, category and location are required and the
    /// item cannot be added in the future.
    pub fn validate(&self, now: DateTime<Utc>) -> DomainResult<()> {
        let location_missing = self
            .location
            .as_deref()
            .map(|l| l.trim().is_empty())
            .unwrap_or(true);

        if self.name.trim().is_empty() || self.category.trim().is_empty() || location_missing {
            return Err(DomainError::InvalidInput(
                "Name, category, and location are required.".to_string(),
            ));
        }
        if self.date_added > now {
            return Err(DomainError::InvalidInput(
                "Date added cannot be in the future.".to_string(),
            ));
        }
        Ok(())
    }
}

impl Entity for Item {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Timestamps are stored with millisecond precision
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(3)
}

/// ISO-8601 with millisecond precision and a `Z` suffix
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(s: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::InvalidInput(format!("Invalid timestamp '{}': {}", s, e)))
}
