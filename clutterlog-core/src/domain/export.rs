//! CSV Export and JSON Backup shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::{format_timestamp, Item};
use super::settings::Settings;

pub const CSV_HEADER: &str = "Name,Category,Notes,DateAdded,UsedStatus";
pub const CSV_FILE_NAME: &str = "clutterlog_export.csv";

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Header line followed by one fully quoted row per item
pub fn items_to_csv(items: &[Item]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for item in items {
        let row = [
            quote(&item.name),
            quote(&item.category),
            quote(item.notes.as_deref().unwrap_or("")),
            quote(&format_timestamp(&item.date_added)),
            quote(item.used_status.as_str()),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

pub const BACKUP_VERSION: u32 = 1;

/// Everything the app stores, as one JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default = "default_backup_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub settings: Settings,
}

fn default_backup_version() -> u32 {
    BACKUP_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{parse_timestamp, UsedStatus};

    #[test]
    fn test_csv_rows() {
        let mut lamp = Item::with_id(
            "1".to_string(),
            "Lamp".to_string(),
            "Decor".to_string(),
            parse_timestamp("2024-03-01T10:00:00Z").unwrap(),
        )
        .with_notes("Says \"hi\"");
        lamp.used_status = UsedStatus::Used;
        let kettle = Item::with_id(
            "2".to_string(),
            "Kettle, old".to_string(),
            "Kitchen".to_string(),
            parse_timestamp("2024-04-01T08:30:00Z").unwrap(),
        );

        let csv = items_to_csv(&[lamp, kettle]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], r#""Lamp","Decor","Says ""hi""","2024-03-01T10:00:00.000Z","used""#);
        assert_eq!(lines[2], r#""Kettle, old","Kitchen","","2024-04-01T08:30:00.000Z","unused""#);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_backup_tolerates_missing_sections() {
        let backup: Backup = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(backup.version, BACKUP_VERSION);
        assert!(backup.categories.is_empty());
        assert_eq!(backup.settings, Settings::default());
    }
}
