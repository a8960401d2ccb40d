//! Application Paths
//!
//! Where the database, logs, photos and exports live.

use std::path::{Path, PathBuf};

/// Overrides the platform data directory
pub const DATA_DIR_ENV: &str = "CLUTTERLOG_DATA_DIR";
pub const APP_DIR_NAME: &str = "clutterlog";
pub const DB_FILE_NAME: &str = "clutterlog.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub photos_dir: PathBuf,
    pub export_dir: PathBuf,
}

impl AppConfig {
    /// Lay out every path under one data directory. Relative directories
    /// are resolved against the current directory.
    pub fn from_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let data_dir = std::path::absolute(&data_dir).unwrap_or(data_dir);
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_dir: data_dir.join("logs"),
            photos_dir: data_dir.join("photos"),
            export_dir: data_dir.join("exports"),
            data_dir,
        }
    }

    /// Explicit directory first, then `CLUTTERLOG_DATA_DIR`, then the
    /// platform data directory.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, String> {
        if let Some(dir) = explicit {
            return Ok(Self::from_data_dir(dir));
        }
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::from_data_dir(PathBuf::from(dir)));
        }
        let base = dirs::data_dir().ok_or("Could not determine a data directory")?;
        Ok(Self::from_data_dir(base.join(APP_DIR_NAME)))
    }

    /// Create every directory the app writes to
    pub fn ensure_dirs(&self) -> Result<(), String> {
        for dir in [&self.data_dir, &self.log_dir, &self.photos_dir, &self.export_dir] {
            create_dir(dir)?;
        }
        Ok(())
    }
}

fn create_dir(dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_data_dir() {
        let config = AppConfig::from_data_dir("/tmp/clutter");
        assert_eq!(config.db_path, PathBuf::from("/tmp/clutter/clutterlog.db"));
        assert_eq!(config.photos_dir, PathBuf::from("/tmp/clutter/photos"));
    }

    #[test]
    fn test_relative_dir_becomes_absolute() {
        let config = AppConfig::from_data_dir("clutter-data");
        let cwd = std::env::current_dir().unwrap();
        assert!(config.data_dir.is_absolute());
        assert_eq!(config.data_dir, cwd.join("clutter-data"));
        assert_eq!(config.photos_dir, cwd.join("clutter-data").join("photos"));
    }

    #[test]
    fn test_explicit_dir_wins() {
        let config = AppConfig::resolve(Some(PathBuf::from("/data/x"))).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/data/x"));
    }

    #[test]
    fn test_ensure_dirs_creates_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig::from_data_dir(tmp.path().join("nested"));
        config.ensure_dirs().unwrap();
        assert!(config.log_dir.is_dir());
        assert!(config.export_dir.is_dir());
    }
}
