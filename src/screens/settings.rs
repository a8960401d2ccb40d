//! Settings screen: preferences, category and location lists, export,
//! backup and photo cleanup

use std::io::Write;
use std::path::{Path, PathBuf};

use clutterlog_core::commands::{
    add_vocabulary, clean_unused_photos, delete_vocabulary, export_backup, get_settings,
    import_backup, list_vocabulary_with_counts, rename_vocabulary, update_setting, BackupSummary,
};
use clutterlog_core::domain::{Settings, VocabularyKind};
use clutterlog_core::AppState;

use super::fail;
use crate::cli::{SettingsCommand, VocabularyCommand};

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn write_settings<W: Write>(settings: &Settings, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Reminders:   {}", on_off(settings.reminders_enabled))?;
    writeln!(out, "Secure mode: {}", on_off(settings.secure_mode_enabled))
}

pub async fn preferences<W: Write>(state: &AppState, cmd: SettingsCommand, out: &mut W) -> anyhow::Result<()> {
    let settings = match cmd {
        SettingsCommand::Show => get_settings(state).await,
        SettingsCommand::Set { key, value } => update_setting(state, key, value).await,
    }
    .map_err(fail)?;
    write_settings(&settings, out)?;
    Ok(())
}

pub async fn vocabulary<W: Write>(
    state: &AppState,
    kind: VocabularyKind,
    cmd: VocabularyCommand,
    out: &mut W,
) -> anyhow::Result<()> {
    match cmd {
        VocabularyCommand::List => {
            let entries = list_vocabulary_with_counts(state, kind).await.map_err(fail)?;
            if entries.is_empty() {
                writeln!(out, "No {} names yet.", kind.label())?;
            }
            for entry in entries {
                if entry.in_use() {
                    writeln!(out, "{} ({})", entry.name, entry.item_count)?;
                } else {
                    writeln!(out, "{} (unused)", entry.name)?;
                }
            }
        }
        VocabularyCommand::Add { name } => {
            let name = add_vocabulary(state, kind, &name).await.map_err(fail)?;
            writeln!(out, "Added {} '{}'", kind.label(), name)?;
        }
        VocabularyCommand::Rename { old, new } => {
            let rewritten = rename_vocabulary(state, kind, &old, &new).await.map_err(fail)?;
            writeln!(out, "Renamed '{}' to '{}' ({} item(s) updated)", old, new.trim(), rewritten)?;
        }
        VocabularyCommand::Delete { name } => {
            delete_vocabulary(state, kind, &name).await.map_err(fail)?;
            writeln!(out, "Deleted {} '{}'", kind.label(), name)?;
        }
    }
    Ok(())
}

pub async fn export_csv<W: Write>(state: &AppState, output: Option<PathBuf>, out: &mut W) -> anyhow::Result<()> {
    let path = clutterlog_core::commands::export_csv(state, output).await.map_err(fail)?;
    writeln!(out, "Exported to {}", path.display())?;
    Ok(())
}

fn write_summary<W: Write>(verb: &str, summary: &BackupSummary, out: &mut W) -> std::io::Result<()> {
    writeln!(
        out,
        "{} {} item(s), {} categories, {} locations",
        verb, summary.items, summary.categories, summary.locations
    )
}

pub async fn backup<W: Write>(state: &AppState, path: &Path, out: &mut W) -> anyhow::Result<()> {
    let summary = export_backup(state, path).await.map_err(fail)?;
    write_summary("Backed up", &summary, out)?;
    Ok(())
}

pub async fn restore<W: Write>(state: &AppState, path: &Path, out: &mut W) -> anyhow::Result<()> {
    let summary = import_backup(state, path).await.map_err(fail)?;
    write_summary("Restored", &summary, out)?;
    Ok(())
}

pub async fn clean_photos<W: Write>(state: &AppState, out: &mut W) -> anyhow::Result<()> {
    let removed = clean_unused_photos(state).await.map_err(fail)?;
    writeln!(out, "Removed {} unused photo(s)", removed)?;
    Ok(())
}
