//! Terminal screens
//!
//! One module per app screen. Each renders to the writer it is given so the
//! output can be checked in tests.

mod editor;
mod insights;
mod list;
mod settings;
mod usage;

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use clutterlog_core::domain::{UsedStatus, VocabularyKind};
use clutterlog_core::AppState;

use crate::cli::{Command, PhotoCommand};

/// Run one parsed command against the opened state
pub async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::List(args) => list::run(state, &args, &mut out).await,
        Command::Show { id } => list::show(state, &id, &mut out).await,
        Command::Add(args) => editor::add(state, args, &mut out).await,
        Command::Edit { id, fields } => editor::edit(state, &id, fields, &mut out).await,
        Command::Delete { id } => editor::delete(state, &id, &mut out).await,
        Command::Mark { id, status } => editor::mark(state, &id, status, &mut out).await,
        Command::Review => {
            let stdin = io::stdin();
            usage::run(state, &mut stdin.lock(), &mut out).await
        }
        Command::Insights => insights::run(state, &mut out).await,
        Command::Categories { cmd } => {
            settings::vocabulary(state, VocabularyKind::Category, cmd, &mut out).await
        }
        Command::Locations { cmd } => {
            settings::vocabulary(state, VocabularyKind::Location, cmd, &mut out).await
        }
        Command::Settings { cmd } => settings::preferences(state, cmd, &mut out).await,
        Command::ExportCsv { output } => settings::export_csv(state, output, &mut out).await,
        Command::Backup { path } => settings::backup(state, &path, &mut out).await,
        Command::Restore { path } => settings::restore(state, &path, &mut out).await,
        Command::Photos { cmd } => match cmd {
            PhotoCommand::Import { id, file } => editor::attach_photo(state, &id, &file, &mut out).await,
            PhotoCommand::Clean => settings::clean_photos(state, &mut out).await,
        },
    }?;

    out.flush()?;
    Ok(())
}

pub(crate) fn status_badge(status: UsedStatus) -> &'static str {
    match status {
        UsedStatus::Used => "✔ Used",
        UsedStatus::Unused => "⏱ Unused",
    }
}

pub(crate) fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Command errors are display strings already
pub(crate) fn fail(message: String) -> anyhow::Error {
    anyhow::Error::msg(message)
}
