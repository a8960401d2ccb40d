//! Command line definitions

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use clutterlog_core::domain::{ItemFilter, SettingKey, UsedStatus};

/// Personal inventory log: record what you own and whether you still use it.
#[derive(Debug, Parser)]
#[command(name = "clutterlog", version)]
pub struct Cli {
    /// Directory holding the database, photos, exports and logs
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List items, optionally filtered.
    List(ListArgs),
    /// Show one item in full.
    Show { id: String },
    /// Add a new item.
    Add(AddArgs),
    /// Edit an existing item; omitted fields keep their value.
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete an item.
    Delete { id: String },
    /// Mark an item used or unused.
    Mark { id: String, status: UsedStatus },
    /// Answer usage questions for items not checked in the last 30 days.
    Review,
    /// Usage statistics.
    Insights,
    /// Manage the category list.
    Categories {
        #[command(subcommand)]
        cmd: VocabularyCommand,
    },
    /// Manage the location list.
    Locations {
        #[command(subcommand)]
        cmd: VocabularyCommand,
    },
    /// Show or change preferences.
    Settings {
        #[command(subcommand)]
        cmd: SettingsCommand,
    },
    /// Export all items to CSV.
    ExportCsv {
        /// Output file (defaults to the export directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write a JSON backup of items, lists and settings.
    Backup { path: PathBuf },
    /// Restore a JSON backup.
    Restore { path: PathBuf },
    /// Manage stored photos.
    Photos {
        #[command(subcommand)]
        cmd: PhotoCommand,
    },
}

#[derive(Debug, Default, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub category: Option<String>,
    /// used or unused
    #[arg(long)]
    pub status: Option<UsedStatus>,
    #[arg(long)]
    pub location: Option<String>,
    /// Added on or after (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_start_date)]
    pub from: Option<DateTime<Utc>>,
    /// Added on or before (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_end_date)]
    pub to: Option<DateTime<Utc>>,
    /// Text to look for in name or notes
    #[arg(long)]
    pub search: Option<String>,
    /// Print the category picker values instead of items
    #[arg(long)]
    pub categories: bool,
}

impl ListArgs {
    pub fn to_filter(&self) -> ItemFilter {
        ItemFilter {
            category: self.category.clone(),
            status: self.status,
            location: self.location.clone(),
            date_from: self.from,
            date_to: self.to,
            search_text: self.search.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub name: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub notes: Option<String>,
    /// Date added (YYYY-MM-DD or RFC 3339), defaults to now
    #[arg(long, value_parser = parse_start_date)]
    pub added: Option<DateTime<Utc>>,
    /// Image file to attach
    #[arg(long)]
    pub photo: Option<PathBuf>,
}

#[derive(Debug, Default, Args)]
pub struct EditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long, value_parser = parse_start_date)]
    pub added: Option<DateTime<Utc>>,
    #[arg(long, conflicts_with = "remove_photo")]
    pub photo: Option<PathBuf>,
    /// Detach the current photo
    #[arg(long)]
    pub remove_photo: bool,
}

#[derive(Debug, Subcommand)]
pub enum VocabularyCommand {
    /// List names with how many items use each.
    List,
    Add { name: String },
    /// Rename and update every item using the old name.
    Rename { old: String, new: String },
    /// Delete a name no item uses.
    Delete { name: String },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    /// Set remindersEnabled or secureModeEnabled.
    Set {
        key: SettingKey,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum PhotoCommand {
    /// Copy an image into the photo store and attach it to an item.
    Import { id: String, file: PathBuf },
    /// Delete stored photos no item references.
    Clean,
}

fn parse_date(s: &str) -> Result<(Option<DateTime<Utc>>, NaiveDate), String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        let ts = ts.with_timezone(&Utc);
        return Ok((Some(ts), ts.date_naive()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| (None, date))
        .map_err(|_| format!("'{}' is not a date (expected YYYY-MM-DD or RFC 3339)", s))
}

fn parse_date_at(s: &str, time: NaiveTime) -> Result<DateTime<Utc>, String> {
    let (ts, date) = parse_date(s)?;
    Ok(ts.unwrap_or_else(|| date.and_time(time).and_utc()))
}

/// Plain dates start at midnight UTC
pub fn parse_start_date(s: &str) -> Result<DateTime<Utc>, String> {
    parse_date_at(s, NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default())
}

/// Plain dates run to the last millisecond of the day
pub fn parse_end_date(s: &str) -> Result<DateTime<Utc>, String> {
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| "invalid end of day".to_string())?;
    parse_date_at(s, end_of_day)
}
