//! Item list and item detail

use std::io::Write;

use clutterlog_core::commands::{get_item, get_settings, list_item_categories, list_items, review_queue};
use clutterlog_core::domain::{format_timestamp, Item, UsedStatus};
use clutterlog_core::AppState;

use super::{fail, format_date, status_badge};
use crate::cli::ListArgs;

const HIDDEN: &str = "(hidden in secure mode)";

pub async fn run<W: Write>(state: &AppState, args: &ListArgs, out: &mut W) -> anyhow::Result<()> {
    if args.categories {
        for category in list_item_categories(state).await.map_err(fail)? {
            writeln!(out, "{}", category)?;
        }
        return Ok(());
    }

    let filter = args.to_filter();
    let items = list_items(state, &filter).await.map_err(fail)?;

    if items.is_empty() {
        if filter.is_empty() {
            writeln!(out, "No items yet. Add one with `clutterlog add`.")?;
        } else {
            writeln!(out, "No items match the filter.")?;
        }
    }
    for item in &items {
        writeln!(out, "{}", item_row(item))?;
    }

    remind(state, out).await
}

fn item_row(item: &Item) -> String {
    format!(
        "{}  {}  [{}]  @{}  {}",
        item.id,
        item.name,
        item.category,
        item.location.as_deref().unwrap_or("-"),
        status_badge(item.used_status)
    )
}

/// Nudge towards the review screen when reminders are on
async fn remind<W: Write>(state: &AppState, out: &mut W) -> anyhow::Result<()> {
    if !get_settings(state).await.map_err(fail)?.reminders_enabled {
        return Ok(());
    }
    let due = review_queue(state).await.map_err(fail)?.len();
    if due > 0 {
        writeln!(out)?;
        writeln!(out, "{} item(s) need a usage check. Run `clutterlog review`.", due)?;
    }
    Ok(())
}

pub async fn show<W: Write>(state: &AppState, id: &str, out: &mut W) -> anyhow::Result<()> {
    let item = get_item(state, id)
        .await
        .map_err(fail)?
        .ok_or_else(|| anyhow::anyhow!("Item {} not found", id))?;
    let secure = get_settings(state).await.map_err(fail)?.secure_mode_enabled;

    writeln!(out, "{}", item.name)?;
    writeln!(out, "  Category: {}", item.category)?;
    writeln!(out, "  Location: {}", item.location.as_deref().unwrap_or("-"))?;
    if let Some(notes) = &item.notes {
        writeln!(out, "  Notes:    {}", if secure { HIDDEN } else { notes.as_str() })?;
    }
    writeln!(out, "  Added:    {}", format_date(&item.date_added))?;

    let status = match item.used_status {
        UsedStatus::Used => "✔ Used in last 30 days",
        UsedStatus::Unused => status_badge(UsedStatus::Unused),
    };
    writeln!(out, "  Status:   {}", status)?;
    if let Some(checked) = &item.last_checked {
        writeln!(out, "  Checked:  {}", format_timestamp(checked))?;
    }
    if let Some(photo) = &item.photo_uri {
        writeln!(out, "  Photo:    {}", if secure { HIDDEN } else { photo.as_str() })?;
    }
    writeln!(out, "  Id:       {}", item.id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clutterlog_core::domain::parse_timestamp;

    #[test]
    fn test_item_row() {
        let item = Item::with_id(
            "a1".to_string(),
            "Drill".to_string(),
            "Tools".to_string(),
            parse_timestamp("2024-01-01T00:00:00.000Z").unwrap(),
        )
        .with_location("Garage");
        assert_eq!(item_row(&item), "a1  Drill  [Tools]  @Garage  ⏱ Unused");
    }
}
