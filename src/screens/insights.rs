//! Insights screen

use std::io::Write;

use clutterlog_core::commands::get_insights;
use clutterlog_core::domain::Insights;
use clutterlog_core::AppState;

use super::{fail, format_date};

pub async fn run<W: Write>(state: &AppState, out: &mut W) -> anyhow::Result<()> {
    let insights = get_insights(state).await.map_err(fail)?;
    render(&insights, out)?;
    Ok(())
}

fn render<W: Write>(insights: &Insights, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Usage Summary ({} items)", insights.total())?;
    writeln!(out, "Used: {}%", insights.used_pct)?;
    writeln!(out, "Unused: {}%", insights.unused_pct)?;

    writeln!(out)?;
    writeln!(out, "Top Unused Categories:")?;
    if insights.top_unused_categories.is_empty() {
        writeln!(out, "  No unused items yet.")?;
    }
    for entry in &insights.top_unused_categories {
        writeln!(out, "  • {} ({})", entry.category, entry.count)?;
    }

    writeln!(out)?;
    writeln!(out, "Oldest Unused Item:")?;
    match &insights.oldest_unused {
        Some(item) => {
            writeln!(out, "  {}", item.name)?;
            writeln!(out, "  Added: {}", format_date(&item.date_added))?;
        }
        None => writeln!(out, "  No data")?,
    }
    Ok(())
}
