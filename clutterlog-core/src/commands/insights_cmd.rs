//! Insights Commands

use crate::domain::Insights;
use crate::repository::Repository;
use crate::AppState;

pub async fn get_insights(state: &AppState) -> Result<Insights, String> {
    let items = state.item_repo.list().await.map_err(|e| e.to_string())?;
    Ok(Insights::compute(&items))
}
