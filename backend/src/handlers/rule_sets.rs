use axum::{
    extract::{Path, State},
    Json,
};

use crate::db::days;
use crate::dto::{DayResponse, RuleSetDaysResponse, RuleSetDetail, RuleSetSummary};
use crate::error::{AppError, AppResult};
use crate::scoring::rules::{find_entry, CatalogEntry, CATALOG};
use crate::AppState;

pub async fn list_rule_sets() -> Json<Vec<RuleSetSummary>> {
    Json(CATALOG.iter().map(RuleSetSummary::from).collect())
}

pub async fn get_rule_set(Path(key): Path<String>) -> AppResult<Json<RuleSetDetail>> {
    Ok(Json(RuleSetDetail::from(entry(&key)?)))
}

/// All recorded days of one period, newest first.
pub async fn rule_set_days(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<RuleSetDaysResponse>> {
    let entry = entry(&key)?;
    let (Some(from), Some(to)) = (entry.first_day(), entry.last_day()) else {
        return Err(AppError::Internal(anyhow::anyhow!(
            "Rule set {} has an invalid period",
            entry.rules.key
        )));
    };

    let days = days::list_days_between(&state.db, from, to).await?;

    Ok(Json(RuleSetDaysResponse {
        key: entry.rules.key,
        title: entry.rules.title,
        days: days.into_iter().map(DayResponse::from).collect(),
    }))
}

fn entry(key: &str) -> AppResult<&'static CatalogEntry> {
    find_entry(key).ok_or_else(|| AppError::NotFound(format!("Rule set {key} not found")))
}
