use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use super::parse_month;
use crate::db::{days, months};
use crate::dto::{DayResponse, ListMonthsQuery, MonthDetailResponse, MonthSummary, UpdateMonthRequest};
use crate::error::{AppError, AppResult};
use crate::AppState;

/// A page of months, newest first, with completion and lapse counter.
pub async fn list_months(
    State(state): State<AppState>,
    Query(query): Query<ListMonthsQuery>,
) -> AppResult<Json<Vec<MonthSummary>>> {
    query.validate()?;
    let before = query.before.as_deref().map(parse_month).transpose()?;

    let records = months::list_months(&state.db, query.limit(), before).await?;
    let keys: Vec<String> = records.iter().map(|month| month.month_key.clone()).collect();
    let mut grouped = days::days_by_month(&state.db, &keys).await?;

    let summaries = records
        .into_iter()
        .map(|month| {
            let days = grouped.remove(&month.month_key).unwrap_or_default();
            MonthSummary::new(month, &days)
        })
        .collect();

    Ok(Json(summaries))
}

pub async fn get_month(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> AppResult<Json<MonthDetailResponse>> {
    let key = parse_month(&month)?;
    let record = months::fetch_month(&state.db, key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Month {key} not found")))?;

    let days = days::fetch_month_days(&state.db, key).await?;
    let summary = MonthSummary::new(record, &days);

    Ok(Json(MonthDetailResponse {
        summary,
        day_list: days.into_iter().map(DayResponse::from).collect(),
    }))
}

pub async fn update_month(
    State(state): State<AppState>,
    Path(month): Path<String>,
    Json(body): Json<UpdateMonthRequest>,
) -> AppResult<Json<MonthSummary>> {
    body.validate()?;
    let key = parse_month(&month)?;

    let record = months::upsert_comments(&state.db, key, body.comments.as_deref()).await?;
    let days = days::fetch_month_days(&state.db, key).await?;

    tracing::info!(month = %key, "Month comments updated");
    Ok(Json(MonthSummary::new(record, &days)))
}
