use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use super::parse_date;
use crate::db::days;
use crate::dto::{DayResponse, UpdateDayRequest};
use crate::error::{AppError, AppResult};
use crate::AppState;

/// Returns the day, creating it and its month if absent.
pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<DayResponse>> {
    let date = parse_date(&date)?;
    let day = match days::fetch_day(&state.db, date).await? {
        Some(day) => day,
        None => days::get_or_create_day(&state.db, date).await?,
    };
    Ok(Json(DayResponse::from(day)))
}

pub async fn update_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(body): Json<UpdateDayRequest>,
) -> AppResult<Json<DayResponse>> {
    body.validate()?;
    let date = parse_date(&date)?;

    // Make sure the row and its month exist before patching.
    days::get_or_create_day(&state.db, date).await?;
    let day = days::update_day(&state.db, date, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Day {date} not found")))?;

    tracing::info!(date = %date, "Day updated");
    Ok(Json(DayResponse::from(day)))
}
