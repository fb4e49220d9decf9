use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::db::foods;
use crate::dto::{CreateFoodRequest, DeleteResponse, UpdateFoodRequest};
use crate::error::{AppError, AppResult};
use crate::models::food::Food;
use crate::AppState;

pub async fn list_foods(State(state): State<AppState>) -> AppResult<Json<Vec<Food>>> {
    Ok(Json(foods::list_foods(&state.db).await?))
}

pub async fn create_food(
    State(state): State<AppState>,
    Json(body): Json<CreateFoodRequest>,
) -> AppResult<(StatusCode, Json<Food>)> {
    body.validate()?;

    let food = foods::create_food(&state.db, &body).await?;

    tracing::info!(food_id = %food.id, name = %food.name, "Food created");
    Ok((StatusCode::CREATED, Json(food)))
}

pub async fn update_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateFoodRequest>,
) -> AppResult<Json<Food>> {
    body.validate()?;

    let food = foods::update_food(&state.db, id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Food {id} not found")))?;

    Ok(Json(food))
}

pub async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    if !foods::delete_food(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Food {id} not found")));
    }

    tracing::info!(food_id = %id, "Food deleted");
    Ok(Json(DeleteResponse { deleted: true, id }))
}
