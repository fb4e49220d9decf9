use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::{CreateFoodRequest, UpdateFoodRequest};
use crate::models::food::Food;

pub async fn list_foods(db: &PgPool) -> Result<Vec<Food>, sqlx::Error> {
    sqlx::query_as::<_, Food>("SELECT * FROM foods ORDER BY name ASC")
        .fetch_all(db)
        .await
}

pub async fn create_food(db: &PgPool, body: &CreateFoodRequest) -> Result<Food, sqlx::Error> {
    sqlx::query_as::<_, Food>(
        r#"
        INSERT INTO foods (id, name, fat, protein, carbs, fiber)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(body.name.trim())
    .bind(body.fat.unwrap_or(0.0))
    .bind(body.protein.unwrap_or(0.0))
    .bind(body.carbs.unwrap_or(0.0))
    .bind(body.fiber.unwrap_or(0.0))
    .fetch_one(db)
    .await
}

pub async fn update_food(
    db: &PgPool,
    id: Uuid,
    body: &UpdateFoodRequest,
) -> Result<Option<Food>, sqlx::Error> {
    sqlx::query_as::<_, Food>(
        r#"
        UPDATE foods SET
            name = COALESCE($2, name),
            fat = COALESCE($3, fat),
            protein = COALESCE($4, protein),
            carbs = COALESCE($5, carbs),
            fiber = COALESCE($6, fiber),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(body.name.as_deref().map(str::trim))
    .bind(body.fat)
    .bind(body.protein)
    .bind(body.carbs)
    .bind(body.fiber)
    .fetch_optional(db)
    .await
}

pub async fn delete_food(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM foods WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
