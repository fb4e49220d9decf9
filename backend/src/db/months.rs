use sqlx::{PgConnection, PgPool};

use crate::models::month::{MonthKey, MonthRecord};

/// Creates the month row if it does not exist yet.
pub async fn ensure_month(conn: &mut PgConnection, key: MonthKey) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO months (month_key) VALUES ($1) ON CONFLICT (month_key) DO NOTHING")
        .bind(key.to_string())
        .execute(conn)
        .await?;
    Ok(())
}

/// Newest first, at most `limit` months strictly before `before` when given.
pub async fn list_months(
    db: &PgPool,
    limit: i64,
    before: Option<MonthKey>,
) -> Result<Vec<MonthRecord>, sqlx::Error> {
    sqlx::query_as::<_, MonthRecord>(
        r#"
        SELECT * FROM months
        WHERE $1::TEXT IS NULL OR month_key < $1
        ORDER BY month_key DESC
        LIMIT $2
        "#,
    )
    .bind(before.map(|key| key.to_string()))
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn fetch_month(db: &PgPool, key: MonthKey) -> Result<Option<MonthRecord>, sqlx::Error> {
    sqlx::query_as::<_, MonthRecord>("SELECT * FROM months WHERE month_key = $1")
        .bind(key.to_string())
        .fetch_optional(db)
        .await
}

pub async fn upsert_comments(
    db: &PgPool,
    key: MonthKey,
    comments: Option<&str>,
) -> Result<MonthRecord, sqlx::Error> {
    sqlx::query_as::<_, MonthRecord>(
        r#"
        INSERT INTO months (month_key, comments)
        VALUES ($1, $2)
        ON CONFLICT (month_key) DO UPDATE SET
            comments = EXCLUDED.comments,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(key.to_string())
    .bind(comments)
    .fetch_one(db)
    .await
}
