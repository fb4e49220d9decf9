use std::collections::BTreeMap;

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::months::ensure_month;
use crate::dto::UpdateDayRequest;
use crate::models::day::DayRecord;
use crate::models::month::MonthKey;

pub async fn fetch_day(db: &PgPool, date: NaiveDate) -> Result<Option<DayRecord>, sqlx::Error> {
    sqlx::query_as::<_, DayRecord>("SELECT * FROM days WHERE day_date = $1")
        .bind(date)
        .fetch_optional(db)
        .await
}

/// Returns the day, creating it (and its month) on first access.
pub async fn get_or_create_day(db: &PgPool, date: NaiveDate) -> Result<DayRecord, sqlx::Error> {
    let month = MonthKey::try_of(date)
        .ok_or_else(|| sqlx::Error::Protocol(format!("{date} has no month key")))?;
    let mut tx = db.begin().await?;

    ensure_month(&mut tx, month).await?;

    let created = sqlx::query(
        "INSERT INTO days (day_date, month_key) VALUES ($1, $2) ON CONFLICT (day_date) DO NOTHING",
    )
    .bind(date)
    .bind(month.to_string())
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let day = sqlx::query_as::<_, DayRecord>("SELECT * FROM days WHERE day_date = $1")
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    if created > 0 {
        tracing::info!(date = %date, "Day created");
    }
    Ok(day)
}

/// Applies the fields present in `patch`; absent fields are left alone.
pub async fn update_day(
    db: &PgPool,
    date: NaiveDate,
    patch: &UpdateDayRequest,
) -> Result<Option<DayRecord>, sqlx::Error> {
    let mut qb = update_day_query(date, patch);
    qb.build_query_as::<DayRecord>().fetch_optional(db).await
}

/// `UPDATE days SET ...` with one bound assignment per present field, in
/// column order, then the date.
fn update_day_query(date: NaiveDate, patch: &UpdateDayRequest) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new("UPDATE days SET updated_at = NOW()");

    macro_rules! set_columns {
        ($($column:ident),* $(,)?) => {
            $( push_set(&mut qb, stringify!($column), patch.$column.clone()); )*
        };
    }

    set_columns!(
        milam, dream, sunwalk, med, med2, med3, tetris, satyr, relax,
        mirroring, appreciation, helpfulness, small_talk,
        sleep, fasting, drink_food, eat_before_leaving, eat_clean, meals_x4, face_care,
        flaxseed, spirulina, green_veggies, lions_mane, pickles, fish_oil_or_d3, water,
        coffee_x2, lapses, warmup, stretching, workout, micro_w, mass, iso, cardio,
        rpg, code, eng, de, fr, ukr,
        awareness, happiness, openness, focus, anger, fear, emptiness, chaos,
        dreams, events, ideas, comments,
    );

    qb.push(" WHERE day_date = ").push_bind(date).push(" RETURNING *");
    qb
}

fn push_set<'args, T>(qb: &mut QueryBuilder<'args, Postgres>, column: &str, value: Option<T>)
where
    T: 'args + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres> + Send,
{
    if let Some(value) = value {
        qb.push(", ").push(column).push(" = ").push_bind(value);
    }
}

pub async fn fetch_month_days(db: &PgPool, key: MonthKey) -> Result<Vec<DayRecord>, sqlx::Error> {
    sqlx::query_as::<_, DayRecord>(
        "SELECT * FROM days WHERE month_key = $1 ORDER BY day_date DESC",
    )
    .bind(key.to_string())
    .fetch_all(db)
    .await
}

pub async fn list_days_between(
    db: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DayRecord>, sqlx::Error> {
    sqlx::query_as::<_, DayRecord>(
        "SELECT * FROM days WHERE day_date BETWEEN $1 AND $2 ORDER BY day_date DESC",
    )
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await
}

/// Days of the given months, grouped by month key, in one query.
pub async fn days_by_month(
    db: &PgPool,
    month_keys: &[String],
) -> Result<BTreeMap<String, Vec<DayRecord>>, sqlx::Error> {
    let days = sqlx::query_as::<_, DayRecord>(
        "SELECT * FROM days WHERE month_key = ANY($1) ORDER BY day_date DESC",
    )
    .bind(month_keys)
    .fetch_all(db)
    .await?;

    let mut grouped: BTreeMap<String, Vec<DayRecord>> = BTreeMap::new();
    for day in days {
        grouped.entry(day.month_key.clone()).or_default().push(day);
    }
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, 4).unwrap()
    }

    #[test]
    fn test_empty_patch_only_touches_timestamp() {
        let qb = update_day_query(date(), &UpdateDayRequest::default());
        assert_eq!(
            qb.sql(),
            "UPDATE days SET updated_at = NOW() WHERE day_date = $1 RETURNING *"
        );
    }

    #[test]
    fn test_single_field_patch() {
        let patch = UpdateDayRequest {
            med: Some(true),
            ..Default::default()
        };
        assert_eq!(
            update_day_query(date(), &patch).sql(),
            "UPDATE days SET updated_at = NOW(), med = $1 WHERE day_date = $2 RETURNING *"
        );
    }

    #[test]
    fn test_mixed_patch_binds_in_column_order() {
        let patch = UpdateDayRequest {
            comments: Some("quiet day".into()),
            focus: Some(4),
            sleep: Some(7.5),
            workout: Some("5k".into()),
            milam: Some(false),
            lapses: Some(0),
            ..Default::default()
        };
        assert_eq!(
            update_day_query(date(), &patch).sql(),
            "UPDATE days SET updated_at = NOW(), milam = $1, sleep = $2, lapses = $3, \
             workout = $4, focus = $5, comments = $6 WHERE day_date = $7 RETURNING *"
        );
    }
}
