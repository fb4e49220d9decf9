use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Macro-nutrient lookup entry. Not linked to days.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    pub fat: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
