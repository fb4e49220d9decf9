use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "daylog-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
        .is_ok();

    let (status, ready, database) = if db_ok {
        (StatusCode::OK, "ready", "ok")
    } else {
        tracing::warn!("Readiness check failed: database unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready", "failed")
    };

    (
        status,
        Json(json!({
            "status": ready,
            "checks": { "database": database },
        })),
    )
}
