use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::auth::{jwt::create_access_token, middleware::AuthUser, password::verify_password};
use crate::dto::{AccessTokenResponse, LoginRequest, MeResponse};
use crate::error::{AppError, AppResult};
use crate::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    body.validate()?;

    let config = &state.config;
    let email_matches = body.email.trim().eq_ignore_ascii_case(&config.operator_email);
    // Verified regardless of the email match.
    let password_matches = verify_password(&body.password, &config.operator_password_hash)?;

    if !(email_matches && password_matches) {
        tracing::warn!(email = %body.email, "Login rejected");
        return Err(AppError::Unauthorized);
    }

    let access_token = create_access_token(&config.operator_email, config)?;
    tracing::info!(email = %config.operator_email, "Operator logged in");

    Ok(Json(AccessTokenResponse {
        access_token,
        token_type: "Bearer",
        expires_in: config.jwt_access_ttl_secs,
    }))
}

pub async fn me(Extension(auth): Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse { email: auth.email })
}
