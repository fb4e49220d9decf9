use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::AppState;

/// The authenticated operator, inserted into request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    let token_data = verify_token(token, &state.config)?;

    // Only the configured operator holds a session.
    if token_data.claims.sub != state.config.operator_email {
        return Err(AppError::Unauthorized);
    }

    req.extensions_mut().insert(AuthUser {
        email: token_data.claims.sub,
    });
    Ok(next.run(req).await)
}
