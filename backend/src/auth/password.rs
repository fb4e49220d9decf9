use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::error::{AppError, AppResult};

/// Checks `password` against a PHC-format argon2 hash.
pub fn verify_password(password: &str, phc: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(phc)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
