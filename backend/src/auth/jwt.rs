use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Operator email.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

pub fn create_access_token(subject: &str, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: subject.to_string(),
        exp: (now + Duration::seconds(config.jwt_access_ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create access token: {}", e)))
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, ttl: i64) -> Config {
        Config {
            database_url: String::new(),
            db_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            cors_extra_origins: Vec::new(),
            jwt_secret: secret.into(),
            jwt_access_ttl_secs: ttl,
            operator_email: "me@example.com".into(),
            operator_password_hash: String::new(),
        }
    }

    #[test]
    fn test_token_carries_subject() {
        let config = config("s3cret", 600);
        let token = create_access_token("me@example.com", &config).unwrap();
        let data = verify_token(&token, &config).unwrap();
        assert_eq!(data.claims.sub, "me@example.com");
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = create_access_token("me@example.com", &config("one", 600)).unwrap();
        assert!(matches!(
            verify_token(&token, &config("two", 600)),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Past the default 60s leeway.
        let config = config("s3cret", -300);
        let token = create_access_token("me@example.com", &config).unwrap();
        assert!(verify_token(&token, &config).is_err());
    }
}
