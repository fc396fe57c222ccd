use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

const TOKEN_LIFETIME_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Company,
    Student,
}

/// Bearer-token claims: the principal email, its role, and expiry.
/// The core never reads these directly; the extractors below turn them into
/// a plain principal email before any domain code runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
}

pub fn issue_token(email: &str, role: Role, secret: &str) -> Result<String, AppError> {
    let exp = Utc::now()
        .checked_add_signed(chrono::Duration::days(TOKEN_LIFETIME_DAYS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("token expiry overflow")))?
        .timestamp() as usize;

    let claims = Claims {
        sub: email.to_string(),
        role,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("token encoding failed: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

fn bearer_claims(parts: &Parts, secret: &str) -> Result<Claims, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;
    let token = header.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;
    verify_token(token, secret)
}

/// Extractor for company-scoped routes: verifies the bearer token and hands
/// the handler the authenticated company email.
#[derive(Debug, Clone)]
pub struct CompanyAuth {
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CompanyAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, &state.config.jwt_secret)?;
        if claims.role != Role::Company {
            return Err(AppError::Unauthorized);
        }
        Ok(CompanyAuth { email: claims.sub })
    }
}

/// Extractor for student-scoped routes.
#[derive(Debug, Clone)]
pub struct StudentAuth {
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for StudentAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, &state.config.jwt_secret)?;
        if claims.role != Role::Student {
            return Err(AppError::Unauthorized);
        }
        Ok(StudentAuth { email: claims.sub })
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(password, hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password verification failed: {e}")))
}

/// Signup-time credential checks. Uniqueness is the store's job; this only
/// rejects inputs that can never be valid.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(AppError::Validation("a valid email is required".to_string()));
    }
    if password.len() < 8 {
        return Err(AppError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trips_with_role() {
        let token = issue_token("acme@example.com", Role::Company, SECRET).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "acme@example.com");
        assert_eq!(claims.role, Role::Company);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue_token("acme@example.com", Role::Company, SECRET).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(matches!(
            verify_token(&tampered, SECRET),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token("acme@example.com", Role::Student, "other-secret").unwrap();
        assert!(matches!(
            verify_token(&token, SECRET),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(verify_password("hunter2hunter2", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn validates_credentials() {
        assert!(validate_credentials("a@b.com", "longenough").is_ok());
        assert!(validate_credentials("", "longenough").is_err());
        assert!(validate_credentials("not-an-email", "longenough").is_err());
        assert!(validate_credentials("@b.com", "longenough").is_err());
        assert!(validate_credentials("a@b.com", "short").is_err());
    }
}
