// src/services/token.rs

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{AccessClaims, RefreshClaims, UserRole},
};

// ---
// Funções puras sobre (token, segredo). Sem estado além do segredo.
// ---

/// Assina `claims` com HS256. O `exp` já vem preenchido pelo builder das claims.
pub fn issue<C: Serialize>(secret: &str, claims: &C) -> Result<String, AppError> {
    Ok(encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Decodifica e valida assinatura + expiração. Qualquer falha vira `InvalidToken`.
pub fn decode_claims<C: DeserializeOwned>(token: &str, secret: &str) -> Result<C, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<C>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::InvalidToken)
}

pub fn verify(token: &str, secret: &str) -> bool {
    decode_claims::<SubjectClaims>(token, secret).is_ok()
}

pub fn extract_subject(token: &str, secret: &str) -> Result<Uuid, AppError> {
    decode_claims::<SubjectClaims>(token, secret).map(|claims| claims.sub)
}

// Apenas o que todo token carrega
#[derive(Deserialize)]
struct SubjectClaims {
    sub: Uuid,
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

// Guarda os dois segredos independentes e as validades
#[derive(Clone)]
pub struct TokenManager {
    access_secret: Arc<str>,
    refresh_secret: Arc<str>,
    access_ttl: chrono::Duration,
    refresh_ttl: chrono::Duration,
}

impl TokenManager {
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_ttl: chrono::Duration,
        refresh_ttl: chrono::Duration,
    ) -> Self {
        Self {
            access_secret: Arc::from(access_secret),
            refresh_secret: Arc::from(refresh_secret),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn issue_pair(&self, user_id: Uuid, role: UserRole) -> Result<TokenPair, AppError> {
        let access = AccessClaims::for_user(user_id, role, self.access_ttl);
        let refresh = RefreshClaims::for_user(user_id, self.refresh_ttl);

        Ok(TokenPair {
            access_token: issue(&self.access_secret, &access)?,
            refresh_token: issue(&self.refresh_secret, &refresh)?,
        })
    }

    pub fn decode_access(&self, token: &str) -> Result<AccessClaims, AppError> {
        decode_claims(token, &self.access_secret)
    }

    pub fn decode_refresh(&self, token: &str) -> Result<RefreshClaims, AppError> {
        decode_claims(token, &self.refresh_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> TokenManager {
        TokenManager::new(
            "access-secret",
            "refresh-secret",
            chrono::Duration::hours(1),
            chrono::Duration::hours(24),
        )
    }

    #[test]
    fn issued_token_round_trips_subject() {
        let user_id = Uuid::new_v4();
        let claims = AccessClaims::for_user(user_id, UserRole::Owner, chrono::Duration::hours(1));
        let token = issue("s3cret", &claims).unwrap();

        assert!(verify(&token, "s3cret"));
        assert_eq!(extract_subject(&token, "s3cret").unwrap(), user_id);
    }

    #[test]
    fn wrong_secret_fails_closed() {
        let claims = RefreshClaims::for_user(Uuid::new_v4(), chrono::Duration::hours(1));
        let token = issue("right", &claims).unwrap();

        assert!(!verify(&token, "wrong"));
        assert!(matches!(extract_subject(&token, "wrong"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = AccessClaims::for_user(Uuid::new_v4(), UserRole::Owner, chrono::Duration::hours(-2));
        let token = issue("s3cret", &claims).unwrap();

        assert!(!verify(&token, "s3cret"));
    }

    #[test]
    fn garbage_is_not_a_token() {
        assert!(!verify("not.a.jwt", "s3cret"));
        assert!(!verify("", "s3cret"));
    }

    #[test]
    fn access_and_refresh_tokens_are_not_interchangeable() {
        let tokens = manager();
        let user_id = Uuid::new_v4();
        let pair = tokens.issue_pair(user_id, UserRole::Employer).unwrap();

        let access = tokens.decode_access(&pair.access_token).unwrap();
        assert_eq!(access.sub, user_id);
        assert_eq!(access.role, UserRole::Employer);
        assert_eq!(tokens.decode_refresh(&pair.refresh_token).unwrap().sub, user_id);

        assert!(tokens.decode_access(&pair.refresh_token).is_err());
        assert!(tokens.decode_refresh(&pair.access_token).is_err());
    }
}
