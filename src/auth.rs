//! Password hashing, access tokens and the bearer token extractor.

use std::future::{Ready, ready};

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{UserCredentialId, UserName};
use crate::domain::user::UserCredential;
use crate::dto::response::Status;

#[cfg(not(test))]
const HASH_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
const HASH_COST: u32 = 4;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token service is not configured")]
    NotConfigured,

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("failed to issue token: {0}")]
    Issue(String),
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(Status::new(status, self.to_string()))
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, HASH_COST)?)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(password, hash)?)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Credential id.
    pub sub: String,
    pub user_name: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: &str, lifetime_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::minutes(lifetime_minutes),
        }
    }

    pub fn issue(&self, credential: &UserCredential) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: credential.id.to_string(),
            user_name: credential.user_name.to_string(),
            exp: (now + self.lifetime).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Issue(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

/// Caller identified by a valid `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub credential_id: UserCredentialId,
    pub user_name: UserName,
}

impl TryFrom<Claims> for AuthenticatedUser {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims
            .sub
            .parse::<i32>()
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Ok(Self {
            credential_id: UserCredentialId::new(id)
                .map_err(|e| AuthError::InvalidToken(e.to_string()))?,
            user_name: UserName::new(claims.user_name)
                .map_err(|e| AuthError::InvalidToken(e.to_string()))?,
        })
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AuthError> {
    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or(AuthError::NotConfigured)?;

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)?;

    AuthenticatedUser::try_from(tokens.verify(token)?)
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> UserCredential {
        let now = Utc::now().naive_utc();
        UserCredential {
            id: UserCredentialId::new(7).unwrap(),
            user_name: UserName::new("admin").unwrap(),
            password: String::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("s3cret").unwrap();
        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("other", &hash).unwrap());
    }

    #[test]
    fn issued_token_verifies_and_names_the_credential() {
        let tokens = TokenService::new("secret", 5);
        let token = tokens.issue(&credential()).unwrap();

        let user = AuthenticatedUser::try_from(tokens.verify(&token).unwrap()).unwrap();
        assert_eq!(user.credential_id.get(), 7);
        assert_eq!(user.user_name.as_str(), "admin");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenService::new("one", 5).issue(&credential()).unwrap();
        assert!(matches!(
            TokenService::new("two", 5).verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = TokenService::new("secret", -10);
        let token = tokens.issue(&credential()).unwrap();
        assert!(tokens.verify(&token).is_err());
    }
}
