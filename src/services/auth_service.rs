use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::models::User;
use crate::utils::AppError;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user _id (hex)
    pub username: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

/// Identity decoded from a verified token and attached to the request context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            email: claims.email,
        }
    }
}

/// Signs and verifies bearer tokens. Built once from config and shared.
#[derive(Clone)]
pub struct AuthService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration: Duration,
}

impl AuthService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            expiration: Duration::hours(config.expiration_hours),
        }
    }

    pub fn sign_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id_hex(),
            username: user.username.clone(),
            email: user.email.clone(),
            iat: now.timestamp() as usize,
            exp: (now + self.expiration).timestamp().max(0) as usize,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(signing_failed)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expired means expired: no clock tolerance
        validation.leeway = 0;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    /// Resolves the request identity. Missing or bad tokens yield `None`, never an error.
    pub fn authenticate(&self, token: Option<&str>) -> Option<AuthUser> {
        let token = token?;
        match self.verify_token(token) {
            Ok(claims) => Some(claims.into()),
            Err(e) => {
                log::warn!("⚠️  Invalid token: {}", e);
                None
            }
        }
    }
}

fn signing_failed(e: jsonwebtoken::errors::Error) -> AppError {
    AppError::Internal(format!("token signing failed: {}", e))
}

/// Picks the decoded `token` query parameter, else the last
/// whitespace-separated segment of the `Authorization` header.
pub fn extract_token<'a>(
    query_token: Option<&'a str>,
    authorization: Option<&'a str>,
) -> Option<&'a str> {
    let from_query = query_token.filter(|token| !token.is_empty());

    from_query.or_else(|| {
        authorization
            .and_then(|header| header.split_whitespace().last())
            .filter(|token| !token.is_empty())
    })
}
