use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::AppConfig, error::ApiError, models::Admin};

/// Fixed token validity. Every issued token expires one hour after `iat`.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Claims
///
/// The signed payload carried inside every bearer token. Signed with the
/// server's shared secret at login and validated on every protected request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the admin account's id.
    pub sub: Uuid,
    /// The admin's username, carried for request attribution.
    pub username: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp. Tokens past this point are rejected.
    pub exp: usize,
}

/// issue_token
///
/// Signs a bearer token for a freshly authenticated admin. Stateless: the
/// server keeps no session record, the signature and expiry are the whole
/// contract.
pub fn issue_token(admin: &Admin, secret: &str) -> Result<String, ApiError> {
    let now = Utc::now();
    let expiry = now + chrono::Duration::seconds(TOKEN_TTL_SECS);

    let claims = Claims {
        sub: admin.id,
        username: admin.username.clone(),
        iat: now.timestamp() as usize,
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.to_string()))
}

/// AuthUser
///
/// The resolved identity of an authenticated request: the decoded token
/// claims, nothing more. No CRUD handler consumes it beyond requiring its
/// presence: authorization here is all-or-nothing, not role-scoped.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// AuthUser Extractor Implementation
///
/// Implements Axum's FromRequestParts trait, making AuthUser usable as a
/// function argument in any protected handler and as the gate inside the
/// router's auth middleware. The two failure kinds map to distinct
/// responses:
///
/// - no usable bearer token in the Authorization header: 401
/// - a token that is present but malformed, expired, or wrongly signed: 403
///
/// A header without the `Bearer ` prefix counts as no token presented.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthenticated)?;

        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|_| ApiError::Forbidden)?;

        Ok(AuthUser {
            id: token_data.claims.sub,
            username: token_data.claims.username,
        })
    }
}
