use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::repository::StoreError;

/// ApiError
///
/// The complete error taxonomy of the HTTP surface. Every handler returns
/// `Result<_, ApiError>`, and store-level failures convert into one of these
/// variants before they reach the client. Nothing in the request path is
/// allowed to panic on a store failure.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token was presented on a protected route.
    #[error("Missing authentication token")]
    Unauthenticated,

    /// A token was presented but is malformed, expired, or wrongly signed.
    /// Always distinct from the missing-token case (403 vs 401), regardless
    /// of why verification failed.
    #[error("Invalid or expired token")]
    Forbidden,

    /// Uniform login failure. Deliberately identical for an unknown username
    /// and a wrong password so the response does not leak which accounts
    /// exist.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A required field was missing or empty on a create/update payload.
    #[error("Validation failed: {0} is required")]
    Validation(&'static str),

    /// The update/delete target does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Duplicate admin username.
    #[error("Admin username already exists")]
    Conflict,

    /// Unexpected store failure. The detail is echoed back for debugging;
    /// clients must not rely on its structure.
    #[error("Server error")]
    Internal(String),
}

/// ErrorBody
///
/// JSON body for every error response: a human-readable `message`, plus the
/// underlying failure detail for internal errors only.
#[derive(Debug, Serialize, Deserialize, ToSchema, Default)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::InvalidCredentials | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match &self {
            ApiError::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                Some(detail.clone())
            }
            _ => None,
        };

        let body = ErrorBody {
            message: self.to_string(),
            error: detail,
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingField { field } => ApiError::Validation(field),
            StoreError::NotFound { entity } => ApiError::NotFound(entity),
            StoreError::DuplicateUsername => ApiError::Conflict,
            StoreError::Database(e) => ApiError::Internal(e.to_string()),
            StoreError::Hash(e) => ApiError::Internal(e.to_string()),
        }
    }
}
