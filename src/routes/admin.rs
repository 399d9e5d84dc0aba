use crate::{AppState, handlers};
use axum::{Router, routing::post};

/// Admin Identity Router Module
///
/// The two identity endpoints. Both are deliberately outside the
/// bearer-token layer: login is how a token is obtained, and admin creation
/// issues no token at all (the new account logs in separately).
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // POST /api/adminlogin
        // Verifies credentials against the stored bcrypt hash and returns a
        // signed one-hour bearer token.
        .route("/api/adminlogin", post(handlers::admin_login))
        // POST /api/create-admin
        // Registers a new admin account. Duplicate usernames are rejected
        // with 409 rather than overwritten.
        .route("/api/create-admin", post(handlers::create_admin))
}
