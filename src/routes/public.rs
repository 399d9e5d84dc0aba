use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any
/// client. The mirror routes re-expose the `list()` operation of exactly two
/// collections (internships and placements) for the portal's public pages;
/// no create/update/delete surface exists here.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load
        // balancer checks. Returns "ok" immediately.
        .route("/health", get(|| async { "ok" }))
        // GET /public/internships
        // Read-only mirror of the internship listing, newest first.
        .route("/public/internships", get(handlers::public_internships))
        // GET /public/placements
        // Read-only mirror of the placement records, newest first.
        .route("/public/placements", get(handlers::public_placements))
}
