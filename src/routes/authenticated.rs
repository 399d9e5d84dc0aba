use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, put},
};

/// Authenticated Router Module
///
/// The five record-collection CRUD surfaces, one identical route shape per
/// collection. Every route here relies on the bearer-token middleware being
/// layered above this module by `create_router`; handlers never re-check
/// authentication themselves.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // --- Internships ---
        .route(
            "/api/internships",
            get(handlers::list_internships).post(handlers::create_internship),
        )
        .route(
            "/api/internships/{id}",
            put(handlers::update_internship).delete(handlers::delete_internship),
        )
        // --- Placements ---
        .route(
            "/api/placements",
            get(handlers::list_placements).post(handlers::create_placement),
        )
        .route(
            "/api/placements/{id}",
            put(handlers::update_placement).delete(handlers::delete_placement),
        )
        // --- Achievements ---
        .route(
            "/api/achievements",
            get(handlers::list_achievements).post(handlers::create_achievement),
        )
        .route(
            "/api/achievements/{id}",
            put(handlers::update_achievement).delete(handlers::delete_achievement),
        )
        // --- Workshops ---
        .route(
            "/api/workshops",
            get(handlers::list_workshops).post(handlers::create_workshop),
        )
        .route(
            "/api/workshops/{id}",
            put(handlers::update_workshop).delete(handlers::delete_workshop),
        )
        // --- Developers ---
        .route(
            "/api/developers",
            get(handlers::list_developers).post(handlers::create_developer),
        )
        .route(
            "/api/developers/{id}",
            put(handlers::update_developer).delete(handlers::delete_developer),
        )
}
