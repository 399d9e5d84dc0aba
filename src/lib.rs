use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use std::sync::Arc;
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

// Module for routing segregation (Public, Identity, Authenticated).
pub mod routes;
use auth::AuthUser; // The resolved authenticated admin identity.
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry
// point (main.rs) and to the test suites.
pub use config::AppConfig;
pub use error::ApiError;
pub use repository::{
    AdminState, CollectionState, InMemoryAdminStore, InMemoryCollection, PgAdminStore,
    PgCollection,
};

use models::{Achievement, Developer, Internship, Placement, Workshop};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application from the `#[utoipa::path]` and `ToSchema` annotations.
/// Served at `/api-docs/openapi.json`, browsable at `/swagger-ui`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::admin_login, handlers::create_admin,
        handlers::list_internships, handlers::create_internship,
        handlers::update_internship, handlers::delete_internship,
        handlers::list_placements, handlers::create_placement,
        handlers::update_placement, handlers::delete_placement,
        handlers::list_achievements, handlers::create_achievement,
        handlers::update_achievement, handlers::delete_achievement,
        handlers::list_workshops, handlers::create_workshop,
        handlers::update_workshop, handlers::delete_workshop,
        handlers::list_developers, handlers::create_developer,
        handlers::update_developer, handlers::delete_developer,
        handlers::public_internships, handlers::public_placements
    ),
    components(
        schemas(
            models::LoginRequest, models::TokenResponse, models::MessageResponse,
            models::Internship, models::InternshipDraft,
            models::Placement, models::PlacementDraft,
            models::Achievement, models::AchievementDraft,
            models::Workshop, models::WorkshopDraft,
            models::Developer, models::DeveloperDraft,
            error::ErrorBody,
        )
    ),
    tags(
        (name = "placement-portal", description = "Placement Cell Portal API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe, immutable container holding all application
/// services and configuration, shared across all incoming requests. Each
/// collection handle is the same generic store component instantiated for a
/// different entity.
#[derive(Clone)]
pub struct AppState {
    /// Credential store backing login and admin creation.
    pub admins: AdminState,
    pub internships: CollectionState<Internship>,
    pub placements: CollectionState<Placement>,
    pub achievements: CollectionState<Achievement>,
    pub workshops: CollectionState<Workshop>,
    pub developers: CollectionState<Developer>,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Builds a state where every collection and the credential store are
    /// backed by Postgres, sharing one connection pool.
    pub fn postgres(pool: sqlx::PgPool, config: AppConfig) -> Self {
        Self {
            admins: Arc::new(PgAdminStore::new(pool.clone())),
            internships: Arc::new(PgCollection::new(pool.clone())),
            placements: Arc::new(PgCollection::new(pool.clone())),
            achievements: Arc::new(PgCollection::new(pool.clone())),
            workshops: Arc::new(PgCollection::new(pool.clone())),
            developers: Arc::new(PgCollection::new(pool)),
            config,
        }
    }

    /// Builds a state over the in-memory stores. Used by the test suites;
    /// behavior matches the Postgres implementation's contract.
    pub fn in_memory(config: AppConfig) -> Self {
        Self {
            admins: Arc::new(InMemoryAdminStore::new()),
            internships: Arc::new(InMemoryCollection::new()),
            placements: Arc::new(InMemoryCollection::new()),
            achievements: Arc::new(InMemoryCollection::new()),
            workshops: Arc::new(InMemoryCollection::new()),
            developers: Arc::new(InMemoryCollection::new()),
            config,
        }
    }
}

// Allows the AuthUser extractor to pull the configuration (token secret)
// out of the shared state.
impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication for the protected routes.
///
/// *Mechanism*: attempts to extract `AuthUser` from the request. Since
/// `AuthUser` implements `FromRequestParts`, a missing token rejects the
/// request with 401 and an invalid or expired one with 403 before the
/// handler runs. On success the request proceeds unchanged.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration. The portal frontend is served from a different
    // origin, so everything is allowed through.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public routes: no middleware applied.
        .merge(public::public_routes())
        // Identity routes: also unauthenticated; they are how a client
        // obtains a token.
        .merge(admin::admin_routes())
        // Protected CRUD routes, gated by the bearer-token middleware.
        .merge(
            authenticated::authenticated_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        // Apply the unified state to all routes.
        .with_state(state);

    // 3. Observability and correlation layers (applied outermost).
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID generation: a unique UUID for every
                // incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request tracing: wraps the request/response lifecycle
                // in a span carrying the request id.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID propagation back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS layer.
        .layer(cors)
}

/// trace_span_logger
///
/// Customizes the `TraceLayer` span: includes the `x-request-id` header (if
/// present) alongside the HTTP method and URI, so every log line for a
/// single request is correlated by a unique id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
