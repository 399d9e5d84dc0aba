use axum::{
    extract::FromRequestParts,
    http::{Method, Request, StatusCode, Uri, header, request::Parts},
    response::IntoResponse,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use placement_portal::{
    AppState,
    auth::{AuthUser, Claims, issue_token},
    config::AppConfig,
    error::ApiError,
    repository::AdminStore,
};
use std::time::SystemTime;
use uuid::Uuid;

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
const TEST_ADMIN_ID: Uuid = Uuid::from_u128(1);

fn create_token_with_secret(admin_id: Uuid, exp_offset: i64, secret: &str) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: admin_id,
        username: "portal-admin".to_string(),
        iat: now as usize,
        exp: (now + exp_offset) as usize,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn create_token(admin_id: Uuid, exp_offset: i64) -> String {
    create_token_with_secret(admin_id, exp_offset, TEST_JWT_SECRET)
}

fn create_app_state() -> AppState {
    let mut config = AppConfig::default();
    config.jwt_secret = TEST_JWT_SECRET.to_string();
    AppState::in_memory(config)
}

/// Helper to get the mutable Parts struct from a generated Request
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

fn bearer_parts(token: &str) -> Parts {
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    parts
}

// --- Tests ---

#[tokio::test]
async fn test_auth_success_with_valid_token() {
    let token = create_token(TEST_ADMIN_ID, 3600);
    let app_state = create_app_state();

    let mut parts = bearer_parts(&token);
    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_ok());
    let user = auth_user.unwrap();
    assert_eq!(user.id, TEST_ADMIN_ID);
    assert_eq!(user.username, "portal-admin");
}

#[tokio::test]
async fn test_missing_header_is_unauthenticated() {
    let app_state = create_app_state();

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    let err = auth_user.unwrap_err();
    assert!(matches!(err, ApiError::Unauthenticated));
    assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_header_counts_as_missing_token() {
    let app_state = create_app_state();

    // A raw token without the "Bearer " prefix is treated as no token
    // presented, not as a bad token.
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&create_token(TEST_ADMIN_ID, 3600)).unwrap(),
    );

    let err = AuthUser::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthenticated));
}

#[tokio::test]
async fn test_malformed_token_is_forbidden() {
    let app_state = create_app_state();

    let mut parts = bearer_parts("not.a.token");
    let err = AuthUser::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Forbidden));
    assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_expired_token_is_forbidden() {
    // Two hours past expiry, well beyond the decoder's leeway.
    let token = create_token(TEST_ADMIN_ID, -7200);
    let app_state = create_app_state();

    let mut parts = bearer_parts(&token);
    let err = AuthUser::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Forbidden));
    assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_wrong_secret_is_forbidden() {
    let token = create_token_with_secret(TEST_ADMIN_ID, 3600, "a-different-secret");
    let app_state = create_app_state();

    let mut parts = bearer_parts(&token);
    let err = AuthUser::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Forbidden));
}

#[tokio::test]
async fn test_issued_token_passes_the_guard() {
    // The token minted by the login path must be accepted by the extractor:
    // issue and verify against the same state.
    let app_state = create_app_state();
    let admin = app_state
        .admins
        .create("issuer-admin", "hunter2hunter2")
        .await
        .unwrap();

    let token = issue_token(&admin, &app_state.config.jwt_secret).unwrap();

    let mut parts = bearer_parts(&token);
    let user = AuthUser::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();

    assert_eq!(user.id, admin.id);
    assert_eq!(user.username, "issuer-admin");
}
