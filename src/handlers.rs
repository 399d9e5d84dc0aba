use crate::{
    AppState, auth,
    error::ApiError,
    repository::{AdminStore, Collection},
    models::{
        Achievement, AchievementDraft, Developer, DeveloperDraft, Internship, InternshipDraft,
        LoginRequest, MessageResponse, Placement, PlacementDraft, TokenResponse, Workshop,
        WorkshopDraft,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

fn deleted(entity: &str) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("{entity} deleted successfully"),
    })
}

// --- Identity Handlers ---

/// admin_login
///
/// [Public Route] Authenticates an admin and issues a one-hour bearer token.
///
/// *Security*: The failure response is identical for an unknown username and
/// a wrong password, so the endpoint does not reveal which accounts exist.
#[utoipa::path(
    post,
    path = "/api/adminlogin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid credentials")
    )
)]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let admin = state
        .admins
        .find(&payload.username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = bcrypt::verify(&payload.password, &admin.password_hash)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth::issue_token(&admin, &state.config.jwt_secret)?;
    Ok(Json(TokenResponse { token }))
}

/// create_admin
///
/// [Public Route] Registers a new admin account. The password is hashed by
/// the credential store before persistence; no token is issued, the new
/// admin logs in separately.
#[utoipa::path(
    post,
    path = "/api/create-admin",
    request_body = LoginRequest,
    responses(
        (status = 201, description = "Admin created", body = MessageResponse),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_admin(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state
        .admins
        .create(&payload.username, &payload.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Admin user created successfully".to_string(),
        }),
    ))
}

// --- Internship Handlers ---

/// list_internships
///
/// [Protected Route] All internship listings, newest first.
#[utoipa::path(
    get,
    path = "/api/internships",
    responses((status = 200, description = "Internships", body = [Internship]))
)]
pub async fn list_internships(
    State(state): State<AppState>,
) -> Result<Json<Vec<Internship>>, ApiError> {
    Ok(Json(state.internships.list().await?))
}

/// create_internship
///
/// [Protected Route] Publishes a new internship listing. The store assigns
/// the id and creation timestamp and returns the full record.
#[utoipa::path(
    post,
    path = "/api/internships",
    request_body = InternshipDraft,
    responses(
        (status = 201, description = "Created", body = Internship),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_internship(
    State(state): State<AppState>,
    Json(draft): Json<InternshipDraft>,
) -> Result<(StatusCode, Json<Internship>), ApiError> {
    let record = state.internships.create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// update_internship
///
/// [Protected Route] Full-field replace of an internship listing. Callers
/// resend every field; id and createdAt never change.
#[utoipa::path(
    put,
    path = "/api/internships/{id}",
    request_body = InternshipDraft,
    responses(
        (status = 200, description = "Updated", body = Internship),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_internship(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<InternshipDraft>,
) -> Result<Json<Internship>, ApiError> {
    Ok(Json(state.internships.update(id, draft).await?))
}

/// delete_internship
///
/// [Protected Route] Removes a listing, returning an acknowledgment rather
/// than the deleted body.
#[utoipa::path(
    delete,
    path = "/api/internships/{id}",
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_internship(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.internships.delete(id).await?;
    Ok(deleted("Internship"))
}

// --- Placement Handlers ---

/// list_placements
#[utoipa::path(
    get,
    path = "/api/placements",
    responses((status = 200, description = "Placements", body = [Placement]))
)]
pub async fn list_placements(
    State(state): State<AppState>,
) -> Result<Json<Vec<Placement>>, ApiError> {
    Ok(Json(state.placements.list().await?))
}

/// create_placement
#[utoipa::path(
    post,
    path = "/api/placements",
    request_body = PlacementDraft,
    responses(
        (status = 201, description = "Created", body = Placement),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_placement(
    State(state): State<AppState>,
    Json(draft): Json<PlacementDraft>,
) -> Result<(StatusCode, Json<Placement>), ApiError> {
    let record = state.placements.create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// update_placement
#[utoipa::path(
    put,
    path = "/api/placements/{id}",
    request_body = PlacementDraft,
    responses(
        (status = 200, description = "Updated", body = Placement),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_placement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<PlacementDraft>,
) -> Result<Json<Placement>, ApiError> {
    Ok(Json(state.placements.update(id, draft).await?))
}

/// delete_placement
#[utoipa::path(
    delete,
    path = "/api/placements/{id}",
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_placement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.placements.delete(id).await?;
    Ok(deleted("Placement"))
}

// --- Achievement Handlers ---

/// list_achievements
#[utoipa::path(
    get,
    path = "/api/achievements",
    responses((status = 200, description = "Achievements", body = [Achievement]))
)]
pub async fn list_achievements(
    State(state): State<AppState>,
) -> Result<Json<Vec<Achievement>>, ApiError> {
    Ok(Json(state.achievements.list().await?))
}

/// create_achievement
#[utoipa::path(
    post,
    path = "/api/achievements",
    request_body = AchievementDraft,
    responses(
        (status = 201, description = "Created", body = Achievement),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_achievement(
    State(state): State<AppState>,
    Json(draft): Json<AchievementDraft>,
) -> Result<(StatusCode, Json<Achievement>), ApiError> {
    let record = state.achievements.create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// update_achievement
#[utoipa::path(
    put,
    path = "/api/achievements/{id}",
    request_body = AchievementDraft,
    responses(
        (status = 200, description = "Updated", body = Achievement),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_achievement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<AchievementDraft>,
) -> Result<Json<Achievement>, ApiError> {
    Ok(Json(state.achievements.update(id, draft).await?))
}

/// delete_achievement
#[utoipa::path(
    delete,
    path = "/api/achievements/{id}",
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_achievement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.achievements.delete(id).await?;
    Ok(deleted("Achievement"))
}

// --- Workshop Handlers ---

/// list_workshops
#[utoipa::path(
    get,
    path = "/api/workshops",
    responses((status = 200, description = "Workshops", body = [Workshop]))
)]
pub async fn list_workshops(State(state): State<AppState>) -> Result<Json<Vec<Workshop>>, ApiError> {
    Ok(Json(state.workshops.list().await?))
}

/// create_workshop
#[utoipa::path(
    post,
    path = "/api/workshops",
    request_body = WorkshopDraft,
    responses(
        (status = 201, description = "Created", body = Workshop),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_workshop(
    State(state): State<AppState>,
    Json(draft): Json<WorkshopDraft>,
) -> Result<(StatusCode, Json<Workshop>), ApiError> {
    let record = state.workshops.create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// update_workshop
#[utoipa::path(
    put,
    path = "/api/workshops/{id}",
    request_body = WorkshopDraft,
    responses(
        (status = 200, description = "Updated", body = Workshop),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_workshop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<WorkshopDraft>,
) -> Result<Json<Workshop>, ApiError> {
    Ok(Json(state.workshops.update(id, draft).await?))
}

/// delete_workshop
#[utoipa::path(
    delete,
    path = "/api/workshops/{id}",
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_workshop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.workshops.delete(id).await?;
    Ok(deleted("Workshop"))
}

// --- Developer Handlers ---

/// list_developers
#[utoipa::path(
    get,
    path = "/api/developers",
    responses((status = 200, description = "Developers", body = [Developer]))
)]
pub async fn list_developers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Developer>>, ApiError> {
    Ok(Json(state.developers.list().await?))
}

/// create_developer
#[utoipa::path(
    post,
    path = "/api/developers",
    request_body = DeveloperDraft,
    responses(
        (status = 201, description = "Created", body = Developer),
        (status = 400, description = "Missing required field")
    )
)]
pub async fn create_developer(
    State(state): State<AppState>,
    Json(draft): Json<DeveloperDraft>,
) -> Result<(StatusCode, Json<Developer>), ApiError> {
    let record = state.developers.create(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// update_developer
#[utoipa::path(
    put,
    path = "/api/developers/{id}",
    request_body = DeveloperDraft,
    responses(
        (status = 200, description = "Updated", body = Developer),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_developer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<DeveloperDraft>,
) -> Result<Json<Developer>, ApiError> {
    Ok(Json(state.developers.update(id, draft).await?))
}

/// delete_developer
#[utoipa::path(
    delete,
    path = "/api/developers/{id}",
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_developer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.developers.delete(id).await?;
    Ok(deleted("Developer"))
}

// --- Public Mirror Handlers ---

/// public_internships
///
/// [Public Route] Read-only mirror of the internship listing, served without
/// a token for the portal's public pages. Same ordering as the protected
/// listing.
#[utoipa::path(
    get,
    path = "/public/internships",
    responses((status = 200, description = "Internships", body = [Internship]))
)]
pub async fn public_internships(
    State(state): State<AppState>,
) -> Result<Json<Vec<Internship>>, ApiError> {
    Ok(Json(state.internships.list().await?))
}

/// public_placements
///
/// [Public Route] Read-only mirror of the placement records.
#[utoipa::path(
    get,
    path = "/public/placements",
    responses((status = 200, description = "Placements", body = [Placement]))
)]
pub async fn public_placements(
    State(state): State<AppState>,
) -> Result<Json<Vec<Placement>>, ApiError> {
    Ok(Json(state.placements.list().await?))
}
