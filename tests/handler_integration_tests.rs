use axum::{Json, extract::Path, extract::State, http::StatusCode, response::IntoResponse};
use placement_portal::{
    AppState, handlers,
    config::AppConfig,
    error::ApiError,
    models::{
        AchievementDraft, DeveloperDraft, InternshipDraft, LoginRequest, PlacementDraft,
        WorkshopDraft,
    },
};
use uuid::Uuid;

// --- Test Utilities ---

fn test_state() -> AppState {
    AppState::in_memory(AppConfig::default())
}

fn internship_draft(title: &str) -> InternshipDraft {
    InternshipDraft {
        title: title.to_string(),
        company: "Acme".to_string(),
        duration: "3mo".to_string(),
        description: "backend work".to_string(),
    }
}

fn login(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

// --- Record CRUD Handler Tests ---

#[tokio::test]
async fn test_create_internship_returns_generated_fields() {
    let state = test_state();

    let (status, Json(record)) = handlers::create_internship(
        State(state.clone()),
        Json(internship_draft("SWE Intern")),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(record.id, Uuid::nil());
    assert_eq!(record.title, "SWE Intern");
    assert_eq!(record.company, "Acme");
}

#[tokio::test]
async fn test_create_rejects_missing_field() {
    let state = test_state();

    let mut draft = internship_draft("SWE Intern");
    draft.company = String::new();

    let err = handlers::create_internship(State(state), Json(draft))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation("company")));
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_returns_newest_first() {
    let state = test_state();

    let (_, Json(first)) =
        handlers::create_internship(State(state.clone()), Json(internship_draft("First")))
            .await
            .unwrap();
    let (_, Json(second)) =
        handlers::create_internship(State(state.clone()), Json(internship_draft("Second")))
            .await
            .unwrap();

    let Json(listed) = handlers::list_internships(State(state)).await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn test_update_replaces_fields_but_not_identity() {
    let state = test_state();

    let (_, Json(created)) =
        handlers::create_internship(State(state.clone()), Json(internship_draft("Old Title")))
            .await
            .unwrap();

    let replacement = InternshipDraft {
        title: "New Title".to_string(),
        company: "Globex".to_string(),
        duration: "6mo".to_string(),
        description: "frontend work".to_string(),
    };

    let Json(updated) =
        handlers::update_internship(State(state.clone()), Path(created.id), Json(replacement))
            .await
            .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.title, "New Title");
    assert_eq!(updated.company, "Globex");

    // The listing reflects exactly the replaced fields.
    let Json(listed) = handlers::list_internships(State(state)).await.unwrap();
    assert_eq!(listed[0].title, "New Title");
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let state = test_state();

    let err = handlers::update_internship(
        State(state),
        Path(Uuid::new_v4()),
        Json(internship_draft("Ghost")),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::NotFound("Internship")));
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_acknowledges_then_404s() {
    let state = test_state();

    let (_, Json(created)) =
        handlers::create_internship(State(state.clone()), Json(internship_draft("Doomed")))
            .await
            .unwrap();

    let Json(ack) = handlers::delete_internship(State(state.clone()), Path(created.id))
        .await
        .unwrap();
    assert_eq!(ack.message, "Internship deleted successfully");

    // Gone from the listing.
    let Json(listed) = handlers::list_internships(State(state.clone()))
        .await
        .unwrap();
    assert!(listed.iter().all(|record| record.id != created.id));

    // A second delete of the same id reports not found.
    let err = handlers::delete_internship(State(state), Path(created.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound("Internship")));
}

#[tokio::test]
async fn test_every_collection_exposes_the_same_contract() {
    let state = test_state();

    let (status, Json(placement)) = handlers::create_placement(
        State(state.clone()),
        Json(PlacementDraft {
            roll_no: "19CS042".to_string(),
            student_name: "Priya".to_string(),
            employer: "Initech".to_string(),
            appointment_no: "APT-7".to_string(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(placement.roll_no, "19CS042");

    let (_, Json(achievement)) = handlers::create_achievement(
        State(state.clone()),
        Json(AchievementDraft {
            reg_no: "REG-11".to_string(),
            name: "Arjun".to_string(),
            achievement: "Hackathon winner".to_string(),
            prizes: "First prize".to_string(),
        }),
    )
    .await
    .unwrap();

    let (_, Json(workshop)) = handlers::create_workshop(
        State(state.clone()),
        Json(WorkshopDraft {
            title: "Rust 101".to_string(),
            description: "Intro workshop".to_string(),
            date: "2026-01-10".to_string(),
            venue: "Seminar Hall".to_string(),
        }),
    )
    .await
    .unwrap();

    let (_, Json(developer)) = handlers::create_developer(
        State(state.clone()),
        Json(DeveloperDraft {
            name: "Meera".to_string(),
            reg_no: "REG-42".to_string(),
            image: "/assets/meera.png".to_string(),
        }),
    )
    .await
    .unwrap();

    let Json(placements) = handlers::list_placements(State(state.clone())).await.unwrap();
    let Json(achievements) = handlers::list_achievements(State(state.clone()))
        .await
        .unwrap();
    let Json(workshops) = handlers::list_workshops(State(state.clone())).await.unwrap();
    let Json(developers) = handlers::list_developers(State(state)).await.unwrap();

    assert_eq!(placements[0].id, placement.id);
    assert_eq!(achievements[0].id, achievement.id);
    assert_eq!(workshops[0].id, workshop.id);
    assert_eq!(developers[0].id, developer.id);
}

// --- Identity Handler Tests ---

#[tokio::test]
async fn test_create_admin_then_duplicate_conflicts() {
    let state = test_state();

    let (status, Json(body)) =
        handlers::create_admin(State(state.clone()), Json(login("portal", "s3cret-pass")))
            .await
            .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.message, "Admin user created successfully");

    let err = handlers::create_admin(State(state), Json(login("portal", "another-pass")))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Conflict));
    assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_admin_requires_credentials() {
    let state = test_state();

    let err = handlers::create_admin(State(state), Json(login("portal", "")))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation("password")));
}

#[tokio::test]
async fn test_login_returns_token_for_valid_credentials() {
    let state = test_state();

    handlers::create_admin(State(state.clone()), Json(login("portal", "s3cret-pass")))
        .await
        .unwrap();

    let Json(response) =
        handlers::admin_login(State(state), Json(login("portal", "s3cret-pass")))
            .await
            .unwrap();

    assert!(!response.token.is_empty());
}

#[tokio::test]
async fn test_login_failure_is_uniform() {
    let state = test_state();

    handlers::create_admin(State(state.clone()), Json(login("portal", "s3cret-pass")))
        .await
        .unwrap();

    // Unknown username and wrong password must be indistinguishable.
    let unknown = handlers::admin_login(State(state.clone()), Json(login("nobody", "whatever")))
        .await
        .unwrap_err();
    let wrong = handlers::admin_login(State(state), Json(login("portal", "wrong-pass")))
        .await
        .unwrap_err();

    assert!(matches!(unknown, ApiError::InvalidCredentials));
    assert!(matches!(wrong, ApiError::InvalidCredentials));
    assert_eq!(unknown.to_string(), wrong.to_string());
    assert_eq!(unknown.into_response().status(), StatusCode::BAD_REQUEST);
}

// --- Public Mirror Handler Tests ---

#[tokio::test]
async fn test_public_mirrors_reflect_protected_writes() {
    let state = test_state();

    let (_, Json(created)) =
        handlers::create_internship(State(state.clone()), Json(internship_draft("Visible")))
            .await
            .unwrap();
    handlers::create_placement(
        State(state.clone()),
        Json(PlacementDraft {
            roll_no: "19CS001".to_string(),
            student_name: "Dev".to_string(),
            employer: "Hooli".to_string(),
            appointment_no: "APT-1".to_string(),
        }),
    )
    .await
    .unwrap();

    let Json(internships) = handlers::public_internships(State(state.clone()))
        .await
        .unwrap();
    let Json(placements) = handlers::public_placements(State(state)).await.unwrap();

    assert_eq!(internships[0].id, created.id);
    assert_eq!(placements.len(), 1);
}
