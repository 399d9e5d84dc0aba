use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Identity Schemas ---

/// Admin
///
/// Canonical admin account record stored in the `admins` table. The password
/// is persisted only as a bcrypt hash and is never serialized back out on
/// any response path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// LoginRequest
///
/// Input payload for both POST /api/adminlogin and POST /api/create-admin.
/// `#[serde(default)]` lets a missing field arrive as an empty string, which
/// the credential store rejects as a validation failure rather than the JSON
/// layer rejecting the whole body.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// TokenResponse
///
/// Output schema for a successful login: the signed bearer token the client
/// presents on every protected route for the next hour.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TokenResponse {
    pub token: String,
}

/// MessageResponse
///
/// Generic acknowledgment body used for admin creation and record deletion.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

// --- Record Schemas (Mapped to Database) ---

// Each collection gets a record struct (the persisted row, camelCase on the
// wire) and a draft struct (the client-supplied mutable fields). Drafts use
// `#[serde(default)]` so presence checks happen in the store's shared
// validation routine, not in the deserializer.

/// Internship
///
/// An internship listing published by the placement cell.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// InternshipDraft
///
/// Input payload for creating or fully replacing an internship listing.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct InternshipDraft {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

/// Placement
///
/// A student placement record: who was placed, where, and under which
/// appointment number.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub id: Uuid,
    pub roll_no: String,
    pub student_name: String,
    pub employer: String,
    pub appointment_no: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// PlacementDraft
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct PlacementDraft {
    pub roll_no: String,
    pub student_name: String,
    pub employer: String,
    pub appointment_no: String,
}

/// Achievement
///
/// A student achievement entry shown on the portal's achievements board.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: Uuid,
    pub reg_no: String,
    pub name: String,
    pub achievement: String,
    pub prizes: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// AchievementDraft
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct AchievementDraft {
    pub reg_no: String,
    pub name: String,
    pub achievement: String,
    pub prizes: String,
}

/// Workshop
///
/// A workshop or seminar event. The date is stored as the free-form string
/// the frontend submits; the portal never computes with it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: String,
    pub venue: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// WorkshopDraft
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkshopDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub venue: String,
}

/// Developer
///
/// A profile card for the students who built the portal. `image` is a
/// reference (URL or asset path) resolved by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub id: Uuid,
    pub name: String,
    pub reg_no: String,
    pub image: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// DeveloperDraft
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct DeveloperDraft {
    pub name: String,
    pub reg_no: String,
    pub image: String,
}
