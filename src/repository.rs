use crate::models::{
    Achievement, AchievementDraft, Admin, Developer, DeveloperDraft, Internship, InternshipDraft,
    Placement, PlacementDraft, Workshop, WorkshopDraft,
};
use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash};
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use sqlx::{FromRow, PgPool, Postgres, postgres::PgRow, query_builder::QueryBuilder};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;

/// StoreError
///
/// Failures surfaced by the persistence layer. Handlers convert these into
/// the HTTP error taxonomy via `From<StoreError> for ApiError`; the store
/// itself never touches status codes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("username already taken")]
    DuplicateUsername,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Entity
///
/// Describes one record collection to the generic store: its table, the
/// client-mutable columns, and how a persisted record relates to its draft.
/// Implemented once per collection; the SQL assembly, validation, and the
/// in-memory test double are each written a single time against this trait.
///
/// Invariant: `field_values` yields values in exactly `COLUMNS` order.
pub trait Entity:
    for<'r> FromRow<'r, PgRow> + Serialize + Clone + Send + Sync + Unpin + 'static
{
    /// Display name used in not-found and deletion messages.
    const NAME: &'static str;
    /// Backing table.
    const TABLE: &'static str;
    /// Client-mutable columns, excluding `id` and `created_at`.
    const COLUMNS: &'static [&'static str];

    /// The client-supplied payload carrying the mutable fields.
    type Draft: DeserializeOwned + Send + Sync + 'static;

    /// The draft's field values, parallel to `COLUMNS`.
    fn field_values(draft: &Self::Draft) -> Vec<&str>;

    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;

    /// Builds the full record from a validated draft plus the
    /// server-generated identity fields.
    fn from_draft(id: Uuid, draft: Self::Draft, created_at: DateTime<Utc>) -> Self;
}

/// validate
///
/// The shared validation routine applied before every insert and replace:
/// each required field must be present and non-blank. Drafts deserialize
/// missing JSON fields to empty strings, so absence and emptiness fail the
/// same way.
fn validate<E: Entity>(draft: &E::Draft) -> Result<(), StoreError> {
    for (column, value) in E::COLUMNS.iter().zip(E::field_values(draft)) {
        if value.trim().is_empty() {
            return Err(StoreError::MissingField { field: *column });
        }
    }
    Ok(())
}

/// Collection
///
/// The uniform CRUD contract every record collection exposes. Handlers only
/// ever see this trait object, which keeps them testable against the
/// in-memory implementation below.
#[async_trait]
pub trait Collection<E: Entity>: Send + Sync {
    /// All records, newest first. An empty collection is an empty vec.
    async fn list(&self) -> Result<Vec<E>, StoreError>;

    /// Validates and persists a draft with a fresh id and timestamp.
    async fn create(&self, draft: E::Draft) -> Result<E, StoreError>;

    /// Full-field replace. `id` and `created_at` are never touched.
    async fn update(&self, id: Uuid, draft: E::Draft) -> Result<E, StoreError>;

    /// Removes the record, or reports `NotFound` if it was already gone.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// The shared handle type handlers hold for each collection.
pub type CollectionState<E> = Arc<dyn Collection<E>>;

// --- Postgres Implementation ---

/// PgCollection
///
/// The Postgres-backed `Collection`, written once and instantiated per
/// entity. Statements are assembled with `QueryBuilder`; only compile-time
/// constant column names are interpolated, all values are bound.
pub struct PgCollection<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgCollection<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> Collection<E> for PgCollection<E> {
    async fn list(&self) -> Result<Vec<E>, StoreError> {
        let sql = format!("SELECT * FROM {} ORDER BY created_at DESC", E::TABLE);
        Ok(sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?)
    }

    async fn create(&self, draft: E::Draft) -> Result<E, StoreError> {
        validate::<E>(&draft)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} (id, {}, created_at) VALUES (",
            E::TABLE,
            E::COLUMNS.join(", ")
        ));
        let mut values = builder.separated(", ");
        values.push_bind(Uuid::new_v4());
        for value in E::field_values(&draft) {
            values.push_bind(value.to_owned());
        }
        values.push_bind(Utc::now());
        builder.push(") RETURNING *");

        Ok(builder
            .build_query_as::<E>()
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update(&self, id: Uuid, draft: E::Draft) -> Result<E, StoreError> {
        validate::<E>(&draft)?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("UPDATE {} SET ", E::TABLE));
        for (i, (column, value)) in E::COLUMNS.iter().zip(E::field_values(&draft)).enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push(*column);
            builder.push(" = ");
            builder.push_bind(value.to_owned());
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING *");

        builder
            .build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { entity: E::NAME })
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { entity: E::NAME });
        }
        Ok(())
    }
}

// --- In-Memory Implementation (For Tests) ---

/// InMemoryCollection
///
/// A `Collection` over a plain `Vec`, used by the test suites in place of
/// Postgres. It reproduces the contract exactly: newest-first ordering,
/// shared validation, and the same error variants.
pub struct InMemoryCollection<E> {
    records: Mutex<Vec<E>>,
}

impl<E> InMemoryCollection<E> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl<E> Default for InMemoryCollection<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Collection<E> for InMemoryCollection<E> {
    async fn list(&self) -> Result<Vec<E>, StoreError> {
        let mut records = self.records.lock().unwrap().clone();
        // Stable sort; records are stored newest-first so equal timestamps
        // keep insertion recency.
        records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(records)
    }

    async fn create(&self, draft: E::Draft) -> Result<E, StoreError> {
        validate::<E>(&draft)?;
        let record = E::from_draft(Uuid::new_v4(), draft, Utc::now());
        self.records.lock().unwrap().insert(0, record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, draft: E::Draft) -> Result<E, StoreError> {
        validate::<E>(&draft)?;
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(StoreError::NotFound { entity: E::NAME })?;
        let updated = E::from_draft(id, draft, slot.created_at());
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            return Err(StoreError::NotFound { entity: E::NAME });
        }
        Ok(())
    }
}

// --- Entity Mappings ---

impl Entity for Internship {
    const NAME: &'static str = "Internship";
    const TABLE: &'static str = "internships";
    const COLUMNS: &'static [&'static str] = &["title", "company", "duration", "description"];

    type Draft = InternshipDraft;

    fn field_values(draft: &Self::Draft) -> Vec<&str> {
        vec![
            &draft.title,
            &draft.company,
            &draft.duration,
            &draft.description,
        ]
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, draft: Self::Draft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            company: draft.company,
            duration: draft.duration,
            description: draft.description,
            created_at,
        }
    }
}

impl Entity for Placement {
    const NAME: &'static str = "Placement";
    const TABLE: &'static str = "placements";
    const COLUMNS: &'static [&'static str] =
        &["roll_no", "student_name", "employer", "appointment_no"];

    type Draft = PlacementDraft;

    fn field_values(draft: &Self::Draft) -> Vec<&str> {
        vec![
            &draft.roll_no,
            &draft.student_name,
            &draft.employer,
            &draft.appointment_no,
        ]
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, draft: Self::Draft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            roll_no: draft.roll_no,
            student_name: draft.student_name,
            employer: draft.employer,
            appointment_no: draft.appointment_no,
            created_at,
        }
    }
}

impl Entity for Achievement {
    const NAME: &'static str = "Achievement";
    const TABLE: &'static str = "achievements";
    const COLUMNS: &'static [&'static str] = &["reg_no", "name", "achievement", "prizes"];

    type Draft = AchievementDraft;

    fn field_values(draft: &Self::Draft) -> Vec<&str> {
        vec![
            &draft.reg_no,
            &draft.name,
            &draft.achievement,
            &draft.prizes,
        ]
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, draft: Self::Draft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            reg_no: draft.reg_no,
            name: draft.name,
            achievement: draft.achievement,
            prizes: draft.prizes,
            created_at,
        }
    }
}

impl Entity for Workshop {
    const NAME: &'static str = "Workshop";
    const TABLE: &'static str = "workshops";
    const COLUMNS: &'static [&'static str] = &["title", "description", "date", "venue"];

    type Draft = WorkshopDraft;

    fn field_values(draft: &Self::Draft) -> Vec<&str> {
        vec![
            &draft.title,
            &draft.description,
            &draft.date,
            &draft.venue,
        ]
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, draft: Self::Draft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            date: draft.date,
            venue: draft.venue,
            created_at,
        }
    }
}

impl Entity for Developer {
    const NAME: &'static str = "Developer";
    const TABLE: &'static str = "developers";
    const COLUMNS: &'static [&'static str] = &["name", "reg_no", "image"];

    type Draft = DeveloperDraft;

    fn field_values(draft: &Self::Draft) -> Vec<&str> {
        vec![&draft.name, &draft.reg_no, &draft.image]
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn from_draft(id: Uuid, draft: Self::Draft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            reg_no: draft.reg_no,
            image: draft.image,
            created_at,
        }
    }
}

// --- Credential Store ---

/// AdminStore
///
/// The credential store behind login and admin creation. Passwords are
/// hashed here, before persistence; callers never see or store plaintext
/// beyond the request that carried it.
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Hashes the password and persists a new account. Fails with
    /// `DuplicateUsername` if the username is already taken.
    async fn create(&self, username: &str, password: &str) -> Result<Admin, StoreError>;

    /// Looks up an account for login. `None` is not an error; login maps it
    /// to the uniform invalid-credentials response.
    async fn find(&self, username: &str) -> Result<Option<Admin>, StoreError>;
}

pub type AdminState = Arc<dyn AdminStore>;

/// PgAdminStore
///
/// Postgres-backed credential store. Uniqueness is enforced by the
/// `admins.username` unique index; a violation surfaces as
/// `DuplicateUsername` rather than a generic database error.
pub struct PgAdminStore {
    pool: PgPool,
}

impl PgAdminStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn validate_credentials(username: &str, password: &str) -> Result<(), StoreError> {
    if username.trim().is_empty() {
        return Err(StoreError::MissingField { field: "username" });
    }
    if password.trim().is_empty() {
        return Err(StoreError::MissingField { field: "password" });
    }
    Ok(())
}

#[async_trait]
impl AdminStore for PgAdminStore {
    async fn create(&self, username: &str, password: &str) -> Result<Admin, StoreError> {
        validate_credentials(username, password)?;
        let password_hash = hash(password, DEFAULT_COST)?;

        let result = sqlx::query_as::<_, Admin>(
            "INSERT INTO admins (id, username, password_hash, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(&password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(admin) => Ok(admin),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find(&self, username: &str) -> Result<Option<Admin>, StoreError> {
        Ok(
            sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}

/// InMemoryAdminStore
///
/// Credential store over a `Vec`, for tests. Hashing still goes through
/// bcrypt so login tests exercise the real comparison path.
#[derive(Default)]
pub struct InMemoryAdminStore {
    accounts: Mutex<Vec<Admin>>,
}

impl InMemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminStore for InMemoryAdminStore {
    async fn create(&self, username: &str, password: &str) -> Result<Admin, StoreError> {
        validate_credentials(username, password)?;
        let password_hash = hash(password, DEFAULT_COST)?;

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|admin| admin.username == username) {
            return Err(StoreError::DuplicateUsername);
        }
        let admin = Admin {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            password_hash,
            created_at: Utc::now(),
        };
        accounts.push(admin.clone());
        Ok(admin)
    }

    async fn find(&self, username: &str) -> Result<Option<Admin>, StoreError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|admin| admin.username == username)
            .cloned())
    }
}
