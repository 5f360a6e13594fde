//! PostgreSQL implementation of the UserRepository trait.
//!
//! Soft-deleted rows (`deleted_at IS NOT NULL`) are invisible to every
//! lookup. Email comparison is case-insensitive.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use idp_core::domain::entities::user::{Role, User};
use idp_core::errors::DomainError;
use idp_core::repositories::UserRepository;

use super::db_error;

const USER_COLUMNS: &str =
    "id, email, google_id, name, avatar_url, role, is_active, created_at, updated_at, deleted_at";

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        let role: String = row
            .try_get("role")
            .map_err(|e| db_error("read users.role", e))?;
        let role = role
            .parse::<Role>()
            .map_err(|e| DomainError::internal(format!("Invalid stored role: {}", e)))?;

        let avatar_url: Option<String> = row
            .try_get("avatar_url")
            .map_err(|e| db_error("read users.avatar_url", e))?;

        Ok(User {
            id: row.try_get("id").map_err(|e| db_error("read users.id", e))?,
            email: row.try_get("email").map_err(|e| db_error("read users.email", e))?,
            external_subject_id: row
                .try_get("google_id")
                .map_err(|e| db_error("read users.google_id", e))?,
            name: row.try_get("name").map_err(|e| db_error("read users.name", e))?,
            avatar_url: avatar_url.filter(|url| !url.is_empty()),
            role,
            is_active: row
                .try_get("is_active")
                .map_err(|e| db_error("read users.is_active", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("read users.created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| db_error("read users.updated_at", e))?,
            deleted_at: row
                .try_get::<Option<DateTime<Utc>>, _>("deleted_at")
                .map_err(|e| db_error("read users.deleted_at", e))?,
        })
    }

    async fn fetch_one_where(
        &self,
        operation: &str,
        predicate: &str,
        value: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE {} AND deleted_at IS NULL LIMIT 1",
            USER_COLUMNS, predicate
        );
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error(operation, e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find user by id", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_external_subject(
        &self,
        subject_id: &str,
    ) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("find user by subject", "google_id = $1", subject_id)
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("find user by email", "lower(email) = lower($1)", email)
            .await
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let query = format!(
            r#"
            INSERT INTO users (
                id, email, google_id, name, avatar_url, role, is_active,
                created_at, updated_at, deleted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.external_subject_id)
            .bind(&user.name)
            .bind(&user.avatar_url)
            .bind(user.role.as_str())
            .bind(user.is_active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.deleted_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("create user", e))?;

        Self::row_to_user(&row)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let query = format!(
            r#"
            UPDATE users
            SET email = $2, google_id = $3, name = $4, avatar_url = $5,
                role = $6, is_active = $7, updated_at = $8
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.external_subject_id)
            .bind(&user.name)
            .bind(&user.avatar_url)
            .bind(user.role.as_str())
            .bind(user.is_active)
            .bind(user.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("update user", e))?;

        match row {
            Some(row) => Self::row_to_user(&row),
            None => Err(DomainError::NotFound {
                resource: format!("user {}", user.id),
            }),
        }
    }
}
