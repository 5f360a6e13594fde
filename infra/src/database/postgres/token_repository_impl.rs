//! PostgreSQL implementation of the TokenRepository trait.
//!
//! Rows are never deleted. Rotation revokes the presented row with a
//! conditional update and inserts the successor in the same transaction,
//! so of two concurrent rotations only one sees a row affected.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::debug;
use uuid::Uuid;

use idp_core::domain::entities::token::RefreshToken;
use idp_core::errors::DomainError;
use idp_core::repositories::TokenRepository;

use super::db_error;

/// PostgreSQL implementation of TokenRepository
pub struct PostgresTokenRepository {
    pool: PgPool,
}

impl PostgresTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshToken entity
    fn row_to_token(row: &PgRow) -> Result<RefreshToken, DomainError> {
        Ok(RefreshToken {
            id: row.try_get("id").map_err(|e| db_error("read refresh_tokens.id", e))?,
            user_id: row
                .try_get("user_id")
                .map_err(|e| db_error("read refresh_tokens.user_id", e))?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| db_error("read refresh_tokens.token_hash", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| db_error("read refresh_tokens.expires_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("read refresh_tokens.created_at", e))?,
            revoked_at: row
                .try_get::<Option<DateTime<Utc>>, _>("revoked_at")
                .map_err(|e| db_error("read refresh_tokens.revoked_at", e))?,
        })
    }

    async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        token: &RefreshToken,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at, created_at, revoked_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(token.id)
        .bind(token.user_id)
        .bind(&token.token_hash)
        .bind(token.expires_at)
        .bind(token.created_at)
        .bind(token.revoked_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    async fn create(&self, token: &RefreshToken) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin insert refresh token", e))?;
        Self::insert(&mut tx, token)
            .await
            .map_err(|e| db_error("insert refresh token", e))?;
        tx.commit()
            .await
            .map_err(|e| db_error("commit refresh token", e))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, token_hash, expires_at, created_at, revoked_at
            FROM refresh_tokens
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find refresh token", e))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn rotate(
        &self,
        current_id: Uuid,
        replacement: &RefreshToken,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin rotation", e))?;

        let revoked = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2
            WHERE id = $1 AND revoked_at IS NULL AND expires_at > $2
            "#,
        )
        .bind(current_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("revoke rotated token", e))?;

        if revoked.rows_affected() == 0 {
            debug!(token_id = %current_id, "rotation lost: token no longer active");
            tx.rollback()
                .await
                .map_err(|e| db_error("rollback rotation", e))?;
            return Ok(false);
        }

        Self::insert(&mut tx, replacement)
            .await
            .map_err(|e| db_error("insert successor token", e))?;
        tx.commit()
            .await
            .map_err(|e| db_error("commit rotation", e))?;
        Ok(true)
    }

    async fn revoke(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2
            WHERE id = $1 AND revoked_at IS NULL AND expires_at > $2
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("revoke refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }
}
