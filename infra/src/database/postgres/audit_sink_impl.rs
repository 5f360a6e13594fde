//! Audit sink writing to the `auth_audit_log` table.

use async_trait::async_trait;
use sqlx::PgPool;

use idp_core::domain::entities::audit::AuditEvent;
use idp_core::errors::DomainError;
use idp_core::repositories::AuditSink;

use super::db_error;

/// PostgreSQL audit sink
pub struct PostgresAuditSink {
    pool: PgPool,
}

impl PostgresAuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for PostgresAuditSink {
    async fn record(&self, event: &AuditEvent) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO auth_audit_log (user_id, action, ip_address, user_agent, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.user_id)
        .bind(event.action.as_str())
        .bind(&event.source_address)
        .bind(&event.user_agent)
        .bind(event.occurred_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert audit event", e))?;

        Ok(())
    }
}
