//! Audit sink that writes events to the `audit` tracing target

use async_trait::async_trait;
use tracing::info;

use super::AuditSink;
use crate::domain::entities::audit::AuditEvent;
use crate::errors::DomainError;

/// Emits each event as a structured log line
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, event: &AuditEvent) -> Result<(), DomainError> {
        info!(
            target: "audit",
            action = event.action.as_str(),
            user_id = ?event.user_id,
            source_address = event.source_address.as_deref().unwrap_or("-"),
            user_agent = event.user_agent.as_deref().unwrap_or("-"),
            occurred_at = %event.occurred_at,
            "auth event"
        );
        Ok(())
    }
}
