//! Audit sink trait: where lifecycle events are handed off for persistence.

use async_trait::async_trait;

use crate::domain::entities::audit::AuditEvent;
use crate::errors::DomainError;

/// Receiver of audit events
///
/// The core only emits events. A failing sink is logged by the caller and
/// never fails the operation that produced the event.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Record a single event
    ///
    /// # Arguments
    /// * `event` - The event to persist
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(DomainError)` if the sink could not accept the event
    async fn record(&self, event: &AuditEvent) -> Result<(), DomainError>;
}
