//! Hands lifecycle events to an `AuditSink` without letting it fail the caller

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::audit::{AuditAction, AuditEvent, ClientInfo};
use crate::repositories::AuditSink;

/// Records audit events with a deadline
pub struct AuditRecorder {
    sink: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl AuditRecorder {
    pub fn new(sink: Arc<dyn AuditSink>, clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            sink,
            clock,
            timeout,
        }
    }

    /// Record `action`; failures and timeouts are logged and dropped
    pub async fn record(&self, action: AuditAction, user_id: Option<Uuid>, client: &ClientInfo) {
        let event = AuditEvent::new(action, user_id, client, self.clock.now());

        match tokio::time::timeout(self.timeout, self.sink.record(&event)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(action = %action, error = %e, "failed to record audit event");
            }
            Err(_) => {
                warn!(action = %action, "audit sink timed out");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::repositories::MockAuditSink;

    fn client() -> ClientInfo {
        ClientInfo::new(Some("10.0.0.1".to_string()), Some("curl/8".to_string()))
    }

    #[tokio::test]
    async fn test_event_carries_client_and_time() {
        let sink = Arc::new(MockAuditSink::new());
        let clock = Arc::new(FixedClock::at_timestamp(1_700_000_000));
        let recorder = AuditRecorder::new(sink.clone(), clock.clone(), Duration::from_secs(1));
        let user_id = Uuid::new_v4();

        recorder.record(AuditAction::Login, Some(user_id), &client()).await;

        let events = sink.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].user_id, Some(user_id));
        assert_eq!(events[0].source_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(events[0].user_agent.as_deref(), Some("curl/8"));
        assert_eq!(events[0].occurred_at, clock.now());
    }

    #[tokio::test]
    async fn test_failing_sink_is_swallowed() {
        let sink = Arc::new(MockAuditSink::failing());
        let recorder = AuditRecorder::new(
            sink.clone(),
            Arc::new(FixedClock::at_timestamp(0)),
            Duration::from_secs(1),
        );

        recorder.record(AuditAction::Logout, None, &ClientInfo::default()).await;

        assert!(sink.events().await.is_empty());
    }
}
