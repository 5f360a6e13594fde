//! Recording audit sink for tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::AuditSink;
use crate::domain::entities::audit::{AuditAction, AuditEvent};
use crate::errors::DomainError;

/// Keeps every event in memory, optionally rejecting them
#[derive(Clone, Default)]
pub struct MockAuditSink {
    events: Arc<RwLock<Vec<AuditEvent>>>,
    failing: Arc<AtomicBool>,
}

impl MockAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that rejects every event
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.failing.store(true, Ordering::SeqCst);
        sink
    }

    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.read().await.clone()
    }

    pub async fn actions(&self) -> Vec<AuditAction> {
        self.events.read().await.iter().map(|e| e.action).collect()
    }
}

#[async_trait]
impl AuditSink for MockAuditSink {
    async fn record(&self, event: &AuditEvent) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("audit sink unavailable"));
        }
        self.events.write().await.push(event.clone());
        Ok(())
    }
}
