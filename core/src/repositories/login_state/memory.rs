//! Process-local login state store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::LoginStateStore;
use crate::domain::entities::identity::PendingLogin;
use crate::errors::DomainError;

/// Keeps pending logins in memory
///
/// Entries already expired when a new login starts are pruned on `put`.
#[derive(Clone, Default)]
pub struct InMemoryLoginStateStore {
    entries: Arc<RwLock<HashMap<String, PendingLogin>>>,
}

impl InMemoryLoginStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl LoginStateStore for InMemoryLoginStateStore {
    async fn put(&self, state: &str, pending: &PendingLogin) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.retain(|_, p| !p.is_expired(pending.created_at));
        entries.insert(state.to_string(), pending.clone());
        Ok(())
    }

    async fn take(&self, state: &str) -> Result<Option<PendingLogin>, DomainError> {
        Ok(self.entries.write().await.remove(state))
    }
}
