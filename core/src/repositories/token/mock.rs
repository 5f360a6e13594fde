//! In-memory implementation of TokenRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// In-memory token repository
///
/// Conditional updates run under a single write lock, which gives the same
/// one-winner guarantee as the SQL implementation.
#[derive(Clone)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, RefreshToken>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MockTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every write fail with a persistence error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// All stored records
    pub async fn all(&self) -> Vec<RefreshToken> {
        self.tokens.read().await.values().cloned().collect()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("token store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn create(&self, token: &RefreshToken) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.id) {
            return Err(DomainError::persistence("duplicate refresh token id"));
        }

        tokens.insert(token.id, token.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(&id).cloned())
    }

    async fn rotate(
        &self,
        current_id: Uuid,
        replacement: &RefreshToken,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check_writable()?;
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&replacement.id) {
            return Err(DomainError::persistence("duplicate refresh token id"));
        }

        match tokens.get_mut(&current_id) {
            Some(current) if current.is_active(now) => {
                current.revoke(now);
            }
            _ => return Ok(false),
        }

        tokens.insert(replacement.id, replacement.clone());
        Ok(true)
    }

    async fn revoke(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError> {
        self.check_writable()?;
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(&id) {
            Some(token) if token.is_active(now) => {
                token.revoke(now);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
