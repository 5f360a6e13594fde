//! Store for pending OAuth logins keyed by their CSRF state.

use async_trait::async_trait;

use crate::domain::entities::identity::PendingLogin;
use crate::errors::DomainError;

/// Single-use storage for pending logins
#[async_trait]
pub trait LoginStateStore: Send + Sync {
    /// Remember a pending login until its `expires_at`
    async fn put(&self, state: &str, pending: &PendingLogin) -> Result<(), DomainError>;

    /// Remove and return the pending login for `state`
    ///
    /// A second call with the same state returns `Ok(None)`.
    async fn take(&self, state: &str) -> Result<Option<PendingLogin>, DomainError>;
}
