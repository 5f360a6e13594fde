//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken persistence operations
///
/// Records are never deleted; revocation only sets `revoked_at`.
///
/// # Concurrency
/// `rotate` and `revoke` are conditional updates. When two callers race on
/// the same record exactly one of them observes `true`.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token record
    ///
    /// # Arguments
    /// * `token` - Record holding the hash of the secret, never the raw value
    ///
    /// # Returns
    /// * `Ok(())` - Token stored
    /// * `Err(DomainError)` - Save failed
    async fn create(&self, token: &RefreshToken) -> Result<(), DomainError>;

    /// Find a refresh token record by id, whatever its state
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Record found
    /// * `Ok(None)` - No record with that id
    /// * `Err(DomainError)` - Storage error
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError>;

    /// Atomically redeem `current_id` and store its successor
    ///
    /// Marks the current record revoked only if it is still unrevoked and
    /// unexpired at `now`, and inserts `replacement` in the same transaction.
    ///
    /// # Returns
    /// * `Ok(true)` - Rotation committed
    /// * `Ok(false)` - Record already redeemed, revoked or expired; nothing written
    /// * `Err(DomainError)` - Storage error; nothing written
    async fn rotate(
        &self,
        current_id: Uuid,
        replacement: &RefreshToken,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Revoke a record if it is still unrevoked
    ///
    /// # Returns
    /// * `Ok(true)` - This call revoked the record
    /// * `Ok(false)` - Missing or already revoked
    async fn revoke(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, DomainError>;
}
