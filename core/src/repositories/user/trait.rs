//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// All lookups ignore soft-deleted users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - Non-deleted user found
    /// * `Ok(None)` - No such user
    /// * `Err(DomainError)` - Storage error
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by the OAuth provider's subject id
    ///
    /// # Arguments
    /// * `subject_id` - Subject id reported by the provider
    async fn find_by_external_subject(&self, subject_id: &str)
        -> Result<Option<User>, DomainError>;

    /// Find a user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError)` - Storage error, including uniqueness violations
    async fn create(&self, user: &User) -> Result<User, DomainError>;

    /// Update name, avatar, subject id, role, active flag and timestamps
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DomainError::NotFound)` - User missing or deleted
    async fn update(&self, user: &User) -> Result<User, DomainError>;
}
