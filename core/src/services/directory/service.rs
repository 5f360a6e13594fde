//! Directory service backed by a `UserRepository`

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use super::reconcile::{reconcile, AdminAllowList, Reconciliation};
use crate::clock::Clock;
use crate::domain::entities::identity::ExternalIdentity;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::timeout::storage_call;

/// Resolves provider identities to local users
pub struct UserDirectory {
    users: Arc<dyn UserRepository>,
    allow_list: AdminAllowList,
    clock: Arc<dyn Clock>,
    storage_timeout: Duration,
}

impl UserDirectory {
    pub fn new(
        users: Arc<dyn UserRepository>,
        allow_list: AdminAllowList,
        clock: Arc<dyn Clock>,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            users,
            allow_list,
            clock,
            storage_timeout,
        }
    }

    /// Find or create the user behind `identity`
    ///
    /// Lookup goes by provider subject first, then by email for accounts not
    /// yet bound to a subject.
    ///
    /// # Errors
    /// * `AuthError::EmailConflict` if the email belongs to another subject, or
    ///   matches an unlinked account but is not verified by the provider
    /// * `AuthError::UserInactive` if the resolved user may not log in
    /// * `DomainError::Persistence` on storage failure or timeout
    pub async fn reconcile(&self, identity: &ExternalIdentity) -> DomainResult<User> {
        let existing = match self.find_by_subject(&identity.subject_id).await? {
            Some(user) => Some(user),
            None => self.find_linkable(identity).await?,
        };

        let outcome = reconcile(identity, existing, &self.allow_list, self.clock.now());
        let user = match outcome {
            Reconciliation::Create(user) => {
                let created =
                    storage_call(self.storage_timeout, "create user", self.users.create(&user))
                        .await?;
                info!(user_id = %created.id, role = %created.role, "user created");
                created
            }
            Reconciliation::Update(user) => {
                storage_call(self.storage_timeout, "update user", self.users.update(&user)).await?
            }
            Reconciliation::Unchanged(user) => user,
        };

        if !user.can_authenticate() {
            warn!(user_id = %user.id, "inactive user attempted login");
            return Err(AuthError::UserInactive.into());
        }
        Ok(user)
    }

    /// Non-deleted user by id
    ///
    /// # Errors
    /// * `DomainError::NotFound` if no such user exists
    pub async fn get(&self, id: Uuid) -> DomainResult<User> {
        storage_call(self.storage_timeout, "find user", self.users.find_by_id(id))
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("user {}", id),
            })
    }

    pub fn allow_list(&self) -> &AdminAllowList {
        &self.allow_list
    }

    async fn find_by_subject(&self, subject_id: &str) -> DomainResult<Option<User>> {
        storage_call(
            self.storage_timeout,
            "find user by subject",
            self.users.find_by_external_subject(subject_id),
        )
        .await
    }

    async fn find_linkable(&self, identity: &ExternalIdentity) -> DomainResult<Option<User>> {
        let by_email = storage_call(
            self.storage_timeout,
            "find user by email",
            self.users.find_by_email(&identity.email),
        )
        .await?;

        match by_email {
            Some(user) if user.external_subject_id.is_some() => {
                warn!(user_id = %user.id, "email already bound to another provider subject");
                Err(AuthError::EmailConflict.into())
            }
            Some(user) if !identity.email_verified => {
                warn!(user_id = %user.id, "refusing to link account to an unverified email");
                Err(AuthError::EmailConflict.into())
            }
            other => Ok(other),
        }
    }
}
