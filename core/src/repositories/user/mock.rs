//! In-memory implementation of UserRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::UserRepository;

/// In-memory user repository
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored users, deleted ones included
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn live(users: &HashMap<Uuid, User>) -> impl Iterator<Item = &User> {
    users.values().filter(|u| !u.is_deleted())
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| !u.is_deleted()).cloned())
    }

    async fn find_by_external_subject(
        &self,
        subject_id: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        let found = live(&users)
            .find(|u| u.external_subject_id.as_deref() == Some(subject_id))
            .cloned();
        Ok(found)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        let found = live(&users)
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned();
        Ok(found)
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(DomainError::persistence("duplicate user id"));
        }
        if live(&users).any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(DomainError::persistence("duplicate email"));
        }
        if let Some(subject) = user.external_subject_id.as_deref() {
            if live(&users).any(|u| u.external_subject_id.as_deref() == Some(subject)) {
                return Err(DomainError::persistence("duplicate external subject id"));
            }
        }

        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) if !existing.is_deleted() => {
                *existing = user.clone();
                Ok(user.clone())
            }
            _ => Err(DomainError::NotFound {
                resource: format!("user {}", user.id),
            }),
        }
    }
}
