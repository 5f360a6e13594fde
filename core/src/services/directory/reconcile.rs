//! Pure reconciliation of a provider identity against a stored user

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::domain::entities::identity::ExternalIdentity;
use crate::domain::entities::user::{Role, User};

/// Emails granted the admin role on login
///
/// Comparison is case-insensitive. Only provider-verified emails match.
#[derive(Debug, Clone, Default)]
pub struct AdminAllowList {
    emails: HashSet<String>,
}

impl AdminAllowList {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emails = emails
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { emails }
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&email.trim().to_lowercase())
    }

    /// Whether `email` earns admin, given what the provider says about it
    pub fn grants_admin(&self, email: &str, identity: &ExternalIdentity) -> bool {
        identity.email_verified && self.contains(email)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

/// What has to be written to bring the directory in line with an identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// No account yet
    Create(User),
    /// Existing account whose profile, link or role changed
    Update(User),
    Unchanged(User),
}

impl Reconciliation {
    pub fn user(&self) -> &User {
        match self {
            Reconciliation::Create(user)
            | Reconciliation::Update(user)
            | Reconciliation::Unchanged(user) => user,
        }
    }

    pub fn into_user(self) -> User {
        match self {
            Reconciliation::Create(user)
            | Reconciliation::Update(user)
            | Reconciliation::Unchanged(user) => user,
        }
    }
}

/// Decide how `identity` lands in the directory
///
/// Profile fields follow the latest identity. The role only ever moves from
/// `user` to `admin`; removing an email from the allow-list demotes no one.
pub fn reconcile(
    identity: &ExternalIdentity,
    existing: Option<User>,
    allow_list: &AdminAllowList,
    now: DateTime<Utc>,
) -> Reconciliation {
    let Some(current) = existing else {
        let mut user = User::new(identity.email.clone(), identity.name.clone(), now);
        user.external_subject_id = Some(identity.subject_id.clone());
        user.avatar_url = identity.avatar_url.clone();
        if allow_list.grants_admin(&identity.email, identity) {
            user.role = Role::Admin;
        }
        return Reconciliation::Create(user);
    };

    let mut user = current.clone();
    user.name = identity.name.clone();
    user.avatar_url = identity.avatar_url.clone();
    if user.external_subject_id.is_none() {
        user.external_subject_id = Some(identity.subject_id.clone());
    }
    if user.role == Role::User && allow_list.grants_admin(&user.email, identity) {
        user.role = Role::Admin;
    }

    if user == current {
        Reconciliation::Unchanged(user)
    } else {
        user.updated_at = now;
        Reconciliation::Update(user)
    }
}
