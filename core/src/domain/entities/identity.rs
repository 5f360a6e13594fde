//! Values exchanged with the external OAuth provider.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verified identity returned by the provider's profile endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    /// Provider subject id
    pub subject_id: String,
    pub email: String,
    pub email_verified: bool,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Grant obtained by exchanging an authorization code
#[derive(Clone)]
pub struct ProviderGrant {
    pub access_token: String,
    pub token_type: String,
}

impl fmt::Debug for ProviderGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderGrant")
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

/// Login started by `begin_login`, waiting for the provider callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    pub redirect_target: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PendingLogin {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Where to send the browser, and the state it must come back with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginChallenge {
    pub authorization_url: String,
    pub state: String,
}
